//! LLM backends

mod http;

pub mod gemini;
pub mod openai;
