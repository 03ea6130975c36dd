//! Provider 등록 - 백엔드 종류와 credential

mod provider;
mod provider_type;

pub use provider::{ProviderConfig, ProviderEntry, ResolvedProvider, PROVIDERS_FILE};
pub use provider_type::ProviderType;
