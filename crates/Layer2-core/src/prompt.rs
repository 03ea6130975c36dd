//! Prompt builder - LLM instruction templates
//!
//! 모든 프롬프트는 결정적이며 부작용이 없다.
//! 응답 형식은 `parse` 모듈이 다시 읽어들인다.

use crate::language::{style_rule, CommentStyle};
use crate::parse::Section;
use crate::request::{GenerationRequest, Mode};

/// Formatting rules shared by every prompt
const PLAIN_TEXT_RULES: &str = "\
- DO NOT include headings.
- DO NOT include the word \"Question\" as a prefix.
- DO NOT include separators like ===== or ----.
- DO NOT include any decorative formatting.";

/// Build the question-generation prompt
pub fn question_prompt(request: &GenerationRequest) -> String {
    let mut sections = vec![Section::Question];
    if request.mode.wants_hint() {
        sections.push(Section::Hint);
    }
    if request.mode.wants_solution() {
        sections.push(Section::Solution);
    }

    let mut layout = String::new();
    for section in &sections {
        layout.push_str(section.marker());
        layout.push('\n');
        layout.push_str(&section_placeholder(*section, &request.language));
        layout.push('\n');
    }

    let mut rules = vec![PLAIN_TEXT_RULES.to_string()];
    rules.push(format!("- {}", style_rule(&request.language)));
    if !request.mode.wants_hint() {
        rules.push("- DO NOT include a hint.".to_string());
    } else {
        rules.push("- The hint must point in the right direction without giving the answer away.".to_string());
    }
    if !request.mode.wants_solution() {
        rules.push("- DO NOT include a solution.".to_string());
        rules.push("- DO NOT include an explanation.".to_string());
    } else {
        rules.push(
            "- The solution must be complete, runnable code only, without markdown fences."
                .to_string(),
        );
    }
    if request.mode == Mode::MultipleApproaches {
        rules.push(
            "- The solution must present at least two different approaches, each introduced by a comment line naming the approach."
                .to_string(),
        );
    }

    format!(
        "Generate ONE coding practice question.\n\
         \n\
         Topic: {topic}\n\
         Programming Language: {language}\n\
         Difficulty: {difficulty}\n\
         {guidance}\n\
         \n\
         Reply using exactly these section markers, each on its own line, in this order:\n\
         {layout}\n\
         STRICT RULES:\n\
         {rules}\n\
         - Return plain text inside each section.\n",
        topic = request.topic,
        language = request.language,
        difficulty = request.difficulty.label(),
        guidance = request.difficulty.guidance(),
        layout = layout,
        rules = rules.join("\n"),
    )
}

fn section_placeholder(section: Section, language: &str) -> String {
    match section {
        Section::Question => "<the question as clean paragraph text>".to_string(),
        Section::Hint => "<one or two sentences of hint>".to_string(),
        Section::Solution => format!("<the {} solution code>", language),
    }
}

/// Build the explain prompt: annotate the stored solution with comments
pub fn explain_prompt(solution: &str, language: &str) -> String {
    let style = CommentStyle::for_language(language);
    format!(
        "Add explanatory comments to the following {language} code.\n\
         \n\
         STRICT RULES:\n\
         - Keep every line of code unchanged; only add comment lines.\n\
         - Use `{marker}` line comments.\n\
         - Explain the approach first, then the non-obvious steps.\n\
         - Return ONLY the commented code, without markdown fences or any text around it.\n\
         \n\
         CODE:\n\
         {solution}\n",
        language = language,
        marker = style.prefix().trim_end(),
        solution = solution.trim_end(),
    )
}

/// Build the evaluation prompt
///
/// The user's code is sent with 1-based line numbers so suggestions can cite
/// lines with `LINE <n>:`.
pub fn evaluation_prompt(solution: &str, user_code: &str, language: &str) -> String {
    format!(
        "Evaluate the user's {language} code against the reference solution.\n\
         \n\
         Reply in exactly this format, plain text, no markdown:\n\
         Code Evaluation Summary:\n\
         Correctness: <is the code correct, and why>\n\
         Edge Cases: <which edge cases are handled or missed>\n\
         Time Complexity: <big-O of the user's code>\n\
         Code Quality: <readability and style>\n\
         Final Verdict: <one sentence>\n\
         Suggestions:\n\
         LINE <n>: <concrete suggestion for that line>\n\
         \n\
         STRICT RULES:\n\
         {rules}\n\
         - Omit the Suggestions section entirely if there is nothing to suggest.\n\
         - Use the line numbers shown in USER CODE.\n\
         \n\
         REFERENCE SOLUTION:\n\
         {solution}\n\
         \n\
         USER CODE:\n\
         {numbered}",
        language = language,
        rules = PLAIN_TEXT_RULES,
        solution = solution.trim_end(),
        numbered = number_lines(user_code),
    )
}

/// Prefix each line with its 1-based line number
pub fn number_lines(code: &str) -> String {
    let width = code.lines().count().max(1).to_string().len();
    let mut out = String::new();
    for (idx, line) in code.lines().enumerate() {
        out.push_str(&format!("{:>width$} | {}\n", idx + 1, line, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Difficulty;

    fn request(mode: Mode, language: &str) -> GenerationRequest {
        GenerationRequest::new("Sorting", language, Difficulty::Medium, mode)
    }

    #[test]
    fn test_question_only_markers() {
        let prompt = question_prompt(&request(Mode::QuestionOnly, "python"));
        assert!(prompt.contains("[QUESTION]"));
        assert!(!prompt.contains("[HINT]"));
        assert!(!prompt.contains("[SOLUTION]"));
        assert!(prompt.contains("DO NOT include a solution."));
        assert!(prompt.contains("Topic: Sorting"));
        assert!(prompt.contains("Difficulty: Medium"));
    }

    #[test]
    fn test_hint_mode_markers() {
        let prompt = question_prompt(&request(Mode::QuestionPlusHint, "go"));
        assert!(prompt.contains("[QUESTION]"));
        assert!(prompt.contains("[HINT]"));
        assert!(!prompt.contains("[SOLUTION]"));
        assert!(prompt.contains("Write idiomatic go code."));
    }

    #[test]
    fn test_multiple_approaches() {
        let prompt = question_prompt(&request(Mode::MultipleApproaches, "typescript"));
        assert!(prompt.contains("[SOLUTION]"));
        assert!(prompt.contains("at least two different approaches"));
        assert!(prompt.contains("explicit type annotations"));

        let full = question_prompt(&request(Mode::FullSolution, "javascript"));
        assert!(!full.contains("at least two different approaches"));
        assert!(full.contains("DO NOT use TypeScript"));
    }

    #[test]
    fn test_deterministic() {
        let req = request(Mode::FullSolution, "rust");
        assert_eq!(question_prompt(&req), question_prompt(&req));
    }

    #[test]
    fn test_explain_prompt_comment_marker() {
        let prompt = explain_prompt("def f():\n    pass\n", "python");
        assert!(prompt.contains("Use `#` line comments."));
        assert!(prompt.ends_with("def f():\n    pass\n"));
    }

    #[test]
    fn test_evaluation_prompt_numbers_lines() {
        let prompt = evaluation_prompt("ref()", "a\nb\nc", "go");
        assert!(prompt.contains("Code Evaluation Summary:"));
        assert!(prompt.contains("Final Verdict:"));
        assert!(prompt.contains("1 | a\n2 | b\n3 | c\n"));
    }

    #[test]
    fn test_number_lines_width() {
        let code = (1..=10).map(|i| format!("l{}", i)).collect::<Vec<_>>().join("\n");
        let numbered = number_lines(&code);
        assert!(numbered.starts_with(" 1 | l1\n"));
        assert!(numbered.ends_with("10 | l10\n"));
    }
}
