//! Language conventions - 주석 접두사와 코드 스타일 규칙

/// Line comment prefix used for every inserted, non-code line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `# `
    Hash,
    /// `// `
    DoubleSlash,
}

impl CommentStyle {
    /// python만 `#`, 나머지는 모두 `//`
    pub fn for_language(language_id: &str) -> Self {
        if language_id.eq_ignore_ascii_case("python") {
            CommentStyle::Hash
        } else {
            CommentStyle::DoubleSlash
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            CommentStyle::Hash => "# ",
            CommentStyle::DoubleSlash => "// ",
        }
    }

    /// Comment a single line; an empty line yields the bare marker
    pub fn line(&self, text: &str) -> String {
        let text = text.trim_end();
        if text.is_empty() {
            self.prefix().trim_end().to_string()
        } else {
            format!("{}{}", self.prefix(), text)
        }
    }

    /// Comment every line of `text`, each terminated by `\n`
    pub fn block(&self, text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            out.push_str(&self.line(line));
            out.push('\n');
        }
        out
    }
}

/// Style constraint placed in generation prompts
pub fn style_rule(language_id: &str) -> String {
    match language_id.to_lowercase().as_str() {
        "javascript" | "javascriptreact" => {
            "Write plain JavaScript. DO NOT use TypeScript syntax or static type annotations.".to_string()
        }
        "typescript" | "typescriptreact" => {
            "Write TypeScript with explicit type annotations on every parameter and return value."
                .to_string()
        }
        other => format!("Write idiomatic {} code.", other),
    }
}
