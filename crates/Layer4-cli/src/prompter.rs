//! Terminal prompter
//!
//! 선택 메뉴는 crossterm raw mode (↑↓ 이동, Enter 선택, Esc 취소).
//! 블로킹 입력은 `spawn_blocking`에서 처리한다.

use async_trait::async_trait;
use codeforgex_core::{Action, Difficulty, Mode};
use codeforgex_practice::{Notice, NoticeLevel, Prompter, TopicDecision};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm_topic(&self, detected: &str) -> Option<TopicDecision> {
        let title = format!("Detected Topic: {}", detected);
        let items = vec!["Continue".to_string(), "Change Topic".to_string()];
        select(title, items).await.map(|idx| match idx {
            0 => TopicDecision::Continue,
            _ => TopicDecision::ChangeTopic,
        })
    }

    async fn input_topic(&self) -> Option<String> {
        blocking(|| read_line("Enter a topic (blank keeps the detected one): ")).await
    }

    async fn pick_difficulty(&self) -> Option<Difficulty> {
        let items = Difficulty::ALL.iter().map(|d| d.label().to_string()).collect();
        select("Select difficulty".to_string(), items)
            .await
            .and_then(|idx| Difficulty::ALL.get(idx).copied())
    }

    async fn pick_mode(&self) -> Option<Mode> {
        let items = Mode::ALL.iter().map(|m| m.label().to_string()).collect();
        select("Select mode".to_string(), items)
            .await
            .and_then(|idx| Mode::ALL.get(idx).copied())
    }

    async fn pick_action(&self, actions: &[Action]) -> Option<Action> {
        let items = actions.iter().map(|a| a.label().to_string()).collect();
        select("Choose an action".to_string(), items)
            .await
            .and_then(|idx| actions.get(idx).copied())
    }

    async fn notify(&self, notice: Notice) {
        if let Err(e) = print_notice(&notice) {
            tracing::warn!(error = %e, "failed to print notice");
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn notice_style(level: NoticeLevel) -> (Color, &'static str) {
    match level {
        NoticeLevel::Info => (Color::Green, "✓"),
        NoticeLevel::Warning => (Color::Yellow, "!"),
        NoticeLevel::Error => (Color::Red, "✗"),
    }
}

fn print_notice(notice: &Notice) -> io::Result<()> {
    let (color, symbol) = notice_style(notice.level);
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(color),
        Print(format!("{} ", symbol)),
        ResetColor,
        Print(format!("{}\n", notice.message))
    )
}

async fn select(title: String, items: Vec<String>) -> Option<usize> {
    blocking(move || select_blocking(&title, &items)).await
}

/// Run a blocking terminal interaction; I/O failures count as cancel
async fn blocking<T, F>(f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<Option<T>> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "terminal input failed");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "terminal input task failed");
            None
        }
    }
}

/// Leaves raw mode on drop
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn is_cancel(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Esc || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

fn select_blocking(title: &str, items: &[String]) -> io::Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print(format!("{} (↑↓ 이동, Enter 선택, Esc 취소)\n", title)),
        ResetColor
    )?;

    let _raw = RawMode::enable()?;
    let mut selected = 0usize;
    draw_items(&mut stdout, items, selected)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => {
                if selected + 1 < items.len() {
                    selected += 1;
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                if (1..=items.len()).contains(&n) {
                    selected = n - 1;
                }
            }
            KeyCode::Enter => return Ok(Some(selected)),
            code if is_cancel(code, key.modifiers) => return Ok(None),
            _ => continue,
        }

        execute!(stdout, cursor::MoveUp(items.len() as u16))?;
        draw_items(&mut stdout, items, selected)?;
    }
}

fn draw_items(stdout: &mut io::Stdout, items: &[String], selected: usize) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if i == selected {
            execute!(
                stdout,
                SetForegroundColor(Color::Green),
                Print(format!("  ▶ {}\r\n", item)),
                ResetColor
            )?;
        } else {
            execute!(stdout, Print(format!("    {}\r\n", item)))?;
        }
    }
    stdout.flush()
}

fn read_line(label: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print(label),
        ResetColor
    )?;
    stdout.flush()?;

    let _raw = RawMode::enable()?;
    let mut input = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => {
                execute!(stdout, Print("\r\n"))?;
                return Ok(Some(input));
            }
            code if is_cancel(code, key.modifiers) => {
                execute!(stdout, Print("\r\n"))?;
                return Ok(None);
            }
            KeyCode::Char(c) => {
                input.push(c);
                execute!(stdout, Print(c))?;
            }
            KeyCode::Backspace => {
                if input.pop().is_some() {
                    execute!(stdout, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_styles() {
        assert_eq!(notice_style(NoticeLevel::Info).0, Color::Green);
        assert_eq!(notice_style(NoticeLevel::Warning).0, Color::Yellow);
        assert_eq!(notice_style(NoticeLevel::Error), (Color::Red, "✗"));
    }

    #[test]
    fn test_cancel_keys() {
        assert!(is_cancel(KeyCode::Esc, KeyModifiers::NONE));
        assert!(is_cancel(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_cancel(KeyCode::Char('c'), KeyModifiers::NONE));
    }

    #[test]
    fn test_empty_menu_cancels() {
        assert_eq!(select_blocking("Nothing", &[]).unwrap(), None);
    }
}
