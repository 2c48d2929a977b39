//! Line-oriented scripts that drive a page from the terminal
//!
//! ```text
//! # bump the first counter twice, then let the pulse settle
//! inc 0
//! inc 0
//! wait 500
//! theme purple
//! show
//! ```

use std::io::Write;
use std::time::Duration;
use tally_ui::core::{Action, Event, Widget, WidgetId};
use tally_ui::{Page, UiError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("line {line}: no counter #{index}")]
    NoCounter { line: usize, index: usize },
    #[error("line {line}: {source}")]
    Page {
        line: usize,
        #[source]
        source: UiError,
    },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click { index: usize, action: Action },
    Input { index: usize, text: String },
    Theme(String),
    Wait(Duration),
    Show,
    Html,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>, ScriptError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        let command = match word {
            "inc" => Command::Click { index: index(line_no, rest)?, action: Action::Increment },
            "dec" => Command::Click { index: index(line_no, rest)?, action: Action::Decrement },
            "reset" => Command::Click { index: index(line_no, rest)?, action: Action::Reset },
            "input" => {
                // the text may be empty or contain spaces
                let (target, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Input { index: index(line_no, target)?, text: text.to_string() }
            }
            "theme" if !rest.is_empty() => Command::Theme(rest.to_string()),
            "theme" => return Err(syntax(line_no, "expected a theme tag")),
            "wait" => {
                let ms = rest
                    .parse::<u64>()
                    .map_err(|_| syntax(line_no, format!("expected milliseconds, got `{}`", rest)))?;
                Command::Wait(Duration::from_millis(ms))
            }
            "show" => Command::Show,
            "html" => Command::Html,
            other => {
                return Err(ScriptError::UnknownCommand { line: line_no, command: other.to_string() });
            }
        };

        Ok(Some(command))
    }
}

fn index(line: usize, arg: &str) -> Result<usize, ScriptError> {
    arg.trim()
        .parse()
        .map_err(|_| syntax(line, format!("expected a counter index, got `{}`", arg.trim())))
}

fn syntax(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Syntax { line, message: message.into() }
}

/// Run a whole script against `page`, writing `show`/`html` output to `out`.
/// Stops at the first failing line.
pub fn run(page: &mut Page, source: &str, out: &mut impl Write) -> Result<(), ScriptError> {
    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;
        if let Some(command) = Command::parse(line_no, line)? {
            debug!(line = line_no, ?command, "script");
            execute(page, line_no, command, out)?;
        }
    }
    Ok(())
}

fn execute(page: &mut Page, line: usize, command: Command, out: &mut impl Write) -> Result<(), ScriptError> {
    let page_err = |source| ScriptError::Page { line, source };

    match command {
        Command::Click { index, action } => {
            let id = widget_at(page, line, index)?;
            page.send(id, &Event::click(action)).map_err(page_err)?;
        }
        Command::Input { index, text } => {
            let id = widget_at(page, line, index)?;
            page.send(id, &Event::change(text)).map_err(page_err)?;
        }
        Command::Theme(tag) => {
            page.select_theme(&tag).map_err(page_err)?;
        }
        Command::Wait(by) => {
            page.advance(by);
        }
        Command::Show => {
            for line in show(page) {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Html => write!(out, "{}", page.to_html())?,
    }

    // scripts have no client to patch
    page.take_patches();
    Ok(())
}

fn widget_at(page: &Page, line: usize, index: usize) -> Result<WidgetId, ScriptError> {
    page.counter_at(index)
        .map(|counter| counter.id())
        .ok_or(ScriptError::NoCounter { line, index })
}

/// One summary line per mounted counter
pub fn show(page: &Page) -> Vec<String> {
    page.counters()
        .iter()
        .enumerate()
        .map(|(i, counter)| {
            format!(
                "#{} count={} min={} max={} step={} theme={} animating={}",
                i,
                counter.count(),
                counter.min_label(),
                counter.max_label(),
                counter.config().step,
                counter.theme(),
                counter.is_animating()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_ui::core::Theme;

    fn play(source: &str) -> (Page, Result<String, ScriptError>) {
        let mut page = Page::demo();
        let mut out = Vec::new();
        let result = run(&mut page, source, &mut out).map(|_| String::from_utf8(out).unwrap());
        (page, result)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(1, "  # note").unwrap(), None);
        assert_eq!(Command::parse(1, "").unwrap(), None);
        assert_eq!(
            Command::parse(1, "dec 2").unwrap(),
            Some(Command::Click { index: 2, action: Action::Decrement })
        );
        assert_eq!(
            Command::parse(1, "input 1 12 apples").unwrap(),
            Some(Command::Input { index: 1, text: "12 apples".into() })
        );
        assert_eq!(Command::parse(1, "input 0").unwrap(), Some(Command::Input { index: 0, text: String::new() }));
        assert_eq!(Command::parse(1, "wait 250").unwrap(), Some(Command::Wait(Duration::from_millis(250))));
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = Command::parse(4, "jump 1").unwrap_err();
        assert_eq!(err.to_string(), "line 4: unknown command `jump`");

        let err = Command::parse(7, "inc first").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 7, .. }));
        assert!(matches!(Command::parse(2, "wait soon"), Err(ScriptError::Syntax { line: 2, .. })));
        assert!(matches!(Command::parse(3, "theme"), Err(ScriptError::Syntax { line: 3, .. })));
    }

    #[test]
    fn test_show_summary() {
        let (_, out) = play("show");
        assert_eq!(
            out.unwrap(),
            "#0 count=5 min=0 max=10 step=1 theme=blue animating=false\n\
             #1 count=50 min=0 max=100 step=5 theme=green animating=false\n\
             #2 count=0 min=-10 max=10 step=2 theme=purple animating=false\n"
        );
    }

    #[test]
    fn test_clicks_and_pulse() {
        let (page, out) = play("inc 0\ninc 0\ndec 1\nreset 2\n");
        out.unwrap();
        let counts: Vec<i64> = page.counters().iter().map(|c| c.count()).collect();
        assert_eq!(counts, vec![7, 45, 0]);
        assert!(page.counters().iter().all(|c| c.is_animating()));

        let (page, out) = play("inc 0\nwait 499\n");
        out.unwrap();
        assert!(page.counters()[0].is_animating());

        let (page, out) = play("inc 0\nwait 500\n");
        out.unwrap();
        assert!(!page.counters()[0].is_animating());
    }

    #[test]
    fn test_input_and_theme() {
        let (page, out) = play("input 0 42abc\ninput 2 -3.9\ninput 1 abc\ntheme green\n");
        out.unwrap();
        let counts: Vec<i64> = page.counters().iter().map(|c| c.count()).collect();
        assert_eq!(counts, vec![10, 50, -3]);
        assert!(page.counters().iter().all(|c| c.theme() == Theme::Green));
    }

    #[test]
    fn test_runtime_errors_carry_line() {
        let (_, out) = play("inc 0\n\ninc 9\n");
        assert!(matches!(out, Err(ScriptError::NoCounter { line: 3, index: 9 })));

        let (page, out) = play("# switch\ntheme orange\n");
        let err = out.unwrap_err();
        assert!(matches!(err, ScriptError::Page { line: 2, source: UiError::UnknownTheme(_) }));
        assert_eq!(page.counters()[0].theme(), Theme::Blue);
    }

    #[test]
    fn test_html_output() {
        let (_, out) = play("html");
        let html = out.unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("class=\"counter-container").count(), 3);
    }
}
