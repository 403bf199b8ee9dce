use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::fmt::{Display, Write};

use super::traits::Renderer;
use crate::presentation::view_models::CommandResultViewModel;

pub struct ConsoleRenderer {
    json_mode: bool,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Renderer that never emits ANSI codes.
    pub fn plain() -> Self {
        Self {
            json_mode: false,
            color: false,
        }
    }

    pub fn format<T>(&self, result: &CommandResultViewModel<T>) -> Result<String>
    where
        T: Serialize + Display,
    {
        if self.json_mode {
            return Ok(format!("{}\n", serde_json::to_string_pretty(result)?));
        }

        let mut out = String::new();

        if let Some(badge) = &result.badge {
            writeln!(
                out,
                "{} {}",
                badge.icon(),
                self.paint(&badge.label, Style::new().bold())
            )?;
            writeln!(out)?;
        }

        write!(out, "{}", result.content)?;

        if !result.suggestions.is_empty() {
            writeln!(out, "\n{}", self.paint("💡 Tips:", Style::new().yellow().bold()))?;
            for tip in &result.suggestions {
                write!(out, "  • {}", tip.description)?;
                if let Some(cmd) = &tip.command {
                    write!(out, ": {}", self.paint(cmd, Style::new().cyan()))?;
                }
                writeln!(out)?;
            }
        }

        Ok(out)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        print!("{}", self.format(&result)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::{ClearViewModel, Guidance, StatusBadge};

    fn cleared() -> CommandResultViewModel<ClearViewModel> {
        CommandResultViewModel::new(ClearViewModel {
            removed_keys: vec!["finalAnalytics".to_string(), "websiteAnalytics".to_string()],
        })
        .with_badge(StatusBadge::success("Cleared 2 keys"))
        .with_suggestion(Guidance::new("Record a new visit").with_command("keepsake simulate"))
    }

    #[test]
    fn test_plain_output() {
        let text = ConsoleRenderer::plain().format(&cleared()).unwrap();
        insta::assert_snapshot!(text, @r"
        ✅ Cleared 2 keys

          removed finalAnalytics
          removed websiteAnalytics

        💡 Tips:
          • Record a new visit: keepsake simulate
        ");
    }

    #[test]
    fn test_json_envelope() {
        let renderer = ConsoleRenderer {
            json_mode: true,
            color: false,
        };
        let text = renderer.format(&cleared()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["badge"]["level"], "success");
        assert_eq!(value["content"]["removedKeys"][1], "websiteAnalytics");
        assert_eq!(value["suggestions"][0]["command"], "keepsake simulate");
    }
}
