use std::fmt::Write as _;

use crate::config::ConfigWarning;
use crate::ui::primitives::{Icon, SemanticColor};
use crate::ui::style::Style;

pub fn render_config_warnings(warnings: &[ConfigWarning], style: &dyn Style) -> String {
    let mut out = String::new();
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        let _ = writeln!(
            out,
            "{} Unknown config key '{}' in {}",
            style.icon(Icon::Warning),
            style.colorize(&w.key, SemanticColor::Warning),
            location
        );

        if let Some(suggestion) = &w.suggestion {
            let _ = writeln!(out, "   Did you mean '{}'?", suggestion);
        }
    }
    out
}
