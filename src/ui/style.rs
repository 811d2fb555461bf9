//! Formatting capability handed to renderers
//!
//! Renderers never emit escape sequences themselves. They ask a `Style` to
//! color a piece of text or to produce an icon, so the same renderer works
//! for a color terminal, a pipe, or a test buffer.

use crate::ui::context::UiContext;
use crate::ui::primitives::{ColoredText, Icon, SemanticColor};
use crate::ui::theme;

pub trait Style {
    fn colorize(&self, text: &str, color: SemanticColor) -> String;

    fn icon(&self, icon: Icon) -> String;

    /// A horizontal rule `width` characters wide
    fn rule(&self, width: usize) -> String {
        theme::rules_ascii::HORIZONTAL.repeat(width)
    }
}

/// Crossterm-backed style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalStyle {
    color: bool,
    unicode: bool,
}

impl TerminalStyle {
    pub fn new(color: bool, unicode: bool) -> Self {
        Self { color, unicode }
    }

    /// No color, ASCII icons
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn from_context(ui: &UiContext) -> Self {
        Self::new(ui.color, ui.unicode)
    }
}

impl Style for TerminalStyle {
    fn colorize(&self, text: &str, color: SemanticColor) -> String {
        ColoredText::new(text, color).render(self.color)
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn rule(&self, width: usize) -> String {
        let unit = if self.unicode {
            theme::rules::HORIZONTAL
        } else {
            theme::rules_ascii::HORIZONTAL
        };
        let rule = unit.repeat(width);
        ColoredText::dim(rule).render(self.color)
    }
}
