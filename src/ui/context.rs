use crate::config::{ColorMode, Config};
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Output settings after folding CLI flags, config and terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// Width of summary rules, never wider than the terminal
    pub width: usize,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorMode>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorMode>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color.unwrap_or(config.output.color) {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        let width = if caps.is_tty {
            config.output.width.min(usize::from(caps.width))
        } else {
            config.output.width
        };

        Self {
            json,
            verbose,
            caps,
            color: color && !json,
            unicode,
            width,
        }
    }
}
