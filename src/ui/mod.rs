//! Terminal UI
//!
//! - `theme` - colors, icons and rules (the only source of glyphs)
//! - `primitives` - `Icon` and `ColoredText`
//! - `style` - the colorize/icon capability renderers are given
//! - `render` - the incremental test result renderer
//! - `views` - watch and classify output
//! - `output` - config warnings
//! - `terminal`, `context` - capability detection folded with config and CLI flags

pub mod context;
pub mod output;
pub mod primitives;
pub mod render;
pub mod style;
pub mod terminal;
pub mod theme;
pub mod views;

pub use context::UiContext;
pub use render::IncrementalRenderer;
pub use style::{Style, TerminalStyle};
