pub mod classify;
pub mod watch;

pub use classify::{classification_json, render_classification};
pub use watch::{render_watch_event, JsonWatchSink, TerminalWatchSink};
