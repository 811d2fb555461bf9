use std::collections::BTreeMap;
use std::io::Write;

use chrono::Local;

use crate::application::{BatchOutcome, WatchEvent, WatchSink};
use crate::domain::entities::{RunStats, Suite};
use crate::error::SentinelResult;
use crate::ui::context::UiContext;
use crate::ui::primitives::{Icon, SemanticColor};
use crate::ui::render::IncrementalRenderer;
use crate::ui::style::{Style, TerminalStyle};

/// Lifecycle line for one watch event.
///
/// Change, run-complete and no-run events return `None`: the incremental
/// renderer reports those once per batch.
pub fn render_watch_event(timestamp: &str, event: &WatchEvent, style: &dyn Style) -> Option<String> {
    let prefix = style.colorize(&format!("[{}]", timestamp), SemanticColor::Dim);

    match event {
        WatchEvent::WatchStarted {
            root,
            debounce_ms,
            ignore_patterns,
        } => Some(format!(
            "{} {} Watching: {} {}\n{}\n\n",
            prefix,
            style.icon(Icon::Watch),
            root,
            style.colorize(
                &format!("(debounce {}ms, {} ignore patterns)", debounce_ms, ignore_patterns),
                SemanticColor::Dim
            ),
            style.colorize("Press Ctrl+C to stop", SemanticColor::Dim)
        )),
        WatchEvent::RunStarted { test_paths } => Some(format!(
            "{} {} Running: {}\n\n",
            prefix,
            style.icon(Icon::Info),
            test_paths.join(", ")
        )),
        WatchEvent::RunCancelled => Some(format!(
            "{} {} Run cancelled\n\n",
            prefix,
            style.icon(Icon::Warning)
        )),
        WatchEvent::Error { message } => Some(format!(
            "{} {} Error: {}\n",
            prefix,
            style.icon(Icon::Fail),
            style.colorize(message, SemanticColor::Error)
        )),
        WatchEvent::Shutdown => Some(format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            style.icon(Icon::Watch)
        )),
        WatchEvent::FileChanged { .. }
        | WatchEvent::RunComplete { .. }
        | WatchEvent::NoRunNeeded { .. } => None,
    }
}

/// Human output: lifecycle lines plus the incremental renderer
pub struct TerminalWatchSink<W: Write> {
    renderer: IncrementalRenderer<W>,
    style: TerminalStyle,
}

impl<W: Write> TerminalWatchSink<W> {
    pub fn new(out: W, ui: &UiContext) -> Self {
        Self::with_style(out, TerminalStyle::from_context(ui), ui.width)
    }

    pub fn with_style(out: W, style: TerminalStyle, width: usize) -> Self {
        Self {
            renderer: IncrementalRenderer::new(out, Box::new(style), width),
            style,
        }
    }

    pub fn renderer(&self) -> &IncrementalRenderer<W> {
        &self.renderer
    }

    pub fn into_inner(self) -> W {
        self.renderer.into_inner()
    }
}

impl<W: Write> WatchSink for TerminalWatchSink<W> {
    fn event(&mut self, event: WatchEvent) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let Some(text) = render_watch_event(&timestamp, &event, &self.style) else {
            return;
        };
        let out = self.renderer.get_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write watch event");
        }
    }

    fn batch(
        &mut self,
        outcome: &BatchOutcome,
        suites: &BTreeMap<String, Suite>,
        stats: &RunStats,
    ) -> SentinelResult<()> {
        // Without a run there is nothing new to diff
        let empty = BTreeMap::new();
        let view = if outcome.ran { suites } else { &empty };
        self.renderer.render(view, stats, &outcome.changes)?;
        Ok(())
    }
}

/// NDJSON output, one event per line
pub struct JsonWatchSink<W: Write> {
    out: W,
}

impl<W: Write> JsonWatchSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WatchSink for JsonWatchSink<W> {
    fn event(&mut self, event: WatchEvent) {
        if let Err(e) = writeln!(self.out, "{}", event.to_json()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write watch event");
        }
    }
}
