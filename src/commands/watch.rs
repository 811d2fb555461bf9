use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use sentinel::application::{ResultCache, StalenessResolver, WatchOptions, WatchUseCase};
use sentinel::config::{ColorMode, Config};
use sentinel::domain::ports::CancelToken;
use sentinel::domain::services::ChangeClassifier;
use sentinel::infrastructure::GoTestExecutor;
use sentinel::ui::output::render_config_warnings;
use sentinel::ui::views::{JsonWatchSink, TerminalWatchSink};
use sentinel::ui::{TerminalStyle, UiContext};

pub fn cmd_watch(
    root: &Path,
    debounce_ms: Option<u64>,
    no_run_on_start: bool,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot watch {}", root.display()))?;

    // Load configuration: project > user > defaults, then SENTINEL_* env
    let (config, warnings) = Config::discover(&root)?;
    let ui = UiContext::new(json, verbose, color, &config);
    if !json {
        eprint!(
            "{}",
            render_config_warnings(&warnings, &TerminalStyle::from_context(&ui))
        );
    }
    for w in &warnings {
        tracing::warn!(key = %w.key, file = %w.file.display(), "unknown config key");
    }

    let cache = Arc::new(ResultCache::new(
        root.clone(),
        ChangeClassifier::new(config.classifier_rules()),
    ));
    let executor = Arc::new(GoTestExecutor::new(
        root.clone(),
        config.runner.command.clone(),
        config.runner.args.clone(),
    ));
    let resolver = Arc::new(StalenessResolver::new(cache, executor));

    // CLI flags > config
    let options = WatchOptions::new(root)
        .with_debounce(Duration::from_millis(
            debounce_ms.unwrap_or(config.watch.debounce_ms),
        ))
        .with_ignore(config.watch.ignore.clone())
        .with_run_on_start(config.watch.run_on_start && !no_run_on_start)
        .with_json(json);

    // Ctrl+C stops the loop and kills an in-flight run
    let running = Arc::new(AtomicBool::new(true));
    let cancel = CancelToken::new();
    {
        let running = running.clone();
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            cancel.cancel();
        })
        .context("failed to set Ctrl+C handler")?;
    }

    let use_case = WatchUseCase::new(options, resolver);
    if json {
        let mut sink = JsonWatchSink::new(io::stdout());
        use_case.start(running, &cancel, &mut sink)?;
    } else {
        let mut sink = TerminalWatchSink::new(io::stdout(), &ui);
        use_case.start(running, &cancel, &mut sink)?;
    }

    Ok(())
}
