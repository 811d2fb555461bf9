use std::path::{Path, PathBuf};

use anyhow::Result;

use sentinel::config::{ColorMode, Config};
use sentinel::domain::services::ChangeClassifier;
use sentinel::ui::views::{classification_json, render_classification};
use sentinel::ui::{TerminalStyle, UiContext};

/// Exits non-zero when any path could not be hashed.
pub fn cmd_classify(
    root: &Path,
    paths: &[PathBuf],
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let (config, _warnings) = Config::discover(root)?;
    let ui = UiContext::new(json, verbose, color, &config);
    let style = TerminalStyle::from_context(&ui);
    let classifier = ChangeClassifier::new(config.classifier_rules());

    let mut failures = 0usize;
    for path in paths {
        let result = classifier.inspect(path, true);
        if result.is_err() {
            failures += 1;
        }

        if json {
            println!("{}", classification_json(path, &result));
        } else {
            println!("{}", render_classification(path, &result, &style));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} paths could not be classified", failures, paths.len());
    }
    Ok(())
}
