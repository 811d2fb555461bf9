use std::path::Path;

use crate::domain::services::Classification;
use crate::error::SentinelResult;
use crate::ui::primitives::{Icon, SemanticColor};
use crate::ui::style::Style;

/// One line of `sentinel classify` output
pub fn render_classification(
    path: &Path,
    result: &SentinelResult<Classification>,
    style: &dyn Style,
) -> String {
    match result {
        Ok(classification) => {
            let hash = classification
                .content_hash
                .as_ref()
                .map_or("-", |h| h.short());
            format!(
                "{} {} ({}) {}",
                style.icon(Icon::for_change(classification.kind)),
                path.display(),
                classification.kind.label(),
                style.colorize(hash, SemanticColor::Dim)
            )
        }
        Err(e) => format!(
            "{} {} {}",
            style.icon(Icon::Fail),
            path.display(),
            style.colorize(&e.to_string(), SemanticColor::Error)
        ),
    }
}

/// NDJSON record for `sentinel classify --json`
pub fn classification_json(path: &Path, result: &SentinelResult<Classification>) -> String {
    let value = match result {
        Ok(classification) => serde_json::json!({
            "command": "classify",
            "path": path.display().to_string(),
            "kind": classification.kind,
            "hash": classification.content_hash.as_ref().map(|h| h.as_str()),
        }),
        Err(e) => serde_json::json!({
            "command": "classify",
            "path": path.display().to_string(),
            "error": e.to_string(),
        }),
    };
    value.to_string()
}
