use crossterm::style::Color;

/// Design tokens for the Sentinel terminal UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and rules must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    // Test outcomes.
    pub const PASS: &str = "✓";
    pub const FAIL: &str = "✗";
    pub const SKIP: &str = "○";

    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "ℹ";
    pub const ARROW: &str = "→";

    // Suite diff markers.
    pub const PACKAGE: &str = "📦";
    pub const NEW: &str = "✚";
    pub const CHANGED: &str = "Δ";
    pub const UNCHANGED: &str = "·";
    pub const REMOVED: &str = "−";
    pub const SUMMARY: &str = "Σ";

    // Change kinds.
    pub const TEST_FILE: &str = "🧪";
    pub const SOURCE_FILE: &str = "📝";
    pub const CONFIG_FILE: &str = "⚙";
    pub const DEPENDENCY: &str = "🔗";

    pub const WATCH: &str = "⟳";
}

pub mod icons_ascii {
    pub const PASS: &str = "[OK]";
    pub const FAIL: &str = "[FAIL]";
    pub const SKIP: &str = "[SKIP]";

    pub const WARNING: &str = "[WARN]";
    pub const INFO: &str = "[i]";
    pub const ARROW: &str = "->";

    pub const PACKAGE: &str = "[PKG]";
    pub const NEW: &str = "[NEW]";
    pub const CHANGED: &str = "[CHG]";
    pub const UNCHANGED: &str = "[=]";
    pub const REMOVED: &str = "[DEL]";
    pub const SUMMARY: &str = "[SUM]";

    pub const TEST_FILE: &str = "[T]";
    pub const SOURCE_FILE: &str = "[S]";
    pub const CONFIG_FILE: &str = "[C]";
    pub const DEPENDENCY: &str = "[D]";

    pub const WATCH: &str = "[~]";
}

pub mod rules {
    pub const HORIZONTAL: &str = "─";
}

pub mod rules_ascii {
    pub const HORIZONTAL: &str = "-";
}
