use crossterm::style::Stylize;

use crate::domain::entities::TestStatus;
use crate::domain::value_objects::ChangeKind;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Pass,
    Fail,
    Skip,
    Warning,
    Info,
    Arrow,
    Package,
    New,
    Changed,
    Unchanged,
    Removed,
    Summary,
    TestFile,
    SourceFile,
    ConfigFile,
    Dependency,
    Watch,
}

impl Icon {
    pub fn for_status(status: TestStatus) -> Self {
        match status {
            TestStatus::Passed => Icon::Pass,
            TestStatus::Failed => Icon::Fail,
            TestStatus::Skipped => Icon::Skip,
        }
    }

    pub fn for_change(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Test => Icon::TestFile,
            ChangeKind::Source => Icon::SourceFile,
            ChangeKind::Config => Icon::ConfigFile,
            ChangeKind::Dependency => Icon::Dependency,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Pass) => theme::icons::PASS,
            (true, Icon::Fail) => theme::icons::FAIL,
            (true, Icon::Skip) => theme::icons::SKIP,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Info) => theme::icons::INFO,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Package) => theme::icons::PACKAGE,
            (true, Icon::New) => theme::icons::NEW,
            (true, Icon::Changed) => theme::icons::CHANGED,
            (true, Icon::Unchanged) => theme::icons::UNCHANGED,
            (true, Icon::Removed) => theme::icons::REMOVED,
            (true, Icon::Summary) => theme::icons::SUMMARY,
            (true, Icon::TestFile) => theme::icons::TEST_FILE,
            (true, Icon::SourceFile) => theme::icons::SOURCE_FILE,
            (true, Icon::ConfigFile) => theme::icons::CONFIG_FILE,
            (true, Icon::Dependency) => theme::icons::DEPENDENCY,
            (true, Icon::Watch) => theme::icons::WATCH,
            (false, Icon::Pass) => theme::icons_ascii::PASS,
            (false, Icon::Fail) => theme::icons_ascii::FAIL,
            (false, Icon::Skip) => theme::icons_ascii::SKIP,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Info) => theme::icons_ascii::INFO,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Package) => theme::icons_ascii::PACKAGE,
            (false, Icon::New) => theme::icons_ascii::NEW,
            (false, Icon::Changed) => theme::icons_ascii::CHANGED,
            (false, Icon::Unchanged) => theme::icons_ascii::UNCHANGED,
            (false, Icon::Removed) => theme::icons_ascii::REMOVED,
            (false, Icon::Summary) => theme::icons_ascii::SUMMARY,
            (false, Icon::TestFile) => theme::icons_ascii::TEST_FILE,
            (false, Icon::SourceFile) => theme::icons_ascii::SOURCE_FILE,
            (false, Icon::ConfigFile) => theme::icons_ascii::CONFIG_FILE,
            (false, Icon::Dependency) => theme::icons_ascii::DEPENDENCY,
            (false, Icon::Watch) => theme::icons_ascii::WATCH,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Pass | Icon::New => theme::colors::SUCCESS,
            Icon::Fail => theme::colors::ERROR,
            Icon::Skip | Icon::Warning | Icon::Changed | Icon::Removed => theme::colors::WARNING,
            Icon::Arrow | Icon::Unchanged => theme::colors::DIM,
            Icon::Info
            | Icon::Package
            | Icon::Summary
            | Icon::Watch
            | Icon::TestFile
            | Icon::SourceFile
            | Icon::ConfigFile
            | Icon::Dependency => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
