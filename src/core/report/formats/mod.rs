//! Report format implementations

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use crate::core::grades::SubjectOutcome;
use crate::core::report::ReportContext;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// Self-contained HTML page
    Html,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// One table row with numbers already formatted for display
#[derive(Debug, Clone)]
pub struct SubjectRow {
    /// Subject name
    pub name: String,
    /// Internal marks, two decimals
    pub internal: String,
    /// Grade label
    pub grade: String,
    /// Credits
    pub credits: u8,
    /// Required end-term score, two decimals
    pub required: String,
    /// Whether the target can be reached
    pub reachable: bool,
    /// Feedback sentence
    pub summary: String,
}

impl From<&SubjectOutcome> for SubjectRow {
    fn from(outcome: &SubjectOutcome) -> Self {
        Self {
            name: outcome.name.clone(),
            internal: format!("{:.2}", outcome.internal),
            grade: outcome.grade.label().to_string(),
            credits: outcome.credits,
            required: format!("{:.2}", outcome.required),
            reachable: outcome.reachable,
            summary: outcome.summary(),
        }
    }
}

/// Values shared by every template
#[derive(Debug, Clone)]
pub struct TemplateData {
    /// Session name
    pub name: String,
    /// Subject rows in order
    pub rows: Vec<SubjectRow>,
    /// Total credits
    pub total_credits: u32,
    /// Formatted SGPA, empty when withheld
    pub sgpa: String,
    /// Subjects blocking the SGPA
    pub unreachable: Vec<String>,
}

impl TemplateData {
    /// Flatten a report context for templating
    #[must_use]
    pub fn from_context(ctx: &ReportContext) -> Self {
        Self {
            name: ctx.name.to_string(),
            rows: ctx.subjects().iter().map(SubjectRow::from).collect(),
            total_credits: ctx.total_credits(),
            sgpa: ctx.sgpa.map(|s| format!("{s:.2}")).unwrap_or_default(),
            unreachable: ctx.unreachable().into_iter().map(str::to_string).collect(),
        }
    }

    /// Whether an SGPA is shown
    #[must_use]
    pub fn has_sgpa(&self) -> bool {
        !self.sgpa.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Html.extension(), "html");
    }
}
