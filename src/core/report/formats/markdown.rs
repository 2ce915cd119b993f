//! Markdown report generator

use crate::core::error::ReportError;
use crate::core::report::formats::TemplateData;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;

#[derive(Template)]
#[template(path = "session.md")]
struct MarkdownTemplate<'a> {
    data: &'a TemplateData,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        let data = TemplateData::from_context(ctx);
        Ok(MarkdownTemplate { data: &data }.render()?)
    }
}
