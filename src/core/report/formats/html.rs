//! HTML report generator
//!
//! Produces a single self-contained page with embedded CSS.

use crate::core::error::ReportError;
use crate::core::report::formats::TemplateData;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;

#[derive(Template)]
#[template(path = "session.html")]
struct HtmlTemplate<'a> {
    data: &'a TemplateData,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        let data = TemplateData::from_context(ctx);
        Ok(HtmlTemplate { data: &data }.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grades::Grade;
    use crate::core::models::{Session, SubjectRecord};

    #[test]
    fn test_html_escapes_names() {
        let session = Session::new(
            "<b>Sem</b>".to_string(),
            vec![SubjectRecord::new("R&D", 40.0, Grade::B, 2)],
            6.0,
        );
        let ctx = ReportContext::from_session(&session);
        let out = HtmlReporter::new().render(&ctx).expect("render");

        assert!(out.contains("&lt;b&gt;Sem"));
        assert!(out.contains("R&amp;D"));
        assert!(out.contains("6.00"));
    }

    #[test]
    fn test_html_marks_unreachable_rows() {
        let session = Session::new(
            "Sem 1".to_string(),
            vec![SubjectRecord::new("Maths", 0.0, Grade::O, 4)],
            0.0,
        );
        let ctx = ReportContext::from_session(&session);
        let out = HtmlReporter::new().render(&ctx).expect("render");

        assert!(out.contains("class=\"unreachable\""));
        assert!(out.contains("170.63"));
        assert!(out.contains("Error in desired grade of Maths"));
    }
}
