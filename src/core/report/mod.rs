//! Session report export
//!
//! Renders a saved (or in-progress) session as Markdown or HTML: each
//! subject's required end-term score and whether it is reachable, followed by
//! the SGPA or the reason it is withheld.

pub mod formats;

use crate::core::error::ReportError;
use crate::core::grades::{Evaluation, SubjectOutcome};
use crate::core::models::Session;
use crate::core::workflow::Workflow;
use crate::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Session name
    pub name: &'a str,
    /// Per-subject targets
    pub evaluation: Evaluation,
    /// SGPA to print; `None` while any target is unreachable
    pub sgpa: Option<f64>,
}

impl<'a> ReportContext<'a> {
    /// Context for a saved session, using the SGPA recorded at save time
    #[must_use]
    pub fn from_session(session: &'a Session) -> Self {
        let evaluation = session.evaluate();
        let sgpa = evaluation.all_reachable().then_some(session.sgpa);
        Self {
            name: &session.name,
            evaluation,
            sgpa,
        }
    }

    /// Context for the working session, or `None` if no session is active
    #[must_use]
    pub fn from_workflow(workflow: &'a Workflow) -> Option<Self> {
        let name = workflow.name()?;
        let evaluation = workflow.evaluation();
        let sgpa = evaluation.sgpa();
        Some(Self {
            name,
            evaluation,
            sgpa,
        })
    }

    /// Per-subject outcomes
    #[must_use]
    pub fn subjects(&self) -> &[SubjectOutcome] {
        &self.evaluation.subjects
    }

    /// Names of subjects whose target is out of reach
    #[must_use]
    pub fn unreachable(&self) -> Vec<&str> {
        self.evaluation.unreachable()
    }

    /// Total credits
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.evaluation.total_credits()
    }

    /// File name stem derived from the session name
    ///
    /// Letters and digits in any script are kept (lowercased); everything else
    /// becomes `_`. Different names can share a stem, see [`write_report`].
    #[must_use]
    pub fn file_stem(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for c in self.name.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else {
                slug.push('_');
            }
        }
        let slug = slug.trim_matches('_');
        if slug.is_empty() {
            "session".to_string()
        } else {
            slug.to_string()
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let content = self.render(ctx)?;
        fs::write(output_path, content).map_err(|source| ReportError::Io {
            path: output_path.to_path_buf(),
            source,
        })
    }
}

/// Render `ctx` in `format`
///
/// # Errors
/// Returns an error if template rendering fails
pub fn render(ctx: &ReportContext, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Markdown => MarkdownReporter::new().render(ctx),
        ReportFormat::Html => HtmlReporter::new().render(ctx),
    }
}

/// Marker every template writes near the top, followed by the session name
const OWNER_MARKER: &str = "<!-- gradex session:";

/// The marker line of a rendered report
fn owner_line(content: &str) -> Option<&str> {
    content
        .lines()
        .find(|line| line.trim_start().starts_with(OWNER_MARKER))
}

/// Whether `path` can take a report whose marker line is `owner`
///
/// A missing file is free. An existing file is only reused when it is a report
/// for the same session; anything else (another session's report, a file that
/// is not ours, or one we cannot read) is left alone.
fn can_write(path: &Path, owner: Option<&str>) -> bool {
    match fs::read_to_string(path) {
        Ok(existing) => owner.is_some() && owner_line(&existing) == owner,
        Err(e) => e.kind() == ErrorKind::NotFound,
    }
}

/// Write a report for `ctx` into `dir` as `<session-slug>.<ext>`
///
/// Exporting the same session again replaces its report. When the name is
/// taken by another session's report, `_2`, `_3`, ... is appended to the stem
/// until a free (or same-session) file is found. The directory is created if
/// needed.
///
/// # Errors
/// Returns an error if the directory cannot be created or the report cannot be
/// rendered or written
pub fn write_report(
    ctx: &ReportContext,
    format: ReportFormat,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let content = render(ctx, format)?;
    let owner = owner_line(&content);
    let stem = ctx.file_stem();
    let mut attempt = 1_usize;
    let path = loop {
        let candidate = if attempt == 1 {
            dir.join(format!("{stem}.{}", format.extension()))
        } else {
            dir.join(format!("{stem}_{attempt}.{}", format.extension()))
        };
        if can_write(&candidate, owner) {
            break candidate;
        }
        debug!(
            "{} belongs to another report; trying the next name",
            candidate.display()
        );
        attempt += 1;
    };

    fs::write(&path, &content).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {format} report to {}", path.display());
    Ok(path)
}
