//! Console rendering shared by the one-shot commands and the shell

use gradex::core::grades::{required_end_term, Evaluation, Grade, END_TERM_MAX};
use gradex::core::models::Session;
use std::io::{self, Write};

/// Print each subject's end-sem target followed by the SGPA, or the subjects
/// blocking it
pub fn write_evaluation<W: Write>(
    out: &mut W,
    evaluation: &Evaluation,
    sgpa: Option<f64>,
) -> io::Result<()> {
    for (idx, subject) in evaluation.subjects.iter().enumerate() {
        let marker = if subject.reachable { "✓" } else { "✗" };
        writeln!(
            out,
            "  {}. [{marker}] {} ({} credits)",
            idx + 1,
            subject.name,
            subject.credits
        )?;
        writeln!(out, "     {}", subject.summary())?;
    }

    let unreachable = evaluation.unreachable();
    if unreachable.is_empty() {
        if let Some(sgpa) = sgpa {
            writeln!(out, "Estimated SGPA: {sgpa:.2}")?;
        }
    } else {
        for name in unreachable {
            writeln!(out, "✗ Error in desired grade of {name}")?;
        }
    }
    Ok(())
}

/// Print a saved session with its stored SGPA
pub fn write_session<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "=== {} ===", session.name)?;
    let evaluation = session.evaluate();
    write_evaluation(out, &evaluation, Some(session.sgpa))
}

/// Print the numbered list of saved sessions
pub fn write_session_list<W: Write>(out: &mut W, sessions: &[Session]) -> io::Result<()> {
    if sessions.is_empty() {
        return writeln!(out, "No previous sessions yet.");
    }
    for (idx, session) in sessions.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} - {} subject(s), SGPA {:.2}",
            idx + 1,
            session.name,
            session.subjects.len(),
            session.sgpa
        )?;
    }
    Ok(())
}

/// Print the end-sem score needed for every grade
pub fn write_grade_table<W: Write>(out: &mut W, internal: f64) -> io::Result<()> {
    writeln!(out, "Internal: {internal:.2}/60")?;
    for grade in Grade::ALL {
        let required = required_end_term(internal, grade);
        let note = if required > END_TERM_MAX {
            "unreachable"
        } else if required <= 0.0 {
            "already secured"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<7} min {:>3}  needs {:>7.2}/75  {note}",
            grade.label(),
            grade.min_total(),
            required
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradex::core::grades::evaluate;
    use gradex::core::models::SubjectRecord;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to buffer");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_evaluation_shows_sgpa_when_reachable() {
        let records = [
            SubjectRecord::new("Maths", 50.0, Grade::A, 4),
            SubjectRecord::new("Physics", 50.0, Grade::BPlus, 3),
        ];
        let eval = evaluate(&records);
        let out = rendered(|buf| write_evaluation(buf, &eval, eval.sgpa()));
        assert!(out.contains("You need 39.38/75 in end-sem to get A (8)."));
        assert!(out.contains("Estimated SGPA: 7.57"));
    }

    #[test]
    fn test_evaluation_lists_errors_when_unreachable() {
        let records = [SubjectRecord::new("Maths", 0.0, Grade::O, 4)];
        let eval = evaluate(&records);
        let out = rendered(|buf| write_evaluation(buf, &eval, eval.sgpa()));
        assert!(out.contains("✗ Error in desired grade of Maths"));
        assert!(!out.contains("Estimated SGPA"));
    }

    #[test]
    fn test_empty_session_list() {
        let out = rendered(|buf| write_session_list(buf, &[]));
        assert_eq!(out, "No previous sessions yet.\n");
    }

    #[test]
    fn test_grade_table_notes() {
        let out = rendered(|buf| write_grade_table(buf, 60.0));
        assert!(out.contains("RA (0)"));
        assert!(out.contains("already secured"));
        let out = rendered(|buf| write_grade_table(buf, 0.0));
        assert!(out.contains("unreachable"));
    }
}
