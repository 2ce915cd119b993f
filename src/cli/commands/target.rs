//! Target command handler: one-shot end-sem requirement

use super::render::write_grade_table;
use gradex::core::grades::{point_contribution, Grade};
use gradex::core::models::subject::clamp_internal;
use gradex::core::models::SubjectRecord;
use gradex::core::SubjectOutcome;
use std::io::{self, Write};

/// Print the end-sem requirement for `grade`, or for every grade when `None`
pub fn run(internal: f64, grade: Option<Grade>, credits: u8) -> Result<(), String> {
    let mut out = io::stdout().lock();
    write_target(&mut out, internal, grade, credits).map_err(|e| format!("✗ {e}"))
}

/// Write the target report for the given inputs to `out`
pub fn write_target<W: Write>(
    out: &mut W,
    internal: f64,
    grade: Option<Grade>,
    credits: u8,
) -> io::Result<()> {
    let Some(grade) = grade else {
        let internal = clamp_internal(internal);
        write_grade_table(out, internal)?;
        return writeln!(
            out,
            "Best reachable grade: {}",
            Grade::best_reachable(internal)
        );
    };

    let record = SubjectRecord::new("this subject", internal, grade, credits);
    let outcome = SubjectOutcome::from_record(&record);
    writeln!(out, "{}", outcome.summary())?;
    if outcome.reachable {
        writeln!(
            out,
            "✓ Reachable; worth {:.0} grade points over {} credit(s)",
            point_contribution(grade, record.credits),
            record.credits
        )
    } else {
        writeln!(
            out,
            "✗ Unreachable: the end-sem paper is out of 75. Best reachable grade: {}",
            Grade::best_reachable(record.internal)
        )
    }
}
