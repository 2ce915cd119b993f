//! Grade engine
//!
//! Maps internal marks and a desired grade to the end-term score needed, and
//! folds subject records into a credit-weighted SGPA. Internal assessment is
//! normalized to a 40-point scale and the end-term paper is marked out of 75.

use crate::core::models::SubjectRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest internal assessment mark
pub const INTERNAL_MAX: f64 = 60.0;
/// Scale internal marks are normalized to by the rubric
pub const INTERNAL_SCALE: f64 = 40.0;
/// Highest achievable end-term score
pub const END_TERM_MAX: f64 = 75.0;
/// Fewest credits a subject can carry
pub const CREDITS_MIN: u8 = 1;
/// Most credits a subject can carry
pub const CREDITS_MAX: u8 = 5;

/// A grade band: label, minimum total out of 100, and grade points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeTier {
    /// Display label, also the persisted form (e.g. `"A+ (9)"`)
    pub label: &'static str,
    /// Minimum total score out of 100 for this grade
    pub min_total: u8,
    /// Grade points awarded (0-10)
    pub points: u8,
}

static TIERS: [GradeTier; 6] = [
    GradeTier {
        label: "O (10)",
        min_total: 91,
        points: 10,
    },
    GradeTier {
        label: "A+ (9)",
        min_total: 81,
        points: 9,
    },
    GradeTier {
        label: "A (8)",
        min_total: 71,
        points: 8,
    },
    GradeTier {
        label: "B+ (7)",
        min_total: 61,
        points: 7,
    },
    GradeTier {
        label: "B (6)",
        min_total: 51,
        points: 6,
    },
    GradeTier {
        label: "RA (0)",
        min_total: 0,
        points: 0,
    },
];

/// The six fixed grades, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Outstanding
    #[serde(rename = "O (10)")]
    O,
    /// Excellent
    #[serde(rename = "A+ (9)")]
    APlus,
    /// Very good
    #[serde(rename = "A (8)")]
    A,
    /// Good
    #[serde(rename = "B+ (7)")]
    BPlus,
    /// Average
    #[serde(rename = "B (6)")]
    B,
    /// Re-appear
    #[serde(rename = "RA (0)")]
    Ra,
}

impl Grade {
    /// Every grade, best first
    pub const ALL: [Self; 6] = [Self::O, Self::APlus, Self::A, Self::BPlus, Self::B, Self::Ra];

    /// The tier backing this grade
    #[must_use]
    pub fn tier(self) -> &'static GradeTier {
        &TIERS[self as usize]
    }

    /// Persisted label, e.g. `"B+ (7)"`
    #[must_use]
    pub fn label(self) -> &'static str {
        self.tier().label
    }

    /// Minimum total out of 100
    #[must_use]
    pub fn min_total(self) -> u8 {
        self.tier().min_total
    }

    /// Grade points
    #[must_use]
    pub fn points(self) -> u8 {
        self.tier().points
    }

    /// Short code accepted on the command line (`O`, `A+`, `A`, `B+`, `B`, `RA`)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::Ra => "RA",
        }
    }

    /// Highest grade still reachable with `internal` marks
    ///
    /// `RA (0)` needs nothing, so there is always an answer.
    #[must_use]
    pub fn best_reachable(internal: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|grade| is_reachable(required_end_term(internal, *grade)))
            .unwrap_or(Self::Ra)
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|grade| {
                grade.label().eq_ignore_ascii_case(wanted)
                    || grade.code().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|g| g.code()).collect();
                format!("Unknown grade: '{s}' (expected one of {})", known.join(", "))
            })
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round half away from zero to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// End-term score (out of 75) needed to reach `grade` with `internal` marks
///
/// Not clamped: a negative result means the grade is already secured, and
/// anything above [`END_TERM_MAX`] is unreachable.
#[must_use]
pub fn required_end_term(internal: f64, grade: Grade) -> f64 {
    let need = f64::from(grade.min_total()) - internal;
    round2(need / INTERNAL_SCALE * END_TERM_MAX)
}

/// Whether a required end-term score can actually be scored
#[must_use]
pub fn is_reachable(required: f64) -> bool {
    required <= END_TERM_MAX
}

/// Grade points weighted by credits
#[must_use]
pub fn point_contribution(grade: Grade, credits: u8) -> f64 {
    f64::from(grade.points()) * f64::from(credits)
}

/// Credit-weighted mean of grade points; `0.0` when there are no credits
///
/// This is the bare formula. Use [`evaluate`] to respect unreachable targets.
#[must_use]
pub fn aggregate_sgpa(records: &[SubjectRecord]) -> f64 {
    let credits: u32 = records.iter().map(|r| u32::from(r.credits)).sum();
    if credits == 0 {
        return 0.0;
    }
    let points: f64 = records
        .iter()
        .map(|r| point_contribution(r.grade, r.credits))
        .sum();
    points / f64::from(credits)
}

/// Derived values for one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOutcome {
    /// Subject name
    pub name: String,
    /// Internal marks out of 60
    pub internal: f64,
    /// Desired grade
    pub grade: Grade,
    /// Credits
    pub credits: u8,
    /// End-term score needed out of 75
    pub required: f64,
    /// `false` when `required` exceeds 75
    pub reachable: bool,
}

impl SubjectOutcome {
    /// Evaluate a single record
    #[must_use]
    pub fn from_record(record: &SubjectRecord) -> Self {
        let required = required_end_term(record.internal, record.grade);
        Self {
            name: record.name.clone(),
            internal: record.internal,
            grade: record.grade,
            credits: record.credits,
            required,
            reachable: is_reachable(required),
        }
    }

    /// One-line feedback for this subject
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "You got {:.2}/60 in {}. You need {:.2}/75 in end-sem to get {}.",
            self.internal, self.name, self.required, self.grade
        )
    }
}

/// Full recompute over a working set of subjects
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Per-subject outcomes, in input order
    pub subjects: Vec<SubjectOutcome>,
    sgpa: f64,
}

impl Evaluation {
    /// Names of subjects whose target cannot be reached
    #[must_use]
    pub fn unreachable(&self) -> Vec<&str> {
        self.subjects
            .iter()
            .filter(|s| !s.reachable)
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Whether every subject's target is reachable
    #[must_use]
    pub fn all_reachable(&self) -> bool {
        self.subjects.iter().all(|s| s.reachable)
    }

    /// SGPA, or `None` while any subject is unreachable
    #[must_use]
    pub fn sgpa(&self) -> Option<f64> {
        self.all_reachable().then_some(self.sgpa)
    }

    /// Total credits across all subjects
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.subjects.iter().map(|s| u32::from(s.credits)).sum()
    }
}

/// Recompute required end-term scores for every subject and the SGPA
#[must_use]
pub fn evaluate(records: &[SubjectRecord]) -> Evaluation {
    Evaluation {
        subjects: records.iter().map(SubjectOutcome::from_record).collect(),
        sgpa: aggregate_sgpa(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, internal: f64, grade: Grade, credits: u8) -> SubjectRecord {
        SubjectRecord::new(name, internal, grade, credits)
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(Grade::O.min_total(), 91);
        assert_eq!(Grade::APlus.points(), 9);
        assert_eq!(Grade::BPlus.label(), "B+ (7)");
        assert_eq!(Grade::Ra.min_total(), 0);
        assert_eq!(Grade::Ra.points(), 0);
    }

    #[test]
    fn test_required_end_term_unreachable_o_grade() {
        let required = required_end_term(0.0, Grade::O);
        assert!((required - 170.63).abs() < 1e-9);
        assert!(!is_reachable(required));
    }

    #[test]
    fn test_required_end_term_already_cleared() {
        let required = required_end_term(60.0, Grade::B);
        assert!((required - (-16.88)).abs() < 1e-9);
        assert!(is_reachable(required));
    }

    #[test]
    fn test_exactly_75_is_reachable() {
        // 71 - 31 = 40 -> 75
        let required = required_end_term(31.0, Grade::A);
        assert!((required - 75.0).abs() < 1e-9);
        assert!(is_reachable(required));
    }

    #[test]
    fn test_aggregate_sgpa_empty_is_zero() {
        assert!(aggregate_sgpa(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_sgpa_weighted() {
        let records = [
            record("Maths", 50.0, Grade::A, 4),
            record("Physics", 50.0, Grade::BPlus, 3),
        ];
        let sgpa = aggregate_sgpa(&records);
        assert!((sgpa - 53.0 / 7.0).abs() < 1e-12);
        assert!((round2(sgpa) - 7.57).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_suppresses_sgpa_when_unreachable() {
        let records = [
            record("Maths", 10.0, Grade::O, 4),
            record("Physics", 55.0, Grade::B, 3),
        ];
        let eval = evaluate(&records);
        assert_eq!(eval.unreachable(), vec!["Maths"]);
        assert!(eval.sgpa().is_none());
        assert_eq!(eval.total_credits(), 7);
    }

    #[test]
    fn test_grade_parse_label_and_code() {
        assert_eq!("A+ (9)".parse::<Grade>(), Ok(Grade::APlus));
        assert_eq!("b+".parse::<Grade>(), Ok(Grade::BPlus));
        assert_eq!("ra".parse::<Grade>(), Ok(Grade::Ra));
        assert!("C".parse::<Grade>().is_err());
    }

    #[test]
    fn test_best_reachable() {
        assert_eq!(Grade::best_reachable(60.0), Grade::O);
        // 0 internal: A needs 133.13, B+ 114.38, B 95.63 -> only RA
        assert_eq!(Grade::best_reachable(0.0), Grade::Ra);
        // 20 internal: B needs 58.13, B+ 76.88
        assert_eq!(Grade::best_reachable(20.0), Grade::B);
    }

    #[test]
    fn test_summary_text() {
        let outcome = SubjectOutcome::from_record(&record("Chemistry", 45.0, Grade::A, 3));
        assert_eq!(
            outcome.summary(),
            "You got 45.00/60 in Chemistry. You need 48.75/75 in end-sem to get A (8)."
        );
    }
}
