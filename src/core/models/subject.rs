//! Subject model

use crate::core::grades::{Grade, CREDITS_MAX, CREDITS_MIN, INTERNAL_MAX};
use serde::{Deserialize, Serialize};

/// One subject in a session, as persisted
///
/// Field names match the session file (`Subject`, `Internal`, `Grade`, `Credits`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Subject name (e.g., "Engineering Mathematics")
    #[serde(rename = "Subject")]
    pub name: String,

    /// Internal assessment marks out of 60
    #[serde(rename = "Internal")]
    pub internal: f64,

    /// Desired grade
    #[serde(rename = "Grade")]
    pub grade: Grade,

    /// Credit weight (1-5)
    #[serde(rename = "Credits")]
    pub credits: u8,
}

/// Clamp internal marks into `[0, 60]`; NaN becomes 0
#[must_use]
pub fn clamp_internal(internal: f64) -> f64 {
    if internal.is_nan() {
        0.0
    } else {
        internal.clamp(0.0, INTERNAL_MAX)
    }
}

/// Clamp credits into `[1, 5]`
#[must_use]
pub fn clamp_credits(credits: u8) -> u8 {
    credits.clamp(CREDITS_MIN, CREDITS_MAX)
}

impl SubjectRecord {
    /// Create a subject, clamping marks and credits into range
    ///
    /// # Arguments
    /// * `name` - Subject name
    /// * `internal` - Internal marks, clamped to 0-60
    /// * `grade` - Desired grade
    /// * `credits` - Credits, clamped to 1-5
    #[must_use]
    pub fn new(name: impl Into<String>, internal: f64, grade: Grade, credits: u8) -> Self {
        Self {
            name: name.into(),
            internal: clamp_internal(internal),
            grade,
            credits: clamp_credits(credits),
        }
    }

    /// Apply an edit in place with the same clamps as [`SubjectRecord::new`]
    pub fn apply(&mut self, edit: &SubjectEdit) {
        if let Some(internal) = edit.internal {
            self.internal = clamp_internal(internal);
        }
        if let Some(grade) = edit.grade {
            self.grade = grade;
        }
        if let Some(credits) = edit.credits {
            self.credits = clamp_credits(credits);
        }
    }
}

/// Changes to one subject; `None` leaves a field as is
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubjectEdit {
    /// New internal marks
    pub internal: Option<f64>,
    /// New desired grade
    pub grade: Option<Grade>,
    /// New credits
    pub credits: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_out_of_range_values() {
        let subject = SubjectRecord::new("Physics", 72.5, Grade::A, 9);
        assert!((subject.internal - 60.0).abs() < f64::EPSILON);
        assert_eq!(subject.credits, 5);

        let subject = SubjectRecord::new("Physics", -3.0, Grade::A, 0);
        assert!(subject.internal.abs() < f64::EPSILON);
        assert_eq!(subject.credits, 1);
    }

    #[test]
    fn test_nan_internal_becomes_zero() {
        let subject = SubjectRecord::new("Physics", f64::NAN, Grade::B, 3);
        assert!(subject.internal.abs() < f64::EPSILON);
    }

    #[test]
    fn test_infinite_internal_clamps_to_range() {
        let subject = SubjectRecord::new("Physics", f64::INFINITY, Grade::B, 3);
        assert!((subject.internal - INTERNAL_MAX).abs() < f64::EPSILON);

        let subject = SubjectRecord::new("Physics", f64::NEG_INFINITY, Grade::B, 3);
        assert!(subject.internal.abs() < f64::EPSILON);

        assert!((clamp_internal(1e300) - INTERNAL_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_edit_changes_only_given_fields() {
        let mut subject = SubjectRecord::new("Chemistry", 40.0, Grade::BPlus, 3);
        subject.apply(&SubjectEdit {
            grade: Some(Grade::A),
            ..SubjectEdit::default()
        });
        assert_eq!(subject.grade, Grade::A);
        assert!((subject.internal - 40.0).abs() < f64::EPSILON);
        assert_eq!(subject.credits, 3);

        subject.apply(&SubjectEdit {
            internal: Some(61.0),
            credits: Some(6),
            grade: None,
        });
        assert!((subject.internal - 60.0).abs() < f64::EPSILON);
        assert_eq!(subject.credits, 5);
    }

    #[test]
    fn test_serialized_keys() {
        let subject = SubjectRecord::new("DSA", 45.5, Grade::APlus, 4);
        let json = serde_json::to_value(&subject).expect("serialize subject");
        assert_eq!(json["Subject"], "DSA");
        assert_eq!(json["Internal"], 45.5);
        assert_eq!(json["Grade"], "A+ (9)");
        assert_eq!(json["Credits"], 4);
    }
}
