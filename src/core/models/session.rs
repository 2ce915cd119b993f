//! Session model

use crate::core::grades::{evaluate, Evaluation};
use crate::core::models::SubjectRecord;
use serde::{Deserialize, Serialize};

/// A named, saved set of subjects with the SGPA computed when it was saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// User-chosen session name
    pub name: String,

    /// Subjects with their final edited values
    pub subjects: Vec<SubjectRecord>,

    /// SGPA at save time
    pub sgpa: f64,
}

impl Session {
    /// Create a session snapshot
    #[must_use]
    pub const fn new(name: String, subjects: Vec<SubjectRecord>, sgpa: f64) -> Self {
        Self {
            name,
            subjects,
            sgpa,
        }
    }

    /// Total credits across the session's subjects
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.subjects.iter().map(|s| u32::from(s.credits)).sum()
    }

    /// Recompute every subject's target from the stored values
    #[must_use]
    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.subjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grades::Grade;

    #[test]
    fn test_session_json_shape() {
        let session = Session::new(
            "Sem 3".to_string(),
            vec![SubjectRecord::new("OS", 50.0, Grade::A, 4)],
            8.0,
        );
        let json = serde_json::to_value(&session).expect("serialize session");
        assert_eq!(json["name"], "Sem 3");
        assert_eq!(json["sgpa"], 8.0);
        assert_eq!(json["subjects"][0]["Subject"], "OS");
    }

    #[test]
    fn test_total_credits() {
        let session = Session::new(
            "Sem 1".to_string(),
            vec![
                SubjectRecord::new("A", 30.0, Grade::B, 3),
                SubjectRecord::new("B", 30.0, Grade::B, 4),
            ],
            6.0,
        );
        assert_eq!(session.total_credits(), 7);
    }
}
