//! Property-based tests for the grade engine.

use gradex::core::grades::{
    aggregate_sgpa, evaluate, is_reachable, required_end_term, round2, Grade, END_TERM_MAX,
    INTERNAL_MAX,
};
use gradex::core::models::SubjectRecord;
use proptest::prelude::*;

fn grade() -> impl Strategy<Value = Grade> {
    prop::sample::select(Grade::ALL.to_vec())
}

fn record() -> impl Strategy<Value = SubjectRecord> {
    ("[A-Za-z ]{1,12}", 0.0f64..=60.0, grade(), 1u8..=5)
        .prop_map(|(name, internal, grade, credits)| {
            SubjectRecord::new(name, internal, grade, credits)
        })
}

proptest! {
    /// The requirement follows the rubric formula to within rounding.
    #[test]
    fn requirement_matches_formula(internal in 0.0f64..=60.0, grade in grade()) {
        let exact = (f64::from(grade.min_total()) - internal) / 40.0 * 75.0;
        let required = required_end_term(internal, grade);
        prop_assert!((required - exact).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(required, round2(required));
    }

    /// More internal marks never raise the requirement.
    #[test]
    fn requirement_falls_as_internal_rises(
        a in 0.0f64..=60.0,
        b in 0.0f64..=60.0,
        grade in grade(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(required_end_term(high, grade) <= required_end_term(low, grade));
    }

    /// A better grade never needs a lower end-term score.
    #[test]
    fn better_grades_need_more(internal in 0.0f64..=60.0) {
        for pair in Grade::ALL.windows(2) {
            prop_assert!(
                required_end_term(internal, pair[0]) >= required_end_term(internal, pair[1])
            );
        }
    }

    /// The best reachable grade is reachable and the next better one is not.
    #[test]
    fn best_reachable_is_tight(internal in 0.0f64..=60.0) {
        let best = Grade::best_reachable(internal);
        prop_assert!(is_reachable(required_end_term(internal, best)));
        if let Some(pos) = Grade::ALL.iter().position(|g| *g == best) {
            if pos > 0 {
                let better = Grade::ALL[pos - 1];
                prop_assert!(required_end_term(internal, better) > END_TERM_MAX);
            }
        }
    }

    /// Construction clamps any input into range.
    #[test]
    fn subject_inputs_are_clamped(internal in proptest::num::f64::ANY, credits in any::<u8>()) {
        let record = SubjectRecord::new("Any", internal, Grade::B, credits);
        prop_assert!((0.0..=INTERNAL_MAX).contains(&record.internal));
        prop_assert!((1..=5).contains(&record.credits));
    }

    /// SGPA is a weighted mean of points, so it stays within 0-10.
    #[test]
    fn sgpa_stays_in_point_range(records in prop::collection::vec(record(), 0..8)) {
        let sgpa = aggregate_sgpa(&records);
        prop_assert!((0.0..=10.0).contains(&sgpa));
        if records.is_empty() {
            prop_assert_eq!(sgpa, 0.0);
        }
    }

    /// SGPA is withheld exactly when some subject is unreachable.
    #[test]
    fn sgpa_withheld_iff_unreachable(records in prop::collection::vec(record(), 1..8)) {
        let eval = evaluate(&records);
        let any_unreachable = eval.subjects.iter().any(|s| s.required > END_TERM_MAX);
        prop_assert_eq!(eval.sgpa().is_none(), any_unreachable);
        prop_assert_eq!(eval.unreachable().is_empty(), !any_unreachable);
    }

    /// Evaluation is a pure function of its input.
    #[test]
    fn evaluation_is_deterministic(records in prop::collection::vec(record(), 0..6)) {
        prop_assert_eq!(evaluate(&records), evaluate(&records));
    }
}
