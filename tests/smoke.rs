//! Integration smoke tests for `gradex`

use gradex::core::grades::{required_end_term, Grade};
use gradex::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn best_case_target() {
    assert!((required_end_term(45.0, Grade::A) - 48.75).abs() < 1e-9);
}
