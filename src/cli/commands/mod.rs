//! CLI command handlers for `gradex`.
//!
//! Each command is implemented in its own submodule; `render` holds the
//! console output shared between them.

pub mod config;
pub mod render;
pub mod sessions;
pub mod shell;
pub mod target;

use gradex::core::{SessionStore, StoreError};
use std::path::Path;

/// Open the session store, explaining what to do with a corrupt file
pub fn open_store(path: &Path) -> Result<SessionStore, String> {
    SessionStore::open(path).map_err(|e| match e {
        StoreError::Corrupt { .. } => format!(
            "✗ {e}\n  Move or repair {} to continue; gradex will not overwrite it.",
            path.display()
        ),
        other => format!("✗ {other}"),
    })
}

/// Convert a 1-based position shown to the user into an index
pub fn to_index(number: usize) -> Result<usize, String> {
    number
        .checked_sub(1)
        .ok_or_else(|| "✗ Numbers start at 1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1), Ok(0));
        assert_eq!(to_index(4), Ok(3));
        assert!(to_index(0).is_err());
    }

    #[test]
    fn test_open_store_reports_corrupt_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{ not json").expect("write");

        let err = open_store(&path).expect_err("corrupt store must not open");
        assert!(err.contains("will not overwrite"));
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "{ not json"
        );
    }
}
