//! Session store
//!
//! Saved sessions live in a single pretty-printed JSON array. Every mutation
//! rewrites the whole file: the new content goes to a sibling temporary file
//! which is then renamed over the store, so readers see either the old or the
//! new list.
//!
//! There is no locking. Two processes writing the same store will lose one
//! another's changes (last rewrite wins).

use crate::core::error::{StoreError, StoreResult};
use crate::core::models::Session;
use crate::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read every saved session from `path`
///
/// A missing file is an empty store.
///
/// # Errors
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Corrupt`] if it is not a JSON list of sessions. A corrupt file
/// is never modified.
pub fn load_all(path: &Path) -> StoreResult<Vec<Session>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No session store at {}; starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| {
        debug!("Session store {} is not valid: {source}", path.display());
        StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Encode sessions as JSON indented by four spaces
fn to_pretty_json(sessions: &[Session]) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    sessions.serialize(&mut ser).map_err(StoreError::Serialize)?;
    Ok(buf)
}

/// Sibling temporary path used while rewriting `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| "sessions.json".into(), std::ffi::OsStr::to_os_string);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the store at `path` with `sessions`
///
/// # Errors
/// Returns [`StoreError::Io`] if the directory, temporary file or final
/// rename fails.
pub fn save_all(path: &Path, sessions: &[Session]) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let bytes = to_pretty_json(sessions)?;
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    debug!("Wrote {} session(s) to {}", sessions.len(), path.display());
    Ok(())
}

/// In-memory session list bound to its backing file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    sessions: Vec<Session>,
}

impl SessionStore {
    /// Load the store at `path`
    ///
    /// # Errors
    /// Propagates [`load_all`] failures; a corrupt store is not opened.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let sessions = load_all(&path)?;
        info!(
            "Opened session store {} ({} session(s))",
            path.display(),
            sessions.len()
        );
        Ok(Self { path, sessions })
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved sessions in order
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Session at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    /// Number of saved sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are saved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Rewrite the backing file from memory
    ///
    /// # Errors
    /// See [`save_all`].
    pub fn save_all(&self) -> StoreResult<()> {
        save_all(&self.path, &self.sessions)
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index < self.sessions.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.sessions.len(),
            })
        }
    }

    /// Append `session` and persist
    ///
    /// # Errors
    /// See [`save_all`]. The in-memory list is rolled back on failure.
    pub fn append(&mut self, session: Session) -> StoreResult<()> {
        let name = session.name.clone();
        self.sessions.push(session);
        if let Err(e) = self.save_all() {
            self.sessions.pop();
            return Err(e);
        }
        info!("Saved session '{name}'");
        Ok(())
    }

    /// Rename the session at `index` and persist; subjects and SGPA are kept
    ///
    /// `new_name` is trimmed.
    ///
    /// # Errors
    /// [`StoreError::EmptyName`] for a blank name,
    /// [`StoreError::IndexOutOfRange`] for a bad index, or a write failure
    /// (after which the old name is restored in memory).
    pub fn rename(&mut self, index: usize, new_name: &str) -> StoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        self.check_index(index)?;

        let old_name = std::mem::replace(&mut self.sessions[index].name, new_name.to_string());
        if let Err(e) = self.save_all() {
            self.sessions[index].name = old_name;
            return Err(e);
        }
        info!("Renamed session '{old_name}' to '{new_name}'");
        Ok(())
    }

    /// Remove the session at `index`, persist, and return it
    ///
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] for a bad index, or a write failure
    /// (after which the session is reinserted in memory).
    pub fn delete(&mut self, index: usize) -> StoreResult<Session> {
        self.check_index(index)?;

        let removed = self.sessions.remove(index);
        if let Err(e) = self.save_all() {
            self.sessions.insert(index, removed);
            return Err(e);
        }
        info!("Deleted session '{}'", removed.name);
        Ok(removed)
    }
}
