//! Session workflow
//!
//! `Workflow` is the working session owned by whatever drives the interaction
//! loop. Derived values are recomputed from scratch on every query, so an edit
//! to one subject is immediately reflected in every target and in the SGPA.
//!
//! ```text
//! NoActiveSession --start--> EditingSubjects --add/edit--> Ready | InvalidTarget
//! Ready --save--> NoActiveSession          any --reset--> NoActiveSession
//! NoActiveSession --load_previous--> EditingSubjects
//! ```

use crate::core::error::{StoreError, WorkflowError};
use crate::core::grades::{evaluate, Evaluation};
use crate::core::models::{Session, SubjectEdit, SubjectRecord};
use crate::core::store::SessionStore;
use crate::{debug, info};

/// Where the working session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    /// Nothing is being edited
    NoActiveSession,
    /// A session is named but has no subjects yet
    EditingSubjects,
    /// Every target is reachable; SGPA is shown and the session can be saved
    Ready,
    /// At least one subject needs more than 75 in the end-term
    InvalidTarget,
}

/// The working session: a name plus the subjects being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    name: Option<String>,
    subjects: Vec<SubjectRecord>,
}

impl Workflow {
    /// Start with no active session
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            subjects: Vec::new(),
        }
    }

    /// Current state, derived from the working subjects
    #[must_use]
    pub fn status(&self) -> WorkflowStatus {
        if self.name.is_none() {
            WorkflowStatus::NoActiveSession
        } else if self.subjects.is_empty() {
            WorkflowStatus::EditingSubjects
        } else if self.evaluation().all_reachable() {
            WorkflowStatus::Ready
        } else {
            WorkflowStatus::InvalidTarget
        }
    }

    /// Active session name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Working subjects in order
    #[must_use]
    pub fn subjects(&self) -> &[SubjectRecord] {
        &self.subjects
    }

    fn require_active(&self) -> Result<&str, WorkflowError> {
        self.name.as_deref().ok_or(WorkflowError::NoActiveSession)
    }

    fn require_inactive(&self) -> Result<(), WorkflowError> {
        match &self.name {
            Some(name) => Err(WorkflowError::SessionActive(name.clone())),
            None => Ok(()),
        }
    }

    /// Name a new session and begin editing it with no subjects
    ///
    /// # Errors
    /// [`WorkflowError::EmptySessionName`] if `name` is blank, or
    /// [`WorkflowError::SessionActive`] if a session is already being edited.
    pub fn start(&mut self, name: &str) -> Result<(), WorkflowError> {
        self.require_inactive()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkflowError::EmptySessionName);
        }
        info!("Started session '{name}'");
        self.name = Some(name.to_string());
        self.subjects.clear();
        Ok(())
    }

    /// Append a subject to the working session
    ///
    /// The subject name is trimmed; marks and credits are expected to be
    /// clamped already (see [`SubjectRecord::new`]).
    ///
    /// # Errors
    /// [`WorkflowError::NoActiveSession`] or [`WorkflowError::EmptySubjectName`].
    pub fn add_subject(&mut self, mut record: SubjectRecord) -> Result<usize, WorkflowError> {
        self.require_active()?;
        record.name = record.name.trim().to_string();
        if record.name.is_empty() {
            return Err(WorkflowError::EmptySubjectName);
        }
        debug!("Added subject '{}'", record.name);
        self.subjects.push(record);
        Ok(self.subjects.len() - 1)
    }

    /// Edit the subject at `index` in place
    ///
    /// # Errors
    /// [`WorkflowError::NoActiveSession`] or [`WorkflowError::SubjectOutOfRange`].
    pub fn edit_subject(&mut self, index: usize, edit: &SubjectEdit) -> Result<(), WorkflowError> {
        self.require_active()?;
        let len = self.subjects.len();
        let subject = self
            .subjects
            .get_mut(index)
            .ok_or(WorkflowError::SubjectOutOfRange { index, len })?;
        subject.apply(edit);
        debug!("Edited subject '{}'", subject.name);
        Ok(())
    }

    /// Targets and SGPA for the current working subjects
    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        evaluate(&self.subjects)
    }

    /// Snapshot the session into `store` and return to no active session
    ///
    /// # Errors
    /// [`WorkflowError::NoActiveSession`], [`WorkflowError::NoSubjects`],
    /// [`WorkflowError::UnreachableTarget`] naming every offending subject, or a
    /// store failure (the working session is kept so nothing is lost).
    pub fn save(&mut self, store: &mut SessionStore) -> Result<Session, WorkflowError> {
        let name = self.require_active()?.to_string();
        if self.subjects.is_empty() {
            return Err(WorkflowError::NoSubjects);
        }
        let evaluation = self.evaluation();
        let Some(sgpa) = evaluation.sgpa() else {
            let names = evaluation
                .unreachable()
                .into_iter()
                .map(str::to_string)
                .collect();
            return Err(WorkflowError::UnreachableTarget(names));
        };

        let session = Session::new(name, self.subjects.clone(), sgpa);
        store.append(session.clone())?;
        self.reset();
        Ok(session)
    }

    /// Start over: drop the working session without saving
    pub fn reset(&mut self) {
        if let Some(name) = self.name.take() {
            debug!("Discarded working session '{name}'");
        }
        self.subjects.clear();
    }

    /// Copy a saved session into the working set and continue editing it
    ///
    /// # Errors
    /// [`WorkflowError::SessionActive`] unless no session is active, or
    /// [`WorkflowError::Store`] for a bad index.
    pub fn load_previous<'s>(
        &mut self,
        store: &'s SessionStore,
        index: usize,
    ) -> Result<&'s Session, WorkflowError> {
        self.require_inactive()?;
        let session = store.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: store.len(),
        })?;
        self.name = Some(session.name.clone());
        self.subjects.clone_from(&session.subjects);
        info!("Loaded session '{}'", session.name);
        Ok(session)
    }
}
