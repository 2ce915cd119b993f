//! Core domain: grade engine, models, session store, workflow and reports

pub mod error;
pub mod grades;
pub mod models;
pub mod report;
pub mod store;
pub mod workflow;

pub use error::{ReportError, StoreError, WorkflowError};
pub use grades::{evaluate, Evaluation, Grade, GradeTier, SubjectOutcome};
pub use models::{Session, SubjectEdit, SubjectRecord};
pub use store::SessionStore;
pub use workflow::{Workflow, WorkflowStatus};
