//! Data models for `gradex`

pub mod session;
pub mod subject;

pub use session::Session;
pub use subject::{SubjectEdit, SubjectRecord};
