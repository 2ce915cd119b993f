//! Shared library for `gradex`
//! Grade engine, session store and workflow used by the CLI

pub mod core;
pub mod logger;
pub mod shared;

pub use shared::*;
