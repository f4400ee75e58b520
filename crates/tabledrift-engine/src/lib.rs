//! tabledrift engine
//!
//! The drift differ plus the thin orchestration layer that feeds it from the
//! store collaborators.

pub mod checker;
pub mod differ;

pub use checker::{CheckError, DriftChecker};
pub use differ::compare;
