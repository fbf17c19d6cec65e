//! Validation and scoring of startup-idea submissions.
//!
//! A submission passes through independent checks (completeness, spam,
//! privacy, duplicate, quality, word counts, category policy) that
//! [`validator::SubmissionValidator`] composes into a single
//! [`validator::ValidationResult`]. Findings are data, never errors.

pub mod audit;
pub mod checks;
pub mod config;
pub mod determinism;
pub mod patterns;
pub mod submission;
pub mod validator;

pub mod error;

pub use config::ValidatorConfig;
pub use submission::{DraftStage, ExistingIdea, Submission, SubmissionField};
pub use validator::{SubmissionValidator, ValidationResult};
