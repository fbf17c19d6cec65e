pub mod draft;
pub mod extract;
pub mod fields;
pub mod model;

pub use draft::DraftStage;
pub use fields::SubmissionField;
pub use model::{ExistingIdea, Submission};
