pub mod completeness;
pub mod duplicate;
pub mod privacy;
pub mod quality;
pub mod spam;
pub mod text;
pub mod word_count;
