//! biomechqa-common: shared types and errors used across all biomechqa crates.

pub mod error;
pub mod entities;
pub mod topic;

// Re-export commonly used types
pub use entities::{QaResult, QuestionRequest, TopicOption};
pub use error::{QaError, Result};
pub use topic::Topic;
