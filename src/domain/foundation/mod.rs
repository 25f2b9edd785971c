//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the career pathways domain.

mod errors;
mod ids;
mod interest_scale;
mod percentage;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{CourseId, PathwayId, UserId};
pub use interest_scale::{InterestRating, InterestWeight};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
