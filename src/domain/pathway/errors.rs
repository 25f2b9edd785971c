//! Pathway service error types.

use thiserror::Error;

use crate::domain::foundation::{CourseId, ErrorCode, PathwayId, ValidationError};

/// Typed error surfaced by every pathway and profile operation.
///
/// Each variant maps to a machine-readable [`ErrorCode`] and an HTTP-like
/// status number used for UI messaging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathwayError {
    #[error("User profile not found")]
    ProfileNotFound,

    #[error("Pathway not found: {0}")]
    PathwayNotFound(PathwayId),

    #[error("Course {course_id} not found in pathway {pathway_id}")]
    CourseNotFound {
        pathway_id: PathwayId,
        course_id: CourseId,
    },

    #[error("Pathway already saved: {0}")]
    AlreadySaved(PathwayId),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Storage or serialization failure, tagged with the failing operation's code.
    #[error("{message}")]
    Storage { code: ErrorCode, message: String },
}

impl PathwayError {
    pub fn pathway_not_found(id: PathwayId) -> Self {
        PathwayError::PathwayNotFound(id)
    }

    pub fn course_not_found(pathway_id: PathwayId, course_id: CourseId) -> Self {
        PathwayError::CourseNotFound {
            pathway_id,
            course_id,
        }
    }

    pub fn already_saved(id: PathwayId) -> Self {
        PathwayError::AlreadySaved(id)
    }

    pub fn storage(code: ErrorCode, message: impl Into<String>) -> Self {
        PathwayError::Storage {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PathwayError::ProfileNotFound => ErrorCode::ProfileNotFound,
            PathwayError::PathwayNotFound(_) => ErrorCode::PathwayNotFound,
            PathwayError::CourseNotFound { .. } => ErrorCode::CourseNotFound,
            PathwayError::AlreadySaved(_) => ErrorCode::AlreadySaved,
            PathwayError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            PathwayError::Storage { code, .. } => *code,
        }
    }

    pub fn status(&self) -> u16 {
        self.code().status()
    }

    /// Message suitable for an inline banner.
    pub fn user_message(&self) -> String {
        match self {
            PathwayError::ProfileNotFound => {
                "We couldn't find your profile. Complete the interest survey to create one."
                    .to_string()
            }
            PathwayError::PathwayNotFound(_) => "This pathway is no longer available.".to_string(),
            PathwayError::CourseNotFound { .. } => "This course is no longer available.".to_string(),
            PathwayError::AlreadySaved(_) => "This pathway is already saved.".to_string(),
            PathwayError::ValidationFailed(err) => err.to_string(),
            PathwayError::Storage { code, .. } => match code {
                ErrorCode::FetchError => "Failed to load data. Please try again.".to_string(),
                ErrorCode::SaveError => "Failed to save pathway. Please try again.".to_string(),
                ErrorCode::RemoveError => "Failed to remove pathway. Please try again.".to_string(),
                ErrorCode::UpdateError => "Failed to save changes. Please try again.".to_string(),
                ErrorCode::SearchError => "Search failed. Please try again.".to_string(),
                _ => GENERIC_ERROR_MESSAGE.to_string(),
            },
        }
    }
}

/// Fallback message when an error carries nothing displayable.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
