//! Strongly-typed identifier value objects.
//!
//! Pathway and course identifiers are human-readable slugs (`"frontend-developer"`),
//! so all identifiers here wrap a non-empty string rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a career pathway.
    PathwayId,
    "pathway_id"
);

string_id!(
    /// Identifier of a course within a pathway.
    CourseId,
    "course_id"
);

string_id!(
    /// Identifier of the local user profile.
    UserId,
    "user_id"
);

impl UserId {
    /// Generates a fresh random user id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
