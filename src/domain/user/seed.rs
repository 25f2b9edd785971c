//! Default profile written on first initialization.

use super::{Achievements, CapturedInterests, UserProfile};
use crate::domain::foundation::UserId;

/// Starter profile for a fresh install: no saved pathways, no captured interests.
pub fn default_profile() -> UserProfile {
    UserProfile {
        id: UserId::generate(),
        name: "New Explorer".to_string(),
        email: "explorer@example.com".to_string(),
        captured_interests: CapturedInterests::empty(),
        saved_pathways: Vec::new(),
        achievements: Achievements::default(),
    }
}
