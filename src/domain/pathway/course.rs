//! Course entity - a single learning unit inside a pathway.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CourseId, Percentage};

/// Course difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course within a career pathway.
///
/// `completed` is derived from `progress` and kept in sync by [`Course::set_progress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub provider: String,
    pub duration: String,
    pub difficulty: Difficulty,
    pub progress: Percentage,
    pub completed: bool,
}

impl Course {
    /// Creates a course with no progress.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        provider: impl Into<String>,
        duration: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            provider: provider.into(),
            duration: duration.into(),
            difficulty,
            progress: Percentage::ZERO,
            completed: false,
        }
    }

    /// Builder: start the course at a given progress.
    pub fn with_progress(mut self, progress: Percentage) -> Self {
        self.set_progress(progress);
        self
    }

    /// Sets progress and the derived completion flag.
    pub fn set_progress(&mut self, progress: Percentage) {
        self.progress = progress;
        self.completed = progress.is_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course::new(
            CourseId::new("html-basics").unwrap(),
            "HTML Basics",
            "freeCodeCamp",
            "4 weeks",
            Difficulty::Beginner,
        )
    }

    #[test]
    fn new_course_starts_incomplete() {
        let c = course();
        assert_eq!(c.progress, Percentage::ZERO);
        assert!(!c.completed);
    }

    #[test]
    fn set_progress_derives_completed_flag() {
        let mut c = course();
        c.set_progress(Percentage::HUNDRED);
        assert!(c.completed);

        c.set_progress(Percentage::new(99));
        assert!(!c.completed);
    }

    #[test]
    fn course_serializes_camel_case() {
        let json = serde_json::to_value(course().with_progress(Percentage::new(40))).unwrap();
        assert_eq!(json["progress"], 40);
        assert_eq!(json["difficulty"], "Beginner");
        assert_eq!(json["completed"], false);
    }
}
