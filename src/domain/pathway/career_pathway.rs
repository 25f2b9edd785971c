//! CareerPathway entity and its derived progress aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Course, Difficulty, PathwayError};
use crate::domain::foundation::{CourseId, PathwayId, Percentage, Timestamp, ValidationError};

/// Lifecycle status of a pathway the user follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathwayStatus {
    Active,
    Paused,
    Completed,
}

impl fmt::Display for PathwayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathwayStatus::Active => "active",
            PathwayStatus::Paused => "paused",
            PathwayStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// User-assigned priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Salary range for the pathway's target role. `min <= max` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSalaryRange")]
pub struct SalaryRange {
    min: u32,
    max: u32,
    currency: String,
}

#[derive(Deserialize)]
struct RawSalaryRange {
    min: u32,
    max: u32,
    currency: String,
}

impl TryFrom<RawSalaryRange> for SalaryRange {
    type Error = ValidationError;

    fn try_from(raw: RawSalaryRange) -> Result<Self, Self::Error> {
        SalaryRange::new(raw.min, raw.max, raw.currency)
    }
}

impl SalaryRange {
    pub fn new(min: u32, max: u32, currency: impl Into<String>) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::invalid_format(
                "salary_range",
                format!("min {} exceeds max {}", min, max),
            ));
        }
        Ok(Self {
            min,
            max,
            currency: currency.into(),
        })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// A career pathway: an ordered list of courses leading to a target role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathway {
    pub id: PathwayId,
    pub title: String,
    pub description: String,
    pub target_role: String,
    pub difficulty: Difficulty,
    pub estimated_duration: String,
    pub salary_range: SalaryRange,
    pub required_tech_domains: Vec<String>,
    pub relevant_industries: Vec<String>,
    pub courses: Vec<Course>,
    pub total_courses: usize,
    pub completed_courses: usize,
    pub overall_progress: Percentage,
    pub status: PathwayStatus,
    pub priority: Priority,
    pub created_at: Timestamp,
    pub last_accessed: Timestamp,
}

impl CareerPathway {
    pub fn course(&self, course_id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == course_id)
    }

    /// Sets one course's progress and recomputes the pathway aggregates.
    ///
    /// # Errors
    ///
    /// `PathwayError::CourseNotFound` if the course is not part of this pathway.
    pub fn set_course_progress(
        &mut self,
        course_id: &CourseId,
        progress: Percentage,
    ) -> Result<(), PathwayError> {
        let course = self
            .courses
            .iter_mut()
            .find(|c| &c.id == course_id)
            .ok_or_else(|| PathwayError::course_not_found(self.id.clone(), course_id.clone()))?;
        course.set_progress(progress);
        recompute_aggregates_in_place(self);
        self.last_accessed = Timestamp::now();
        Ok(())
    }

    /// Checks the derived counters against the course list.
    pub fn aggregates_consistent(&self) -> bool {
        self.total_courses == self.courses.len()
            && self.completed_courses == completed_count(&self.courses)
            && self.overall_progress == Percentage::rounded_mean(self.courses.iter().map(|c| c.progress))
            && self.courses.iter().all(|c| c.completed == c.progress.is_complete())
    }
}

/// Recomputes `total_courses`, `completed_courses`, `overall_progress`, and each
/// course's `completed` flag from the course list.
///
/// Every course-level mutation goes through this function.
pub fn recompute_pathway_aggregates(mut pathway: CareerPathway) -> CareerPathway {
    recompute_aggregates_in_place(&mut pathway);
    pathway
}

pub(crate) fn recompute_aggregates_in_place(pathway: &mut CareerPathway) {
    for course in &mut pathway.courses {
        course.completed = course.progress.is_complete();
    }
    pathway.total_courses = pathway.courses.len();
    pathway.completed_courses = completed_count(&pathway.courses);
    pathway.overall_progress = Percentage::rounded_mean(pathway.courses.iter().map(|c| c.progress));
}

fn completed_count(courses: &[Course]) -> usize {
    courses.iter().filter(|c| c.progress.is_complete()).count()
}
