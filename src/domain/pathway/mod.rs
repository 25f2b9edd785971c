//! Pathway module - career pathways, their courses, and the pure functions
//! that search, rank, and keep their progress aggregates consistent.
//!
//! # Domain Invariants
//!
//! 1. `overall_progress == round(mean(course.progress))`, 0 with no courses
//! 2. `completed_courses == count(course.progress >= 100)`
//! 3. `course.completed == (course.progress >= 100)`
//! 4. `salary_range.min <= salary_range.max`
//!
//! Invariants 1-3 are restored by [`recompute_pathway_aggregates`], which every
//! course-level mutation calls.

mod catalog;
pub mod career_pathway;
mod course;
mod errors;
pub mod recommendation;
pub mod search;

pub use catalog::default_catalog;
pub use career_pathway::{
    recompute_pathway_aggregates, CareerPathway, PathwayStatus, Priority, SalaryRange,
};
pub use course::{Course, Difficulty};
pub use errors::{PathwayError, GENERIC_ERROR_MESSAGE};
pub use recommendation::{recommend, score_pathway, RecommendationPolicy, ScoredPathway};
pub use search::{matches_query, search, PathwayFilters};
