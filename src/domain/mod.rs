//! Domain layer containing entities, value objects, and pure domain logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, scales, errors)
//! - `pathway` - Career pathways, courses, search, and recommendation scoring
//! - `user` - User profile and interest capture

pub mod foundation;
pub mod pathway;
pub mod user;
