//! User module - the local user's profile and captured interests.
//!
//! # Domain Invariants
//!
//! 1. `saved_pathways` holds unique identifiers
//! 2. A domain-level rating never coexists with a subdomain rating for the same domain
//! 3. Interest weights stay within 0-4; wizard ratings within 0-3

pub mod interest;
pub mod profile;
mod seed;

pub use interest::{InterestCapture, InterestTarget, InterestType, UserInterest};
pub use profile::{Achievements, CapturedInterests, ProfileUpdate, UserProfile};
pub use seed::default_profile;
