//! Application layer.
//!
//! `PathwayService` performs the persisted operations; `state` holds the
//! controllers that observers bind to.

mod pathway_service;
pub mod state;

pub use pathway_service::{PathwayPage, PathwayService, PathwayStats};
