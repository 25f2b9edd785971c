//! Career Pathways - data layer for a career-pathway explorer
//!
//! This crate persists the local user's profile, saved pathways, and the
//! pathway catalog behind a key-value store port, and exposes observable
//! controllers with optimistic updates over that service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
