//! Test fixtures for atlas-planner.
//!
//! Provides real Moroccan points of interest and request builders.

pub mod morocco_places;

pub use morocco_places::*;
