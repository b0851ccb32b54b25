//! atlas-planner core
//!
//! Scores Moroccan points of interest against a traveler's preferences and
//! packs them into day-by-day route variants.

pub mod traits;
pub mod error;
pub mod params;
pub mod place;
pub mod plan;
pub mod scoring;
pub mod solver;
pub mod signals;
pub mod signals_client;
pub mod haversine;
pub mod cities;
pub mod polyline;
pub mod summary;

pub use error::{OptionsError, PlannerError, Result, ValidationError};
pub use params::{Budget, Locale, Pace, PlannerParams};
pub use place::{Footprint, Poi};
pub use plan::{PlanDay, PlanDayItem, PlanLeg, PlanVariant, PlanWarning, VariantLabel};
pub use solver::{build_plan, build_plan_with, plan_batch, PlanRequest, PlannerOptions};
pub use signals::Signals;
