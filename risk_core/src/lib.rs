#![forbid(unsafe_code)]

//! Core domain model and scoring logic for multi-horizon health-risk
//! assessment.
//!
//! This crate provides:
//! - Domain types (clinical input, features, horizons, tiers, assessments)
//! - Feature engineering and rule-based scoring
//! - 30/60/90-day projection with injectable jitter
//! - Final tier resolution and care-plan lookup
//! - Intake imputation, batch CSV processing, ROI and cohort summaries

pub mod types;
pub mod error;
pub mod bands;
pub mod features;
pub mod scorer;
pub mod horizon;
pub mod tiers;
pub mod engine;
pub mod config;
pub mod logging;
pub mod intake;
pub mod roi;
pub mod catalog;
pub mod batch;
pub mod summary;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use features::derive_features;
pub use scorer::score_probability;
pub use horizon::{project_horizons, FixedJitter, JitterSource, RngJitter, StdJitter};
pub use tiers::resolve_final;
pub use engine::assess;
pub use intake::RawClinicalRecord;
pub use roi::{calculate_roi, RoiEstimate};
pub use catalog::{example_patients, find_example, ExamplePatient};
pub use batch::{assess_csv_path, write_assessments_to_path, AssessedPatient, BatchOutcome};
pub use summary::{summarize, CohortSummary};
