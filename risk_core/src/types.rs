//! Core domain types for the risk scoring engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Clinical inputs and the engineered feature record
//! - Forecast horizons and risk tiers
//! - Per-horizon results and the final assessment

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Clinical Input
// ============================================================================

/// A patient's clinical measurements, after upstream default substitution
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInput {
    pub pregnancies: u32,
    /// mg/dL
    pub glucose: f64,
    /// mmHg
    pub blood_pressure: f64,
    /// mm
    pub skin_thickness: f64,
    /// µU/mL
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    /// years
    pub age: f64,
}

// ============================================================================
// Feature Record
// ============================================================================

/// Clinical input extended with engineered features.
///
/// Only [`crate::features::derive_features`] can build one, so every record
/// has passed validation and its derived fields agree with its inputs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(flatten)]
    pub(crate) input: ClinicalInput,
    pub(crate) bmi_glucose: f64,
    pub(crate) age_bmi: f64,
    pub(crate) glucose_insulin_ratio: f64,
    pub(crate) glucose_sq: f64,
    pub(crate) bmi_exp: f64,
    pub(crate) insulin_log: f64,
    pub(crate) total_risk_score: u8,
}

impl FeatureRecord {
    pub fn input(&self) -> &ClinicalInput {
        &self.input
    }

    pub fn bmi_glucose(&self) -> f64 {
        self.bmi_glucose
    }

    pub fn age_bmi(&self) -> f64 {
        self.age_bmi
    }

    pub fn glucose_insulin_ratio(&self) -> f64 {
        self.glucose_insulin_ratio
    }

    pub fn glucose_sq(&self) -> f64 {
        self.glucose_sq
    }

    pub fn bmi_exp(&self) -> f64 {
        self.bmi_exp
    }

    pub fn insulin_log(&self) -> f64 {
        self.insulin_log
    }

    /// Number of classic risk flags raised (0-4)
    pub fn total_risk_score(&self) -> u8 {
        self.total_risk_score
    }
}

// ============================================================================
// Horizons and Tiers
// ============================================================================

/// Forward-looking forecast window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Days30,
    Days60,
    Days90,
}

impl Horizon {
    /// All horizons, nearest first
    pub const ALL: [Horizon; 3] = [Horizon::Days30, Horizon::Days60, Horizon::Days90];

    pub fn days(self) -> u32 {
        match self {
            Horizon::Days30 => 30,
            Horizon::Days60 => 60,
            Horizon::Days90 => 90,
        }
    }

    /// Inclusive multiplier range applied to the base probability.
    /// Widens with distance to model growing forecast uncertainty.
    pub fn jitter_range(self) -> (f64, f64) {
        match self {
            Horizon::Days30 => (0.9, 1.1),
            Horizon::Days60 => (0.8, 1.2),
            Horizon::Days90 => (0.7, 1.3),
        }
    }

    /// Weight of this horizon's tier in the final score
    pub(crate) fn weight_tenths(self) -> u32 {
        match self {
            Horizon::Days30 => 5,
            Horizon::Days60 => 3,
            Horizon::Days90 => 2,
        }
    }

    fn index(self) -> usize {
        match self {
            Horizon::Days30 => 0,
            Horizon::Days60 => 1,
            Horizon::Days90 => 2,
        }
    }
}

/// Ordinal risk bucket, 1 (lowest) to 5 (highest)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskTier {
    VeryLow = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    VeryHigh = 5,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::VeryLow,
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::VeryHigh,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Display label for the tier
    pub fn category(self) -> &'static str {
        TIER_PROFILES[self as usize - 1].0
    }

    /// Care-plan recommendation for the tier
    pub fn care_plan(self) -> &'static str {
        TIER_PROFILES[self as usize - 1].1
    }
}

/// (category, care plan), indexed by tier level - 1
const TIER_PROFILES: [(&str, &str); 5] = [
    ("Very Low", "Education only, self-service resources"),
    ("Low", "Preventive nudges, annual visit scheduling"),
    ("Medium", "Digital coaching, quarterly check-ins, PCP scheduling"),
    (
        "High",
        "Care manager within 7 days, pharmacist review, follow-up monthly",
    ),
    (
        "Very High",
        "Immediate RN outreach, care manager assignment, intensive monitoring",
    ),
];

impl TryFrom<u8> for RiskTier {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            1 => Ok(RiskTier::VeryLow),
            2 => Ok(RiskTier::Low),
            3 => Ok(RiskTier::Medium),
            4 => Ok(RiskTier::High),
            5 => Ok(RiskTier::VeryHigh),
            other => Err(Error::InvalidTier(other)),
        }
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> u8 {
        tier.level()
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level())
    }
}

// ============================================================================
// Results
// ============================================================================

/// Projection for a single horizon
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HorizonResult {
    pub horizon: Horizon,
    /// Probability as a percentage (0-100), rounded to 2 decimals
    pub probability_pct: f64,
    pub tier: RiskTier,
}

/// All three horizon projections, nearest first
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HorizonProjection(pub(crate) [HorizonResult; 3]);

impl HorizonProjection {
    pub fn get(&self, horizon: Horizon) -> &HorizonResult {
        &self.0[horizon.index()]
    }

    pub fn tier(&self, horizon: Horizon) -> RiskTier {
        self.get(horizon).tier
    }

    pub fn iter(&self) -> impl Iterator<Item = &HorizonResult> {
        self.0.iter()
    }
}

/// Horizon-weighted headline classification
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalResolution {
    pub final_score: f64,
    pub final_tier: RiskTier,
    pub risk_category: &'static str,
    pub care_plan: &'static str,
}

/// Complete output of one assessment call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Unjittered probability from the scorer (0-1)
    pub base_probability: f64,
    pub horizons: HorizonProjection,
    pub final_score: f64,
    pub final_tier: RiskTier,
    pub risk_category: &'static str,
    pub care_plan: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_try_from_rejects_out_of_range() {
        assert!(matches!(RiskTier::try_from(0), Err(Error::InvalidTier(0))));
        assert!(matches!(RiskTier::try_from(6), Err(Error::InvalidTier(6))));
        assert_eq!(RiskTier::try_from(4).unwrap(), RiskTier::High);
    }

    #[test]
    fn test_every_tier_has_label_and_care_plan() {
        for tier in RiskTier::ALL {
            assert!(!tier.category().is_empty());
            assert!(!tier.care_plan().is_empty());
            assert_eq!(RiskTier::try_from(tier.level()).unwrap(), tier);
        }
    }

    #[test]
    fn test_tier_serializes_as_number() {
        let json = serde_json::to_string(&RiskTier::Medium).unwrap();
        assert_eq!(json, "3");

        let parsed: RiskTier = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, RiskTier::VeryHigh);
        assert!(serde_json::from_str::<RiskTier>("9").is_err());
    }

    #[test]
    fn test_horizon_weights_sum_to_one() {
        let total: u32 = Horizon::ALL.iter().map(|h| h.weight_tenths()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_jitter_widens_with_horizon() {
        let widths: Vec<f64> = Horizon::ALL
            .iter()
            .map(|h| {
                let (lo, hi) = h.jitter_range();
                hi - lo
            })
            .collect();
        assert!(widths[0] < widths[1] && widths[1] < widths[2]);
    }
}
