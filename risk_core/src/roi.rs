//! Intervention economics.
//!
//! Expected benefit of intervening is the avoided future cost weighted by
//! risk; net savings subtract the intervention cost.

use crate::config::EconomicsConfig;
use serde::Serialize;

/// Expected return of intervening on one patient
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoiEstimate {
    pub net_savings: f64,
    pub roi_percent: f64,
}

/// Estimate ROI from a 0-1 risk probability
pub fn calculate_roi(probability: f64, economics: &EconomicsConfig) -> RoiEstimate {
    let risk = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    let benefit = risk * economics.future_cost;

    if benefit <= 0.0 {
        return RoiEstimate {
            net_savings: -economics.intervention_cost,
            roi_percent: -100.0,
        };
    }

    let net_savings = benefit - economics.intervention_cost;
    RoiEstimate {
        net_savings,
        roi_percent: net_savings / benefit * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_default_costs() {
        let estimate = calculate_roi(0.5, &EconomicsConfig::default());

        // benefit 150k, net 130k
        assert!((estimate.net_savings - 130_000.0).abs() < 1e-6);
        assert!((estimate.roi_percent - 86.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_zero_risk_loses_intervention_cost() {
        let estimate = calculate_roi(0.0, &EconomicsConfig::default());
        assert_eq!(estimate.net_savings, -20_000.0);
        assert_eq!(estimate.roi_percent, -100.0);
    }

    #[test]
    fn test_break_even() {
        let economics = EconomicsConfig {
            intervention_cost: 30_000.0,
            future_cost: 300_000.0,
        };
        let estimate = calculate_roi(0.1, &economics);
        assert!(estimate.net_savings.abs() < 1e-6);
        assert!(estimate.roi_percent.abs() < 1e-6);
    }

    #[test]
    fn test_probability_clamped() {
        let economics = EconomicsConfig::default();
        assert_eq!(calculate_roi(1.7, &economics), calculate_roi(1.0, &economics));
        assert_eq!(calculate_roi(-0.3, &economics).roi_percent, -100.0);
    }
}
