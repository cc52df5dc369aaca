//! Rule-based risk probability.
//!
//! Four independent banded factors contribute a bounded partial score each,
//! plus a capped pedigree term. Contributions are held in integer hundredths
//! so the banded sum is exact before conversion, and the total is snapped to
//! a 1e-9 grid so band lower bounds downstream compare exactly.
//!
//! Only the raw clinical fields are read. The engineered fields on
//! [`FeatureRecord`] stay out of the formula; feeding them in would change
//! every assessment.

use crate::bands::BandTable;
use crate::FeatureRecord;
use serde::Serialize;

/// Glucose (mg/dL) → contribution in hundredths
pub(crate) const GLUCOSE_BANDS: BandTable<u32> =
    BandTable::new(&[(200.0, 40), (140.0, 30), (100.0, 20)], 10);

/// BMI → contribution in hundredths
pub(crate) const BMI_BANDS: BandTable<u32> =
    BandTable::new(&[(35.0, 25), (30.0, 20), (25.0, 15)], 5);

/// Age (years) → contribution in hundredths
pub(crate) const AGE_BANDS: BandTable<u32> =
    BandTable::new(&[(65.0, 20), (45.0, 15), (35.0, 10)], 5);

/// Blood pressure (mmHg) → contribution in hundredths
pub(crate) const BLOOD_PRESSURE_BANDS: BandTable<u32> =
    BandTable::new(&[(140.0, 10), (130.0, 8), (120.0, 5)], 2);

/// Cap on the pedigree term
const PEDIGREE_CAP: f64 = 0.05;

/// Steps per unit of the grid the summed probability is rounded onto
const SCORE_STEPS: f64 = 1e9;

/// Round to the nearest 1/[`SCORE_STEPS`]
fn snap(x: f64) -> f64 {
    (x * SCORE_STEPS).round() / SCORE_STEPS
}

/// Per-factor contributions behind a probability
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub glucose: f64,
    pub bmi: f64,
    pub age: f64,
    pub blood_pressure: f64,
    pub pedigree: f64,
    /// Clamped total in [0, 1]
    pub probability: f64,
}

/// Compute every factor's contribution and the clamped total
pub fn score_breakdown(features: &FeatureRecord) -> ScoreBreakdown {
    let input = features.input();

    let glucose = GLUCOSE_BANDS.lookup(input.glucose);
    let bmi = BMI_BANDS.lookup(input.bmi);
    let age = AGE_BANDS.lookup(input.age);
    let blood_pressure = BLOOD_PRESSURE_BANDS.lookup(input.blood_pressure);
    let pedigree = input.diabetes_pedigree_function.min(PEDIGREE_CAP);

    let banded = (glucose + bmi + age + blood_pressure) as f64 / 100.0;
    // 0.35 + 0.05 is 0.39999999999999997 in f64
    let probability = snap(banded + pedigree).clamp(0.0, 1.0);

    ScoreBreakdown {
        glucose: glucose as f64 / 100.0,
        bmi: bmi as f64 / 100.0,
        age: age as f64 / 100.0,
        blood_pressure: blood_pressure as f64 / 100.0,
        pedigree,
        probability,
    }
}

/// Map a feature record to a risk probability in [0, 1]
pub fn score_probability(features: &FeatureRecord) -> f64 {
    let probability = score_breakdown(features).probability;
    tracing::trace!("Scored base probability {:.4}", probability);
    probability
}
