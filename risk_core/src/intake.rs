//! Raw record intake.
//!
//! Source datasets record missing glucose, blood pressure, skin thickness and
//! insulin as zero. Those are replaced with configured substitutes before the
//! record reaches the engine.

use crate::config::IntakeConfig;
use crate::ClinicalInput;
use serde::{Deserialize, Serialize};

/// A clinical record as found in source data, zeros meaning "not measured"
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawClinicalRecord {
    pub pregnancies: u32,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

fn or_default(value: f64, default: f64) -> f64 {
    if value == 0.0 {
        default
    } else {
        value
    }
}

impl RawClinicalRecord {
    /// Take the record as-is, zeros included
    pub fn as_input(&self) -> ClinicalInput {
        ClinicalInput {
            pregnancies: self.pregnancies,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            bmi: self.bmi,
            diabetes_pedigree_function: self.diabetes_pedigree_function,
            age: self.age,
        }
    }

    /// Substitute zero readings. Other fields pass through and are validated
    /// later by feature derivation.
    pub fn impute(&self, defaults: &IntakeConfig) -> ClinicalInput {
        ClinicalInput {
            glucose: or_default(self.glucose, defaults.glucose),
            blood_pressure: or_default(self.blood_pressure, defaults.blood_pressure),
            skin_thickness: or_default(self.skin_thickness, defaults.skin_thickness),
            insulin: or_default(self.insulin, defaults.insulin),
            ..self.as_input()
        }
    }
}
