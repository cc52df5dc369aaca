//! Feature engineering over validated clinical input.
//!
//! Derived fields are part of the record contract but the scorer does not
//! read them; see `scorer.rs`.

use crate::{ClinicalInput, Error, FeatureRecord, Result};

/// Allowed domain for a clinical field
#[derive(Clone, Copy)]
enum Domain {
    Positive,
    NonNegative,
}

/// Reject non-finite or out-of-domain values before any arithmetic
pub fn validate(input: &ClinicalInput) -> Result<()> {
    let checks: [(&'static str, f64, Domain); 7] = [
        ("glucose", input.glucose, Domain::Positive),
        ("blood_pressure", input.blood_pressure, Domain::Positive),
        ("skin_thickness", input.skin_thickness, Domain::NonNegative),
        ("insulin", input.insulin, Domain::NonNegative),
        ("bmi", input.bmi, Domain::Positive),
        (
            "diabetes_pedigree_function",
            input.diabetes_pedigree_function,
            Domain::NonNegative,
        ),
        ("age", input.age, Domain::Positive),
    ];

    for (field, value, domain) in checks {
        if !value.is_finite() {
            return Err(Error::InvalidInput {
                field,
                value,
                reason: "must be finite",
            });
        }
        match domain {
            Domain::Positive if value <= 0.0 => {
                return Err(Error::InvalidInput {
                    field,
                    value,
                    reason: "must be positive",
                });
            }
            Domain::NonNegative if value < 0.0 => {
                return Err(Error::InvalidInput {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Derive the engineered feature record from clinical input
pub fn derive_features(input: ClinicalInput) -> Result<FeatureRecord> {
    validate(&input)?;

    let total_risk_score = [
        input.glucose > 140.0,
        input.bmi > 30.0,
        input.age > 45.0,
        input.blood_pressure > 80.0,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count() as u8;

    Ok(FeatureRecord {
        bmi_glucose: input.bmi * input.glucose,
        age_bmi: input.age * input.bmi,
        // +1 keeps the ratio defined for zero insulin
        glucose_insulin_ratio: input.glucose / (input.insulin + 1.0),
        glucose_sq: input.glucose.powi(2),
        bmi_exp: (input.bmi / 10.0).exp(),
        insulin_log: input.insulin.ln_1p(),
        total_risk_score,
        input,
    })
}
