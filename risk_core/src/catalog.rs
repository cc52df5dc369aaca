//! Built-in reference patients.
//!
//! A small fixed set of inputs spanning the risk range, used for demos and
//! sanity checks of the scoring tables.

use crate::ClinicalInput;
use once_cell::sync::Lazy;
use serde::Serialize;

/// A named reference patient
#[derive(Clone, Debug, Serialize)]
pub struct ExamplePatient {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub input: ClinicalInput,
}

/// Cached example catalog - built once and reused
static EXAMPLE_PATIENTS: Lazy<Vec<ExamplePatient>> = Lazy::new(build_example_patients);

/// Get a reference to the cached example patients
pub fn example_patients() -> &'static [ExamplePatient] {
    &EXAMPLE_PATIENTS
}

/// Look up an example patient by id
pub fn find_example(id: &str) -> Option<&'static ExamplePatient> {
    example_patients().iter().find(|p| p.id == id)
}

fn build_example_patients() -> Vec<ExamplePatient> {
    vec![
        ExamplePatient {
            id: "mild",
            name: "Mild Risk Patient",
            description: "Young patient with normal glucose and BMI",
            input: ClinicalInput {
                pregnancies: 1,
                glucose: 115.0,
                blood_pressure: 70.0,
                skin_thickness: 20.0,
                insulin: 80.0,
                bmi: 26.0,
                diabetes_pedigree_function: 0.4,
                age: 28.0,
            },
        },
        ExamplePatient {
            id: "high",
            name: "High Risk Patient",
            description: "High glucose and BMI with multiple pregnancies",
            input: ClinicalInput {
                pregnancies: 3,
                glucose: 170.0,
                blood_pressure: 85.0,
                skin_thickness: 32.0,
                insulin: 200.0,
                bmi: 35.0,
                diabetes_pedigree_function: 0.9,
                age: 45.0,
            },
        },
        ExamplePatient {
            id: "low",
            name: "Low Risk Patient",
            description: "Young patient with normal values",
            input: ClinicalInput {
                pregnancies: 0,
                glucose: 90.0,
                blood_pressure: 65.0,
                skin_thickness: 18.0,
                insulin: 60.0,
                bmi: 22.0,
                diabetes_pedigree_function: 0.2,
                age: 25.0,
            },
        },
        ExamplePatient {
            id: "borderline",
            name: "Borderline Risk Patient",
            description: "Older patient with borderline values",
            input: ClinicalInput {
                pregnancies: 2,
                glucose: 130.0,
                blood_pressure: 78.0,
                skin_thickness: 25.0,
                insulin: 100.0,
                bmi: 29.0,
                diabetes_pedigree_function: 0.6,
                age: 60.0,
            },
        },
    ]
}
