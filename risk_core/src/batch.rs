//! Batch assessment over CSV patient records.
//!
//! Input rows carry the raw clinical columns and an optional `patient_id`.
//! Rows that cannot be parsed or are rejected by the engine are skipped and
//! logged. Only errors outside a single record (I/O) abort the batch.

use crate::config::Config;
use crate::engine::assess;
use crate::horizon::JitterSource;
use crate::intake::RawClinicalRecord;
use crate::roi::{calculate_roi, RoiEstimate};
use crate::{Horizon, Result, RiskAssessment};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One input row
#[derive(Debug, Deserialize)]
struct CsvInputRow {
    #[serde(default)]
    patient_id: Option<String>,
    pregnancies: u32,
    glucose: f64,
    blood_pressure: f64,
    skin_thickness: f64,
    insulin: f64,
    bmi: f64,
    diabetes_pedigree_function: f64,
    age: f64,
}

/// A raw record tagged with its patient identifier
#[derive(Clone, Debug, PartialEq)]
pub struct PatientRecord {
    pub patient_id: String,
    pub raw: RawClinicalRecord,
}

impl CsvInputRow {
    fn into_record(self, row_number: usize) -> PatientRecord {
        let patient_id = self
            .patient_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("row-{}", row_number));

        PatientRecord {
            patient_id,
            raw: RawClinicalRecord {
                pregnancies: self.pregnancies,
                glucose: self.glucose,
                blood_pressure: self.blood_pressure,
                skin_thickness: self.skin_thickness,
                insulin: self.insulin,
                bmi: self.bmi,
                diabetes_pedigree_function: self.diabetes_pedigree_function,
                age: self.age,
            },
        }
    }
}

/// A successfully assessed patient
#[derive(Clone, Debug, Serialize)]
pub struct AssessedPatient {
    pub patient_id: String,
    pub age: f64,
    pub assessment: RiskAssessment,
    pub roi: RoiEstimate,
}

/// A record that produced no assessment
#[derive(Clone, Debug, Serialize)]
pub struct SkippedRecord {
    pub patient_id: String,
    pub reason: String,
}

/// Result of a batch run
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub assessed: Vec<AssessedPatient>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchOutcome {
    fn skip(&mut self, patient_id: String, reason: String) {
        tracing::warn!("Skipping record {}: {}", patient_id, reason);
        self.skipped.push(SkippedRecord { patient_id, reason });
    }

    fn assess_one<J: JitterSource>(
        &mut self,
        record: PatientRecord,
        config: &Config,
        jitter: J,
    ) -> Result<()> {
        let input = record.raw.impute(&config.intake);

        match assess(input, jitter) {
            Ok(assessment) => {
                let roi = calculate_roi(assessment.base_probability, &config.economics);
                self.assessed.push(AssessedPatient {
                    patient_id: record.patient_id,
                    age: input.age,
                    assessment,
                    roi,
                });
            }
            Err(e) if e.is_record_level() => self.skip(record.patient_id, e.to_string()),
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

/// Impute and assess each record in order, drawing jitter from one shared source
pub fn assess_records<I, J>(records: I, config: &Config, mut jitter: J) -> Result<BatchOutcome>
where
    I: IntoIterator<Item = PatientRecord>,
    J: JitterSource,
{
    let mut outcome = BatchOutcome::default();
    for record in records {
        outcome.assess_one(record, config, &mut jitter)?;
    }
    Ok(outcome)
}

/// Read CSV rows from `reader` and assess them.
///
/// Malformed rows are skipped; I/O failures abort with an error.
pub fn assess_csv<R, J>(reader: R, config: &Config, mut jitter: J) -> Result<BatchOutcome>
where
    R: Read,
    J: JitterSource,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut outcome = BatchOutcome::default();

    for (index, row) in csv_reader.deserialize::<CsvInputRow>().enumerate() {
        let row_number = index + 1;
        match row {
            Ok(row) => outcome.assess_one(row.into_record(row_number), config, &mut jitter)?,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => outcome.skip(format!("row-{}", row_number), e.to_string()),
        }
    }

    tracing::info!(
        "Batch complete: {} assessed, {} skipped",
        outcome.assessed.len(),
        outcome.skipped.len()
    );

    Ok(outcome)
}

/// Assess a CSV file on disk
pub fn assess_csv_path<J: JitterSource>(
    path: &Path,
    config: &Config,
    jitter: J,
) -> Result<BatchOutcome> {
    let file = File::open(path)?;
    tracing::info!("Reading patient records from {:?}", path);
    assess_csv(file, config, jitter)
}

/// A row in the CSV output
#[derive(Debug, Serialize)]
struct CsvOutputRow<'a> {
    patient_id: &'a str,
    p30: f64,
    tier30: u8,
    p60: f64,
    tier60: u8,
    p90: f64,
    tier90: u8,
    final_score: f64,
    final_tier: u8,
    risk_category: &'a str,
    care_plan: &'a str,
    net_savings: f64,
    roi_percent: f64,
}

impl<'a> From<&'a AssessedPatient> for CsvOutputRow<'a> {
    fn from(patient: &'a AssessedPatient) -> Self {
        let horizons = &patient.assessment.horizons;
        CsvOutputRow {
            patient_id: &patient.patient_id,
            p30: horizons.get(Horizon::Days30).probability_pct,
            tier30: horizons.tier(Horizon::Days30).level(),
            p60: horizons.get(Horizon::Days60).probability_pct,
            tier60: horizons.tier(Horizon::Days60).level(),
            p90: horizons.get(Horizon::Days90).probability_pct,
            tier90: horizons.tier(Horizon::Days90).level(),
            final_score: patient.assessment.final_score,
            final_tier: patient.assessment.final_tier.level(),
            risk_category: patient.assessment.risk_category,
            care_plan: patient.assessment.care_plan,
            net_savings: patient.roi.net_savings,
            roi_percent: patient.roi.roi_percent,
        }
    }
}

/// Write assessed patients as CSV rows with a header
pub fn write_assessments<W: Write>(writer: W, patients: &[AssessedPatient]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for patient in patients {
        writer.serialize(CsvOutputRow::from(patient))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write assessed patients to a CSV file, replacing any existing file
pub fn write_assessments_to_path(path: &Path, patients: &[AssessedPatient]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_assessments(&file, patients)?;
    file.sync_all()?;

    tracing::info!("Wrote {} assessments to {:?}", patients.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizon::{FixedJitter, StdJitter};
    use crate::RiskTier;

    const HEADER: &str =
        "patient_id,pregnancies,glucose,blood_pressure,skin_thickness,insulin,bmi,diabetes_pedigree_function,age";

    fn csv_input(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_assess_csv_rows() {
        let input = csv_input(&[
            "p-1,1,115,70,20,80,26.0,0.4,28",
            "p-2,0,117,0,0,0,33.8,0.932,44",
        ]);

        let outcome = assess_csv(input.as_bytes(), &Config::default(), FixedJitter(1.0)).unwrap();

        assert_eq!(outcome.assessed.len(), 2);
        assert!(outcome.skipped.is_empty());

        let first = &outcome.assessed[0];
        assert_eq!(first.patient_id, "p-1");
        assert_eq!(first.age, 28.0);
        assert_eq!(first.assessment.final_tier, RiskTier::Medium);

        // Zero blood pressure imputed to 80 → lowest bp band still
        let second = &outcome.assessed[1];
        assert_eq!(second.patient_id, "p-2");
        // 0.20 + 0.20 + 0.10 + 0.02 + 0.05
        assert!((second.assessment.base_probability - 0.57).abs() < 1e-12);
    }

    #[test]
    fn test_missing_patient_id_column() {
        let input = "pregnancies,glucose,blood_pressure,skin_thickness,insulin,bmi,diabetes_pedigree_function,age\n\
                     1,115,70,20,80,26.0,0.4,28\n";

        let outcome = assess_csv(input.as_bytes(), &Config::default(), FixedJitter(1.0)).unwrap();

        assert_eq!(outcome.assessed.len(), 1);
        assert_eq!(outcome.assessed[0].patient_id, "row-1");
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let input = csv_input(&[
            "ok,1,115,70,20,80,26.0,0.4,28",
            "unparseable,1,abc,70,20,80,26.0,0.4,28",
            "bad-bmi,1,115,70,20,80,0,0.4,28",
            "also-ok,2,130,78,25,100,29.0,0.6,60",
        ]);

        let outcome = assess_csv(input.as_bytes(), &Config::default(), FixedJitter(1.0)).unwrap();

        let assessed: Vec<_> = outcome.assessed.iter().map(|p| p.patient_id.as_str()).collect();
        assert_eq!(assessed, vec!["ok", "also-ok"]);

        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].patient_id, "row-2");
        assert_eq!(outcome.skipped[1].patient_id, "bad-bmi");
        assert!(outcome.skipped[1].reason.contains("bmi"));
    }

    #[test]
    fn test_seeded_batch_reproducible() {
        let input = csv_input(&[
            "a,1,115,70,20,80,26.0,0.4,28",
            "b,3,170,85,32,200,35.0,0.9,45",
            "c,2,130,78,25,100,29.0,0.6,60",
        ]);

        let run = || {
            assess_csv(input.as_bytes(), &Config::default(), StdJitter::seeded(11))
                .unwrap()
                .assessed
                .into_iter()
                .map(|p| p.assessment)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_assess_records_includes_roi() {
        let record = PatientRecord {
            patient_id: "x".into(),
            raw: RawClinicalRecord {
                pregnancies: 1,
                glucose: 115.0,
                blood_pressure: 70.0,
                skin_thickness: 20.0,
                insulin: 80.0,
                bmi: 26.0,
                diabetes_pedigree_function: 0.4,
                age: 28.0,
            },
        };

        let outcome = assess_records(vec![record], &Config::default(), FixedJitter(1.0)).unwrap();
        let roi = outcome.assessed[0].roi;

        // benefit = 0.47 * 300k = 141k
        assert!((roi.net_savings - 121_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_records_are_skipped_not_fatal() {
        let record = |id: &str, bmi: f64| PatientRecord {
            patient_id: id.into(),
            raw: RawClinicalRecord {
                pregnancies: 1,
                glucose: 115.0,
                blood_pressure: 70.0,
                skin_thickness: 20.0,
                insulin: 80.0,
                bmi,
                diabetes_pedigree_function: 0.4,
                age: 28.0,
            },
        };

        let outcome = assess_records(
            vec![record("nan", f64::NAN), record("ok", 26.0), record("neg", -1.0)],
            &Config::default(),
            FixedJitter(1.0),
        )
        .unwrap();

        assert_eq!(outcome.assessed.len(), 1);
        assert_eq!(outcome.assessed[0].patient_id, "ok");
        let skipped: Vec<_> = outcome.skipped.iter().map(|s| s.patient_id.as_str()).collect();
        assert_eq!(skipped, vec!["nan", "neg"]);
    }

    #[test]
    fn test_read_failure_aborts_batch() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }

        let err = assess_csv(FailingReader, &Config::default(), FixedJitter(1.0)).unwrap_err();
        assert!(!err.is_record_level());
    }

    #[test]
    fn test_write_assessments_csv() {
        let input = csv_input(&["p-1,1,115,70,20,80,26.0,0.4,28"]);
        let outcome = assess_csv(input.as_bytes(), &Config::default(), FixedJitter(1.0)).unwrap();

        let mut buffer = Vec::new();
        write_assessments(&mut buffer, &outcome.assessed).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "patient_id,p30,tier30,p60,tier60,p90,tier90,final_score,final_tier,risk_category,care_plan,net_savings,roi_percent"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("p-1,47.0,3,47.0,3,47.0,3,3.0,3,Medium,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_assessments_to_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("assessments.csv");

        let input = csv_input(&[
            "a,1,115,70,20,80,26.0,0.4,28",
            "b,3,170,85,32,200,35.0,0.9,45",
        ]);
        let outcome = assess_csv(input.as_bytes(), &Config::default(), FixedJitter(1.0)).unwrap();
        write_assessments_to_path(&path, &outcome.assessed).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }
}
