use clap::{Args, Parser, Subcommand};
use risk_core::batch::write_assessments;
use risk_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskscore")]
#[command(about = "Multi-horizon health-risk scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single patient
    Assess {
        #[command(flatten)]
        patient: PatientArgs,

        #[command(flatten)]
        jitter: JitterArgs,

        /// Keep zero readings instead of substituting configured defaults
        #[arg(long)]
        no_impute: bool,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assess the built-in example patients
    Examples {
        /// Only assess the example with this id (mild, high, low, borderline)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        jitter: JitterArgs,

        /// Print the assessments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assess every record in a CSV file
    Batch {
        /// Input CSV with one patient per row
        #[arg(long)]
        input: PathBuf,

        /// Write per-patient results to this CSV (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        jitter: JitterArgs,
    },
}

#[derive(Args)]
struct PatientArgs {
    #[arg(long, default_value_t = 0)]
    pregnancies: u32,

    /// Plasma glucose (mg/dL)
    #[arg(long, default_value_t = 0.0)]
    glucose: f64,

    /// Diastolic blood pressure (mmHg)
    #[arg(long, default_value_t = 0.0)]
    blood_pressure: f64,

    /// Triceps skin-fold thickness (mm)
    #[arg(long, default_value_t = 0.0)]
    skin_thickness: f64,

    /// Serum insulin (µU/mL)
    #[arg(long, default_value_t = 0.0)]
    insulin: f64,

    #[arg(long)]
    bmi: f64,

    #[arg(long, default_value_t = 0.0)]
    diabetes_pedigree: f64,

    /// Age in years
    #[arg(long)]
    age: f64,
}

impl PatientArgs {
    fn to_raw(&self) -> RawClinicalRecord {
        RawClinicalRecord {
            pregnancies: self.pregnancies,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            bmi: self.bmi,
            diabetes_pedigree_function: self.diabetes_pedigree,
            age: self.age,
        }
    }
}

#[derive(Args)]
struct JitterArgs {
    /// Seed for horizon jitter (overrides the config seed)
    #[arg(long, conflicts_with = "no_jitter")]
    seed: Option<u64>,

    /// Project every horizon with a multiplier of exactly 1.0
    #[arg(long)]
    no_jitter: bool,
}

/// Jitter chosen from flags and config: no-jitter, then flag seed, then
/// config seed, then entropy
enum Jitter {
    Fixed(FixedJitter),
    Random(StdJitter),
}

impl JitterSource for Jitter {
    fn multiplier(&mut self, horizon: Horizon) -> f64 {
        match self {
            Jitter::Fixed(j) => j.multiplier(horizon),
            Jitter::Random(j) => j.multiplier(horizon),
        }
    }
}

impl JitterArgs {
    fn resolve(&self, config: &Config) -> Jitter {
        if self.no_jitter {
            return Jitter::Fixed(FixedJitter(1.0));
        }
        match self.seed.or(config.jitter.seed) {
            Some(seed) => {
                tracing::debug!("Using jitter seed {}", seed);
                Jitter::Random(StdJitter::seeded(seed))
            }
            None => Jitter::Random(StdJitter::from_entropy()),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    risk_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Assess {
            patient,
            jitter,
            no_impute,
            json,
        } => cmd_assess(&patient, &jitter, no_impute, json, &config),
        Commands::Examples { id, jitter, json } => cmd_examples(id, &jitter, json, &config),
        Commands::Batch {
            input,
            output,
            jitter,
        } => cmd_batch(input, output, &jitter, &config),
    }
}

fn cmd_assess(
    patient: &PatientArgs,
    jitter: &JitterArgs,
    no_impute: bool,
    json: bool,
    config: &Config,
) -> Result<()> {
    let raw = patient.to_raw();
    let input = if no_impute {
        raw.as_input()
    } else {
        raw.impute(&config.intake)
    };

    let assessment = assess(input, jitter.resolve(config))?;
    let roi = calculate_roi(assessment.base_probability, &config.economics);

    if json {
        let value = serde_json::json!({
            "input": input,
            "assessment": assessment,
            "roi": roi,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        display_assessment("RISK ASSESSMENT", &assessment, &roi);
    }

    Ok(())
}

fn cmd_examples(
    id: Option<String>,
    jitter: &JitterArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let patients: Vec<&ExamplePatient> = match id {
        Some(ref id) => vec![find_example(id)
            .ok_or_else(|| Error::UnknownExample(id.clone()))?],
        None => example_patients().iter().collect(),
    };

    // One source for the whole run so a seed reproduces every example
    let mut jitter = jitter.resolve(config);
    let mut results = Vec::with_capacity(patients.len());
    for patient in patients {
        let assessment = assess(patient.input, &mut jitter)?;
        let roi = calculate_roi(assessment.base_probability, &config.economics);
        results.push((patient, assessment, roi));
    }

    if json {
        let value: Vec<_> = results
            .iter()
            .map(|(patient, assessment, roi)| {
                serde_json::json!({
                    "patient": patient,
                    "assessment": assessment,
                    "roi": roi,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (patient, assessment, roi) in &results {
            println!("\n  {} ({})", patient.name, patient.id);
            println!("  {}", patient.description);
            display_assessment(&patient.id.to_uppercase(), assessment, roi);
        }
    }

    Ok(())
}

fn cmd_batch(
    input: PathBuf,
    output: Option<PathBuf>,
    jitter: &JitterArgs,
    config: &Config,
) -> Result<()> {
    let outcome = assess_csv_path(&input, config, jitter.resolve(config))?;

    match output {
        Some(ref path) => {
            write_assessments_to_path(path, &outcome.assessed)?;
            println!(
                "✓ Wrote {} assessments to {}",
                outcome.assessed.len(),
                path.display()
            );
        }
        None => write_assessments(std::io::stdout().lock(), &outcome.assessed)?,
    }

    let summary = summarize(outcome.assessed.iter().map(|p| (p.age, &p.assessment)));
    display_summary(&summary, outcome.skipped.len());

    Ok(())
}

fn display_assessment(title: &str, assessment: &RiskAssessment, roi: &RoiEstimate) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Base probability: {:.2}", assessment.base_probability);
    println!();

    for result in assessment.horizons.iter() {
        println!(
            "  → {:>2}-day: {:>6.2}%  (tier {})",
            result.horizon.days(),
            result.probability_pct,
            result.tier
        );
    }

    println!();
    println!(
        "  Final score: {:.1} → Tier {} ({})",
        assessment.final_score, assessment.final_tier, assessment.risk_category
    );
    println!("  Care plan: {}", assessment.care_plan);
    println!(
        "  ℹ Intervention ROI: net savings {:.0}, {:.1}%",
        roi.net_savings, roi.roi_percent
    );
    println!();
}

fn display_summary(summary: &CohortSummary, skipped: usize) {
    // Summary goes to stderr so CSV on stdout stays clean
    eprintln!("\n─────────────────────────────────────────");
    eprintln!("  Patients assessed: {}", summary.total);
    if skipped > 0 {
        eprintln!("  Records skipped:   {}", skipped);
    }
    for tier in RiskTier::ALL {
        eprintln!(
            "  Tier {} {:<10} {:>4}  ({:.1}%)",
            tier,
            tier.category(),
            summary.count(tier),
            summary.share_pct(tier)
        );
    }
    eprintln!("  High risk (tier ≥ 4): {}", summary.high_risk);
    eprintln!("  Mean final score:     {:.2}", summary.mean_final_score);
    eprintln!(
        "  By age: <35 {:.2} | 35-54 {:.2} | 55+ {:.2}",
        summary.mean_score_young, summary.mean_score_middle, summary.mean_score_senior
    );
}
