//! Cohort-level aggregates over finished assessments.

use crate::{RiskAssessment, RiskTier};
use serde::Serialize;

/// Age bands used for the mean-score breakdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Under 35
    Young,
    /// 35 to under 55
    Middle,
    /// 55 and over
    Senior,
}

impl AgeBand {
    pub fn of(age: f64) -> Self {
        if age < 35.0 {
            AgeBand::Young
        } else if age < 55.0 {
            AgeBand::Middle
        } else {
            AgeBand::Senior
        }
    }
}

/// Distribution and averages for a set of assessments
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CohortSummary {
    pub total: usize,
    /// Count per final tier, index 0 = tier 1
    pub tier_counts: [usize; 5],
    /// Patients at tier 4 or above
    pub high_risk: usize,
    pub mean_final_score: f64,
    pub mean_score_young: f64,
    pub mean_score_middle: f64,
    pub mean_score_senior: f64,
}

impl CohortSummary {
    pub fn count(&self, tier: RiskTier) -> usize {
        self.tier_counts[tier.level() as usize - 1]
    }

    /// Share of the cohort at `tier`, as a percentage
    pub fn share_pct(&self, tier: RiskTier) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(tier) as f64 / self.total as f64 * 100.0
        }
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Summarize `(age, assessment)` pairs. Empty groups report a mean of 0.
pub fn summarize<'a, I>(patients: I) -> CohortSummary
where
    I: IntoIterator<Item = (f64, &'a RiskAssessment)>,
{
    let mut summary = CohortSummary::default();
    let mut score_sum = 0.0;
    // (sum, count) per age band
    let mut young = (0.0, 0);
    let mut middle = (0.0, 0);
    let mut senior = (0.0, 0);

    for (age, assessment) in patients {
        summary.total += 1;
        summary.tier_counts[assessment.final_tier.level() as usize - 1] += 1;
        if assessment.final_tier >= RiskTier::High {
            summary.high_risk += 1;
        }
        score_sum += assessment.final_score;

        let band = match AgeBand::of(age) {
            AgeBand::Young => &mut young,
            AgeBand::Middle => &mut middle,
            AgeBand::Senior => &mut senior,
        };
        band.0 += assessment.final_score;
        band.1 += 1;
    }

    summary.mean_final_score = mean(score_sum, summary.total);
    summary.mean_score_young = mean(young.0, young.1);
    summary.mean_score_middle = mean(middle.0, middle.1);
    summary.mean_score_senior = mean(senior.0, senior.1);
    summary
}
