//! Multi-horizon projection of a base probability.
//!
//! Each horizon scales the base probability by a multiplier drawn from its
//! jitter range. The draw comes from an injected [`JitterSource`] so callers
//! control reproducibility; nothing here touches global entropy.

use crate::bands::BandTable;
use crate::{Horizon, HorizonProjection, HorizonResult, RiskTier};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability (0-1) → tier
pub(crate) const PROBABILITY_TIERS: BandTable<RiskTier> = BandTable::new(
    &[
        (0.80, RiskTier::VeryHigh),
        (0.60, RiskTier::High),
        (0.40, RiskTier::Medium),
        (0.20, RiskTier::Low),
    ],
    RiskTier::VeryLow,
);

/// Supplies the multiplicative jitter for each horizon
pub trait JitterSource {
    fn multiplier(&mut self, horizon: Horizon) -> f64;
}

impl<J: JitterSource + ?Sized> JitterSource for &mut J {
    fn multiplier(&mut self, horizon: Horizon) -> f64 {
        (**self).multiplier(horizon)
    }
}

/// Uniform draws over each horizon's jitter range from any `rand` RNG
#[derive(Debug)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// Jitter backed by the standard seedable RNG
pub type StdJitter = RngJitter<StdRng>;

impl StdJitter {
    /// Reproducible jitter: the same seed yields the same draws
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible jitter seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn multiplier(&mut self, horizon: Horizon) -> f64 {
        let (low, high) = horizon.jitter_range();
        self.rng.gen_range(low..=high)
    }
}

/// Constant multiplier for every horizon (1.0 disables jitter)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn multiplier(&mut self, _horizon: Horizon) -> f64 {
        self.0
    }
}

/// Tier for a probability on the 0-1 scale
pub fn assign_tier(probability: f64) -> RiskTier {
    PROBABILITY_TIERS.lookup(probability)
}

/// Round to 2 decimals after scaling to a percentage
fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// Project one horizon from the base probability
fn project_one(base_probability: f64, horizon: Horizon, multiplier: f64) -> HorizonResult {
    let scaled = base_probability * multiplier;
    // clamp passes NaN through
    let probability = if scaled.is_finite() {
        scaled.clamp(0.0, 1.0)
    } else {
        tracing::warn!(
            "Non-finite {}-day probability ({} x {}), using 0",
            horizon.days(),
            base_probability,
            multiplier
        );
        0.0
    };

    HorizonResult {
        horizon,
        probability_pct: to_percent(probability),
        // Tier from the unrounded probability
        tier: assign_tier(probability),
    }
}

/// Expand a base probability into 30/60/90-day projections.
///
/// Draws exactly one multiplier per horizon, nearest horizon first.
pub fn project_horizons<J: JitterSource>(
    base_probability: f64,
    mut jitter: J,
) -> HorizonProjection {
    let results = Horizon::ALL.map(|horizon| {
        let multiplier = jitter.multiplier(horizon);
        project_one(base_probability, horizon, multiplier)
    });

    tracing::debug!(
        "Projected horizons: 30d={}% (tier {}), 60d={}% (tier {}), 90d={}% (tier {})",
        results[0].probability_pct,
        results[0].tier,
        results[1].probability_pct,
        results[1].tier,
        results[2].probability_pct,
        results[2].tier,
    );

    HorizonProjection(results)
}
