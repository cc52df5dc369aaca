//! Final tier resolution from the three horizon tiers.

use crate::bands::BandTable;
use crate::{FinalResolution, Horizon, HorizonProjection, Result, RiskTier};

/// Final score → tier
pub(crate) const FINAL_SCORE_TIERS: BandTable<RiskTier> = BandTable::new(
    &[
        (5.0, RiskTier::VeryHigh),
        (4.0, RiskTier::High),
        (3.0, RiskTier::Medium),
        (2.0, RiskTier::Low),
    ],
    RiskTier::VeryLow,
);

/// Combine validated horizon tiers.
///
/// The weighted sum is taken in integer tenths, so a score that is
/// mathematically an integer is exactly that integer.
pub fn resolve_tiers(tier30: RiskTier, tier60: RiskTier, tier90: RiskTier) -> FinalResolution {
    let tenths: u32 = [tier30, tier60, tier90]
        .iter()
        .zip(Horizon::ALL)
        .map(|(tier, horizon)| tier.level() as u32 * horizon.weight_tenths())
        .sum();
    let final_score = tenths as f64 / 10.0;
    let final_tier = FINAL_SCORE_TIERS.lookup(final_score);

    FinalResolution {
        final_score,
        final_tier,
        risk_category: final_tier.category(),
        care_plan: final_tier.care_plan(),
    }
}

/// Combine raw tier levels, rejecting anything outside 1..=5
pub fn resolve_final(tier30: u8, tier60: u8, tier90: u8) -> Result<FinalResolution> {
    Ok(resolve_tiers(
        RiskTier::try_from(tier30)?,
        RiskTier::try_from(tier60)?,
        RiskTier::try_from(tier90)?,
    ))
}

/// Resolve a full horizon projection
pub fn resolve_projection(projection: &HorizonProjection) -> FinalResolution {
    resolve_tiers(
        projection.tier(Horizon::Days30),
        projection.tier(Horizon::Days60),
        projection.tier(Horizon::Days90),
    )
}
