//! Ordered threshold tables.
//!
//! Every threshold decision in the engine (scoring bands, probability tiers,
//! final-score tiers) goes through [`BandTable::lookup`], so boundary handling
//! lives here and nowhere else.

/// Descending `(inclusive lower bound, value)` pairs plus a floor value.
///
/// Lookup is first-match-wins: a value exactly on a bound resolves to that
/// bound's band, never the one below it.
#[derive(Clone, Copy, Debug)]
pub struct BandTable<T: Copy + 'static> {
    bands: &'static [(f64, T)],
    floor: T,
}

impl<T: Copy + 'static> BandTable<T> {
    pub const fn new(bands: &'static [(f64, T)], floor: T) -> Self {
        Self { bands, floor }
    }

    pub fn lookup(&self, x: f64) -> T {
        self.bands
            .iter()
            .find(|(lower, _)| x >= *lower)
            .map(|(_, value)| *value)
            .unwrap_or(self.floor)
    }

    /// True if bounds are strictly descending (required for first-match-wins)
    pub fn is_descending(&self) -> bool {
        self.bands.windows(2).all(|w| w[0].0 > w[1].0)
    }
}
