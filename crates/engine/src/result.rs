use std::ops::AddAssign;

use serde::Serialize;

/// Counters for one region, or for a whole run once regions are folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ComparisonResult {
    pub cells_compared: u64,
    pub numeric_mismatches: u64,
    pub text_mismatches: u64,
    pub regions_compared: u32,
}

impl ComparisonResult {
    /// Fresh accumulator for a single region about to be scanned.
    pub fn for_region() -> Self {
        Self {
            regions_compared: 1,
            ..Self::default()
        }
    }

    pub fn total_mismatches(&self) -> u64 {
        self.numeric_mismatches + self.text_mismatches
    }

    pub fn is_identical(&self) -> bool {
        self.total_mismatches() == 0
    }

    /// Field-wise sum of a finished region into this accumulator.
    pub fn absorb(&mut self, region: &ComparisonResult) {
        self.cells_compared += region.cells_compared;
        self.numeric_mismatches += region.numeric_mismatches;
        self.text_mismatches += region.text_mismatches;
        self.regions_compared += region.regions_compared;
    }
}

impl AddAssign for ComparisonResult {
    fn add_assign(&mut self, rhs: Self) {
        self.absorb(&rhs);
    }
}

impl std::iter::Sum for ComparisonResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, r| {
            acc.absorb(&r);
            acc
        })
    }
}
