use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bias::{genre_regions, is_first_party, publisher_regions};
use crate::error::{GenError, GenResult};

pub const REGION_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Hokkaido,
    Tohoku,
    Kanto,
    Chubu,
    Kansai,
    Chugoku,
    Shikoku,
    Kyushu,
}

impl Region {
    pub const ALL: [Region; REGION_COUNT] = [
        Region::Hokkaido,
        Region::Tohoku,
        Region::Kanto,
        Region::Chubu,
        Region::Kansai,
        Region::Chugoku,
        Region::Shikoku,
        Region::Kyushu,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hokkaido => "Hokkaido",
            Self::Tohoku => "Tohoku",
            Self::Kanto => "Kanto",
            Self::Chubu => "Chubu",
            Self::Kansai => "Kansai",
            Self::Chugoku => "Chugoku",
            Self::Shikoku => "Shikoku",
            Self::Kyushu => "Kyushu",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Hokkaido => "HKD",
            Self::Tohoku => "THK",
            Self::Kanto => "KNT",
            Self::Chubu => "CHB",
            Self::Kansai => "KNS",
            Self::Chugoku => "CHG",
            Self::Shikoku => "SHK",
            Self::Kyushu => "KYS",
        }
    }

    /// Share of national demand before any per-title skew.
    pub const fn baseline_share(self) -> f64 {
        match self {
            Self::Hokkaido => 0.04,
            Self::Tohoku => 0.06,
            Self::Kanto => 0.35,
            Self::Chubu => 0.17,
            Self::Kansai => 0.18,
            Self::Chugoku => 0.06,
            Self::Shikoku => 0.04,
            Self::Kyushu => 0.10,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Fails when the baseline shares drift away from summing to one.
pub fn check_baseline_shares() -> GenResult<()> {
    let total: f64 = Region::ALL.iter().map(|r| r.baseline_share()).sum();
    if (total - 1.0).abs() > 1e-6 {
        return Err(GenError::Invariant(format!(
            "region baseline shares sum to {total}, expected 1.0"
        )));
    }
    Ok(())
}

/// Per-region weights indexed by [`Region::index`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionWeights([f64; REGION_COUNT]);

impl RegionWeights {
    pub fn baseline() -> Self {
        Self(Region::ALL.map(Region::baseline_share))
    }

    pub fn get(&self, region: Region) -> f64 {
        self.0[region.index()]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, f64)> + '_ {
        Region::ALL.iter().map(move |r| (*r, self.0[r.index()]))
    }

    fn scale(&mut self, region: Region, factor: f64) {
        self.0[region.index()] *= factor;
    }

    /// Rescales to sum to one, or falls back to the baseline when the total collapsed.
    pub fn normalized(self) -> Self {
        let total = self.total();
        if !total.is_finite() || total <= 0.0 {
            return Self::baseline();
        }
        Self(self.0.map(|w| w / total))
    }
}

impl From<[f64; REGION_COUNT]> for RegionWeights {
    fn from(value: [f64; REGION_COUNT]) -> Self {
        Self(value)
    }
}

const POOL_RESOLUTION: f64 = 100.0;
const PUBLISHER_POOL_BONUS: usize = 20;
const GENRE_POOL_BONUS: usize = 12;
const SECONDARY_REGION_PROBABILITY: f64 = 0.4;

/// Draw pool for the title's dominant region: baseline shares plus extra
/// tickets for regions the publisher or genre favours.
pub fn candidate_pool(genre: &str, publisher: &str) -> Vec<Region> {
    let mut pool = Vec::new();
    for region in Region::ALL {
        let copies = ((region.baseline_share() * POOL_RESOLUTION).round() as usize).max(1);
        pool.extend(std::iter::repeat(region).take(copies));
    }
    for region in publisher_regions(publisher) {
        pool.extend(std::iter::repeat(*region).take(PUBLISHER_POOL_BONUS));
    }
    for region in genre_regions(genre) {
        pool.extend(std::iter::repeat(*region).take(GENRE_POOL_BONUS));
    }
    pool
}

/// Samples a title-specific regional split of national sales. The result is
/// non-negative and sums to one.
pub fn sample_region_weights<R: Rng + ?Sized>(
    rng: &mut R,
    platform: &str,
    genre: &str,
    publisher: &str,
) -> RegionWeights {
    let pool = candidate_pool(genre, publisher);
    let main = pool.choose(rng).copied().unwrap_or(Region::Kanto);
    let secondary = if rng.gen_bool(SECONDARY_REGION_PROBABILITY) {
        let rest: Vec<Region> = pool.iter().copied().filter(|r| *r != main).collect();
        rest.choose(rng).copied()
    } else {
        None
    };

    let mut weights = RegionWeights::baseline();
    let mut touched = [false; REGION_COUNT];

    weights.scale(main, rng.gen_range(2.0..=3.0));
    touched[main.index()] = true;
    if let Some(secondary) = secondary {
        weights.scale(secondary, rng.gen_range(1.3..=1.8));
        touched[secondary.index()] = true;
    }

    let untouched: Vec<Region> = Region::ALL
        .iter()
        .copied()
        .filter(|r| !touched[r.index()])
        .collect();
    let suppress_count = rng.gen_range(1..=2usize).min(untouched.len());
    let suppressed: Vec<Region> = untouched
        .choose_multiple(rng, suppress_count)
        .copied()
        .collect();
    for region in suppressed {
        weights.scale(region, rng.gen_range(0.3..=0.7));
        touched[region.index()] = true;
    }

    for region in Region::ALL {
        if !touched[region.index()] {
            weights.scale(region, rng.gen_range(0.8..=1.2));
        }
    }

    if is_first_party(platform, publisher) {
        for region in Region::ALL {
            if matches!(region, Region::Kanto | Region::Kansai) {
                weights.scale(region, rng.gen_range(1.1..=1.3));
            } else {
                weights.scale(region, 0.9);
            }
        }
    }

    weights.normalized()
}
