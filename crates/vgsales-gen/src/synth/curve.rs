//! Monthly sales curve synthesis.
//!
//! A title's curve is seasonality times one or two super-Gaussian peaks,
//! shaped by a lifecycle profile, then sampled through a Gamma draw per month
//! so neighbouring titles never share the exact same shape. The sampled
//! series is smoothed, its dynamic range compressed, and normalized.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Gamma};

use super::bias::{genre_peak_month, is_first_party, publisher_peak_month};
use crate::data::months::YearMonth;

const PEAK_FALLOFF_EXPONENT: f64 = 1.3;
const BASE_INTENSITY: f64 = 0.6;
const INTENSITY_FLOOR: f64 = 0.15;
const COMPRESSION_EXPONENT: f64 = 0.75;
const SECONDARY_PEAK_PROBABILITY: f64 = 0.4;

/// Retail strength of a calendar month; December strongest, February weakest.
pub fn base_seasonality(month: u32) -> f64 {
    match month {
        1 => 0.90,
        2 => 0.85,
        3 => 0.95,
        4 => 1.00,
        5 => 1.05,
        6 => 1.10,
        7 => 1.20,
        8 => 1.15,
        9 => 1.05,
        10 => 1.10,
        11 => 1.25,
        12 => 1.40,
        _ => 1.0,
    }
}

/// End-of-year push applied to first-party titles.
pub fn first_party_month_factor(month: u32) -> f64 {
    match month {
        10 => 1.2,
        11 => 1.5,
        12 => 1.8,
        _ => 0.8,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleProfile {
    FrontLoaded,
    SlowBuilding,
    LongTail,
}

impl LifecycleProfile {
    pub const ALL: [LifecycleProfile; 3] = [
        LifecycleProfile::FrontLoaded,
        LifecycleProfile::SlowBuilding,
        LifecycleProfile::LongTail,
    ];

    pub fn decay_range(self) -> RangeInclusive<f64> {
        match self {
            Self::FrontLoaded => 2.0..=4.0,
            Self::SlowBuilding => 4.0..=7.0,
            Self::LongTail => 5.5..=9.0,
        }
    }

    pub fn strength_range(self) -> RangeInclusive<f64> {
        match self {
            Self::FrontLoaded => 1.3..=1.8,
            Self::SlowBuilding => 1.1..=1.4,
            Self::LongTail => 0.9..=1.2,
        }
    }

    /// Multiplier at relative window position `t` in `[0, 1]`.
    pub fn bias(self, t: f64) -> f64 {
        match self {
            Self::FrontLoaded => 1.25 - 0.5 * t,
            Self::SlowBuilding => 0.8 + 0.45 * t,
            Self::LongTail => 1.0 + 0.1 * (2.0 * PI * 1.5 * t).sin(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub center: usize,
    pub decay: f64,
    pub strength: f64,
}

impl Peak {
    /// Super-Gaussian falloff: 1.0 at the center.
    pub fn proximity(&self, idx: usize) -> f64 {
        let distance = idx.abs_diff(self.center) as f64;
        (-(distance / self.decay).powf(PEAK_FALLOFF_EXPONENT)).exp()
    }
}

/// Randomized shape parameters for one curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePlan {
    pub profile: LifecycleProfile,
    pub main: Peak,
    pub secondary: Option<Peak>,
    pub first_party: bool,
}

/// Genre preference wins over publisher; with neither, any month.
pub fn target_peak_month<R: Rng + ?Sized>(rng: &mut R, genre: &str, publisher: &str) -> u32 {
    genre_peak_month(genre)
        .or_else(|| publisher_peak_month(publisher))
        .unwrap_or_else(|| rng.gen_range(1..=12))
}

/// Draws the shape of one curve; `None` for an empty window.
pub fn plan_curve<R: Rng + ?Sized>(
    rng: &mut R,
    months: &[YearMonth],
    genre: &str,
    publisher: &str,
    platform: &str,
) -> Option<CurvePlan> {
    let len = months.len();
    if len == 0 {
        return None;
    }
    let peak_month = target_peak_month(rng, genre, publisher);
    let candidates: Vec<usize> = months
        .iter()
        .enumerate()
        .filter(|(_, ym)| ym.month() == peak_month)
        .map(|(idx, _)| idx)
        .collect();
    let main_idx = match candidates.choose(rng) {
        Some(idx) => *idx,
        None => rng.gen_range(0..len),
    };

    let profile = *LifecycleProfile::ALL
        .choose(rng)
        .unwrap_or(&LifecycleProfile::LongTail);
    let main = Peak {
        center: main_idx,
        decay: rng.gen_range(profile.decay_range()),
        strength: rng.gen_range(profile.strength_range()),
    };

    let secondary = if rng.gen_bool(SECONDARY_PEAK_PROBABILITY) {
        let divisor = rng.gen_range(4.0..=6.0);
        let offset = ((len as f64 / divisor).round() as usize).max(1);
        let center = if rng.gen_bool(0.5) {
            (main_idx + offset).min(len - 1)
        } else {
            main_idx.saturating_sub(offset)
        };
        Some(Peak {
            center,
            decay: rng.gen_range(3.0..=6.5),
            strength: rng.gen_range(0.5..=1.0),
        })
    } else {
        None
    };

    Some(CurvePlan {
        profile,
        main,
        secondary,
        first_party: is_first_party(platform, publisher),
    })
}

/// Synthesizes a title's monthly share of sales over `months`.
///
/// The output has one entry per month, is non-negative and sums to one.
/// An empty window yields an empty vector. Every call draws fresh randomness.
pub fn synthesize_monthly_weights<R: Rng + ?Sized>(
    rng: &mut R,
    months: &[YearMonth],
    genre: &str,
    publisher: &str,
    platform: &str,
) -> Vec<f64> {
    match plan_curve(rng, months, genre, publisher, platform) {
        Some(plan) => render_curve(rng, months, &plan),
        None => Vec::new(),
    }
}

pub fn render_curve<R: Rng + ?Sized>(
    rng: &mut R,
    months: &[YearMonth],
    plan: &CurvePlan,
) -> Vec<f64> {
    let len = months.len();
    if len == 0 {
        return Vec::new();
    }
    let span = (len - 1).max(1) as f64;

    let raw: Vec<f64> = months
        .iter()
        .enumerate()
        .map(|(idx, ym)| {
            let peaks = plan.main.strength * plan.main.proximity(idx)
                + plan
                    .secondary
                    .map(|p| p.strength * p.proximity(idx))
                    .unwrap_or(0.0);
            let jitter = rng.gen_range(0.9..=1.05);
            let intensity = base_seasonality(ym.month())
                * (BASE_INTENSITY + peaks)
                * plan.profile.bias(idx as f64 / span)
                * jitter;
            sample_gamma(rng, intensity.max(INTENSITY_FLOOR))
        })
        .collect();

    let mut series = smooth_121(&raw);
    compress_dynamic_range(&mut series, COMPRESSION_EXPONENT);

    if plan.first_party {
        for (value, ym) in series.iter_mut().zip(months) {
            *value *= first_party_month_factor(ym.month());
        }
    }

    normalize_or_flat(series)
}

fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64) -> f64 {
    match Gamma::new(shape, 1.0) {
        Ok(gamma) => gamma.sample(rng),
        Err(_) => shape,
    }
}

/// 1:2:1 weighted moving average; the edge value stands in for the missing neighbour.
pub fn smooth_121(values: &[f64]) -> Vec<f64> {
    let len = values.len();
    (0..len)
        .map(|i| {
            let prev = values[i.saturating_sub(1)];
            let next = values[(i + 1).min(len - 1)];
            (prev + 2.0 * values[i] + next) / 4.0
        })
        .collect()
}

/// Pulls every value toward the series mean: `mean * (v / mean)^exponent`.
pub fn compress_dynamic_range(values: &mut [f64], exponent: f64) {
    if values.is_empty() {
        return;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if !mean.is_finite() || mean <= 0.0 {
        return;
    }
    for value in values.iter_mut() {
        *value = mean * ((*value).max(0.0) / mean).powf(exponent);
    }
}

/// Normalizes to sum to one; a collapsed or non-finite total gives `1/N` everywhere.
pub fn normalize_or_flat(values: Vec<f64>) -> Vec<f64> {
    let len = values.len();
    if len == 0 {
        return values;
    }
    let total: f64 = values.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return vec![1.0 / len as f64; len];
    }
    values.into_iter().map(|v| v / total).collect()
}
