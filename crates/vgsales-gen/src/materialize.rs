use rand::Rng;
use serde::Serialize;

use crate::data::datasets::SeedRow;
use crate::data::months::YearMonth;
use crate::error::{GenError, GenResult};
use crate::synth::bias::publisher_matches;
use crate::synth::curve::synthesize_monthly_weights;
use crate::synth::pricing::TitlePricing;
use crate::synth::regions::{sample_region_weights, Region, RegionWeights};

/// Seed figures are in millions of units.
pub const DEFAULT_UNIT_SCALE: f64 = 1_000_000.0;

/// Hand-tuned volume knob: one publisher family over- or under-performs
/// depending on genre. Not derived from input data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeRule {
    pub publisher_key: &'static str,
    pub genre: &'static str,
    pub in_genre: (f64, f64),
    pub other_genres: (f64, f64),
}

pub const VOLUME_RULES: &[VolumeRule] = &[VolumeRule {
    publisher_key: "Square",
    genre: "Role-Playing",
    in_genre: (1.55, 1.70),
    other_genres: (0.88, 0.95),
}];

/// Japan-specific figure when positive, else the global one; `None` when
/// neither is usable and the title should be skipped.
pub fn national_volume(row: &SeedRow) -> Option<f64> {
    [row.jp_sales_million, row.global_sales_million]
        .into_iter()
        .find(|v| v.is_finite() && *v > 0.0)
}

pub fn volume_adjustment<R: Rng + ?Sized>(rng: &mut R, publisher: &str, genre: &str) -> f64 {
    let Some(rule) = VOLUME_RULES
        .iter()
        .find(|rule| publisher_matches(rule.publisher_key, publisher))
    else {
        return 1.0;
    };
    let (low, high) = if genre.trim() == rule.genre {
        rule.in_genre
    } else {
        rule.other_genres
    };
    rng.gen_range(low..=high)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LifetimeFact {
    pub region: Region,
    pub units_million: f64,
    pub units: i64,
    pub revenue: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyFact {
    pub region: Region,
    pub year_month: YearMonth,
    pub units_million: f64,
    pub units: i64,
    pub revenue: i64,
}

/// Everything generated for one seed row, ready to persist.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleFacts {
    pub national_volume: f64,
    pub adjusted_volume: f64,
    pub pricing: TitlePricing,
    pub region_weights: RegionWeights,
    pub lifetime: Vec<LifetimeFact>,
    pub monthly: Vec<MonthlyFact>,
}

impl TitleFacts {
    pub fn lifetime_units(&self) -> i64 {
        self.lifetime.iter().map(|f| f.units).sum()
    }

    pub fn monthly_units_for(&self, region: Region) -> i64 {
        self.monthly
            .iter()
            .filter(|f| f.region == region)
            .map(|f| f.units)
            .sum()
    }
}

/// Splits a title's national volume across regions and months.
#[derive(Clone, Copy, Debug)]
pub struct SalesMaterializer<'a> {
    months: &'a [YearMonth],
    unit_scale: f64,
}

impl<'a> SalesMaterializer<'a> {
    pub fn new(months: &'a [YearMonth], unit_scale: f64) -> Self {
        Self { months, unit_scale }
    }

    pub fn months(&self) -> &'a [YearMonth] {
        self.months
    }

    /// Returns `Ok(None)` when the row has no usable sales volume. Unit or
    /// revenue figures that do not fit in `i64` are an invariant error.
    pub fn materialize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        row: &SeedRow,
    ) -> GenResult<Option<TitleFacts>> {
        let Some(national) = national_volume(row) else {
            return Ok(None);
        };
        let adjusted = national * volume_adjustment(rng, &row.publisher, &row.genre);
        let pricing = TitlePricing::sample(rng, &row.platform, &row.genre, self.months.len());
        let region_weights = sample_region_weights(rng, &row.platform, &row.genre, &row.publisher);

        let mut lifetime = Vec::new();
        let mut monthly = Vec::new();
        for (region, weight) in region_weights.iter() {
            let region_million = adjusted * weight;
            let units = whole_units(region_million * self.unit_scale, &row.name)?;
            if units <= 0 {
                continue;
            }
            lifetime.push(LifetimeFact {
                region,
                units_million: round_to(region_million, 4),
                units,
                revenue: pricing.lifetime_revenue(units)?,
            });

            let month_weights = synthesize_monthly_weights(
                rng,
                self.months,
                &row.genre,
                &row.publisher,
                &row.platform,
            );
            for (idx, (year_month, share)) in self.months.iter().zip(&month_weights).enumerate() {
                let month_units = (units as f64 * share).trunc() as i64;
                if month_units <= 0 {
                    continue;
                }
                monthly.push(MonthlyFact {
                    region,
                    year_month: *year_month,
                    units_million: round_to(region_million * share, 5),
                    units: month_units,
                    revenue: pricing.monthly_revenue(month_units, idx)?,
                });
            }
        }

        Ok(Some(TitleFacts {
            national_volume: national,
            adjusted_volume: adjusted,
            pricing,
            region_weights,
            lifetime,
            monthly,
        }))
    }
}

fn whole_units(scaled: f64, title: &str) -> GenResult<i64> {
    let units = scaled.floor();
    if !units.is_finite() || units >= i64::MAX as f64 {
        return Err(GenError::Invariant(format!(
            "unit count {scaled} for '{title}' does not fit in i64"
        )));
    }
    Ok(units as i64)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
