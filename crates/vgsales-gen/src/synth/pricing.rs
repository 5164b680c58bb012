use rand::Rng;

use super::bias::lookup_genre;
use crate::error::{GenError, GenResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformClass {
    HomeConsole,
    Handheld,
    Pc,
    Other,
}

const HOME_CONSOLES: &[&str] = &[
    "NES", "SNES", "N64", "GC", "WII", "WIIU", "NS", "PS", "PS2", "PS3", "PS4", "PS5", "XB",
    "X360", "XONE", "XS",
];
const HANDHELDS: &[&str] = &["GB", "GBA", "DS", "3DS", "PSP", "PSV"];

const GENRE_PRICE_MULTIPLIER: &[(&str, f64)] = &[
    ("Role-Playing", 1.30),
    ("Simulation", 1.15),
    ("Action", 1.10),
    ("Shooter", 1.10),
    ("Sports", 0.95),
    ("Racing", 0.95),
    ("Misc", 0.85),
];

impl PlatformClass {
    pub fn of(platform: &str) -> Self {
        let platform = platform.trim().to_ascii_uppercase();
        if HOME_CONSOLES.contains(&platform.as_str()) {
            Self::HomeConsole
        } else if HANDHELDS.contains(&platform.as_str()) {
            Self::Handheld
        } else if platform == "PC" {
            Self::Pc
        } else {
            Self::Other
        }
    }

    /// Typical shelf price in yen.
    pub const fn base_price(self) -> i64 {
        match self {
            Self::HomeConsole => 6800,
            Self::Handheld => 4800,
            Self::Pc => 5980,
            Self::Other => 6000,
        }
    }
}

pub fn genre_price_multiplier(genre: &str) -> f64 {
    lookup_genre(GENRE_PRICE_MULTIPLIER, genre)
        .copied()
        .unwrap_or(1.0)
}

/// Late-window markdown: 1.1 at the first month down to 0.6 at the last.
pub fn discount_factor(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 1.0;
    }
    1.1 - 0.5 * (index as f64 / (len - 1) as f64)
}

/// A title's yen price over a fixed month window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitlePricing {
    pub price_yen: i64,
    pub window_len: usize,
}

impl TitlePricing {
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        platform: &str,
        genre: &str,
        window_len: usize,
    ) -> Self {
        let base = PlatformClass::of(platform).base_price() as f64;
        let jitter = rng.gen_range(0.9..=1.1);
        let raw = base * genre_price_multiplier(genre) * jitter;
        Self {
            price_yen: round_to_hundred(raw),
            window_len,
        }
    }

    /// Full price; lifetime figures ignore the markdown curve.
    pub fn lifetime_revenue(&self, units: i64) -> GenResult<i64> {
        units
            .checked_mul(self.price_yen)
            .ok_or_else(|| revenue_overflow(units, self.price_yen as f64))
    }

    pub fn monthly_revenue(&self, units: i64, month_index: usize) -> GenResult<i64> {
        let unit_price = self.price_yen as f64 * discount_factor(month_index, self.window_len);
        let revenue = (units as f64 * unit_price).trunc();
        if !revenue.is_finite() || revenue.abs() >= i64::MAX as f64 {
            return Err(revenue_overflow(units, unit_price));
        }
        Ok(revenue as i64)
    }
}

fn revenue_overflow(units: i64, unit_price: f64) -> GenError {
    GenError::Invariant(format!(
        "revenue for {units} units at {unit_price} yen does not fit in i64"
    ))
}

pub fn round_to_hundred(value: f64) -> i64 {
    ((value / 100.0).round() * 100.0) as i64
}
