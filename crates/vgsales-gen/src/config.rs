use std::path::Path;

use serde::Deserialize;

use crate::data::months::{YearMonth, DEFAULT_WINDOW_START};
use crate::error::{GenError, GenResult};
use crate::materialize::DEFAULT_UNIT_SCALE;

pub const DEFAULT_MONTHS: usize = 36;
pub const MAX_MONTHS: usize = 600;
/// Keeps unit and yen figures well inside `i64` for any real catalog row.
pub const MAX_UNIT_SCALE: f64 = 1e9;

/// Generation settings. Values come from defaults, then an optional YAML
/// file, then command-line overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub start_month: YearMonth,
    pub months: usize,
    pub seed: Option<u64>,
    pub unit_scale: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_month: DEFAULT_WINDOW_START,
            months: DEFAULT_MONTHS,
            seed: None,
            unit_scale: DEFAULT_UNIT_SCALE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub start_month: Option<YearMonth>,
    pub months: Option<usize>,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> GenResult<Self> {
        let bytes = std::fs::read(path)?;
        serde_yaml::from_slice::<Self>(&bytes).map_err(|error| {
            GenError::InvalidArgument(format!("invalid config '{}': {error}", path.display()))
        })
    }

    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> GenResult<Self> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(start) = overrides.start_month {
            config.start_month = start;
        }
        if let Some(months) = overrides.months {
            config.months = months;
        }
        if overrides.seed.is_some() {
            config.seed = overrides.seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.months == 0 || self.months > MAX_MONTHS {
            return Err(GenError::InvalidArgument(format!(
                "months must be between 1 and {MAX_MONTHS}, got {}",
                self.months
            )));
        }
        if self.start_month.checked_add_months(self.months - 1).is_none() {
            return Err(GenError::InvalidArgument(format!(
                "a {}-month window from {} runs past 9999-12",
                self.months, self.start_month
            )));
        }
        if !self.unit_scale.is_finite()
            || self.unit_scale <= 0.0
            || self.unit_scale > MAX_UNIT_SCALE
        {
            return Err(GenError::InvalidArgument(format!(
                "unit_scale must be in (0, {MAX_UNIT_SCALE}], got {}",
                self.unit_scale
            )));
        }
        Ok(())
    }
}
