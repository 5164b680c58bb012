use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GenResult;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTotals {
    pub rows: u64,
    pub units: i64,
    pub revenue_jpy: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTotals {
    pub lifetime: FactTotals,
    pub monthly: FactTotals,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCounts {
    pub seed_rows: usize,
    pub skipped_rows: usize,
    pub platforms: usize,
    pub genres: usize,
    pub publishers: usize,
    pub titles: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildReport {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub input_sha256: String,
    pub database: String,
    pub seed: u64,
    pub first_month: String,
    pub last_month: String,
    pub months: usize,
    pub unit_scale: f64,
    pub counts: BuildCounts,
    pub totals: StoreTotals,
}

impl BuildReport {
    pub fn write_json(&self, path: &Path) -> GenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
