use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// One catalog entry as it appears in the seed CSV. Columns the generator
/// does not use (`Rank`, `NA_Sales`, ...) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct RawSeedRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "JP_Sales", default)]
    pub jp_sales: Option<String>,
    #[serde(rename = "Global_Sales", default)]
    pub global_sales: Option<String>,
}

/// A validated seed row. Sales figures are in millions of units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedRow {
    pub name: String,
    pub platform: String,
    pub release_year: i32,
    pub genre: String,
    pub publisher: String,
    pub jp_sales_million: f64,
    pub global_sales_million: f64,
}

impl RawSeedRow {
    /// `line` is only used for error reporting.
    pub fn validate(self, line: u64) -> GenResult<SeedRow> {
        let release_year = parse_year(&self.year).ok_or_else(|| GenError::MalformedField {
            line,
            field: "Year",
            value: self.year.clone(),
        })?;

        Ok(SeedRow {
            name: self.name.trim().to_string(),
            platform: self.platform.trim().to_string(),
            release_year,
            genre: self.genre.trim().to_string(),
            publisher: self.publisher.trim().to_string(),
            jp_sales_million: parse_sales(self.jp_sales.as_deref()),
            global_sales_million: parse_sales(self.global_sales.as_deref()),
        })
    }
}

// Spreadsheet exports write integral years as `2006.0`; anything fractional is rejected.
fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() <= i32::MAX as f64 {
        Some(float as i32)
    } else {
        None
    }
}

/// Unparseable or missing sales figures count as zero.
pub fn parse_sales(value: Option<&str>) -> f64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
