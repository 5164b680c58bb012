use serde::Serialize;

use crate::data::months::YearMonth;
use crate::error::GenResult;
use crate::store::{SalesStore, StoreTable};
use crate::synth::regions::REGION_COUNT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub check: &'static str,
    pub detail: String,
}

impl Violation {
    fn new(check: &'static str, detail: String) -> Self {
        Self { check, detail }
    }
}

/// Checks a built store against the dashboard's expectations. An empty
/// result means the store is consistent.
pub fn verify_store(store: &SalesStore) -> GenResult<Vec<Violation>> {
    let mut violations = Vec::new();

    let regions = store.count_rows(StoreTable::Region)?;
    if regions != REGION_COUNT as u64 {
        violations.push(Violation::new(
            "region_rows",
            format!("expected {REGION_COUNT} regions, found {regions}"),
        ));
    }

    for table in [StoreTable::Sale, StoreTable::SaleMonthly] {
        let bad = store.non_positive_fact_rows(table)?;
        if bad > 0 {
            violations.push(Violation::new(
                "positive_units",
                format!("{bad} rows in {} with non-positive units", table.as_str()),
            ));
        }
    }

    for tuple in store.overdrawn_lifetime_tuples()? {
        violations.push(Violation::new(
            "monthly_within_lifetime",
            format!(
                "game {} platform {} region {}: monthly units {} exceed lifetime units {}",
                tuple.title_id,
                tuple.platform_id,
                tuple.region_id,
                tuple.monthly_units,
                tuple.lifetime_units
            ),
        ));
    }

    let orphans = store.orphan_monthly_rows()?;
    if orphans > 0 {
        violations.push(Violation::new(
            "monthly_has_lifetime",
            format!("{orphans} monthly rows without a lifetime row"),
        ));
    }

    for label in store.distinct_year_months()? {
        if YearMonth::parse(&label).is_err() {
            violations.push(Violation::new(
                "year_month_format",
                format!("'{label}' is not YYYY-MM"),
            ));
        }
    }

    Ok(violations)
}
