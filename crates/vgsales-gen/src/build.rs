use std::path::PathBuf;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::CatalogLoader;
use crate::config::GeneratorConfig;
use crate::data::datasets::SeedRow;
use crate::data::generator::{resolve_seed, rng_from_seed};
use crate::data::months::{month_window, YearMonth};
use crate::data::seed_catalog::{catalog_sha256, load_seed_rows};
use crate::error::GenResult;
use crate::materialize::{SalesMaterializer, TitleFacts};
use crate::results::{BuildCounts, BuildReport, REPORT_SCHEMA_VERSION};
use crate::store::{FactKey, RegionIds, SalesStore};
use crate::synth::regions::check_baseline_shares;

#[derive(Clone, Debug)]
pub struct BuildRequest {
    pub input: PathBuf,
    pub database: PathBuf,
    pub config: GeneratorConfig,
}

/// Rebuilds the store at `request.database` from the seed catalog.
pub fn run_build(request: &BuildRequest) -> GenResult<BuildReport> {
    check_baseline_shares()?;
    request.config.validate()?;

    let rows = load_seed_rows(&request.input)?;
    let input_sha256 = catalog_sha256(&request.input)?;
    let seed = resolve_seed(request.config.seed);
    let mut rng = rng_from_seed(seed);
    let months = month_window(request.config.start_month, request.config.months);

    info!(
        input = %request.input.display(),
        database = %request.database.display(),
        seed,
        months = months.len(),
        "rebuilding sales store"
    );

    let store = SalesStore::create(&request.database)?;
    let counts = generate_into(
        &store,
        &rows,
        &months,
        request.config.unit_scale,
        &mut rng,
    )?;
    let totals = store.totals()?;

    info!(
        titles = counts.titles,
        skipped = counts.skipped_rows,
        lifetime_rows = totals.lifetime.rows,
        monthly_rows = totals.monthly.rows,
        "sales store rebuilt"
    );

    Ok(BuildReport {
        schema_version: REPORT_SCHEMA_VERSION,
        created_at: Utc::now(),
        input: request.input.display().to_string(),
        input_sha256,
        database: request.database.display().to_string(),
        seed,
        first_month: window_edge(months.first()),
        last_month: window_edge(months.last()),
        months: months.len(),
        unit_scale: request.config.unit_scale,
        counts,
        totals,
    })
}

fn window_edge(month: Option<&YearMonth>) -> String {
    month.map(ToString::to_string).unwrap_or_default()
}

/// Seeds the regions and writes every row's dimensions and facts into an
/// empty store, all in one transaction.
pub fn generate_into<R: Rng + ?Sized>(
    store: &SalesStore,
    rows: &[SeedRow],
    months: &[YearMonth],
    unit_scale: f64,
    rng: &mut R,
) -> GenResult<BuildCounts> {
    store.in_transaction(|store| {
        let region_ids = store.seed_regions()?;
        let mut catalog = CatalogLoader::new();
        let materializer = SalesMaterializer::new(months, unit_scale);
        let mut skipped_rows = 0;

        for row in rows {
            let resolved = catalog.resolve(store, row)?;
            let Some(facts) = materializer.materialize(rng, row)? else {
                debug!(
                    title = %row.name,
                    platform = %row.platform,
                    "no positive sales figure; skipping"
                );
                skipped_rows += 1;
                continue;
            };
            if row.jp_sales_million <= 0.0 {
                debug!(
                    title = %row.name,
                    volume = facts.national_volume,
                    "no JP figure; using global sales"
                );
            }
            persist_title(store, resolved.fact_key(), &region_ids, &facts)?;
        }

        let dims = catalog.counts();
        Ok(BuildCounts {
            seed_rows: rows.len(),
            skipped_rows,
            platforms: dims.platforms,
            genres: dims.genres,
            publishers: dims.publishers,
            titles: dims.titles,
        })
    })
}

fn persist_title(
    store: &SalesStore,
    key: FactKey,
    region_ids: &RegionIds,
    facts: &TitleFacts,
) -> GenResult<()> {
    for fact in &facts.lifetime {
        store.insert_lifetime(key, region_ids, fact)?;
    }
    for fact in &facts.monthly {
        store.insert_monthly(key, region_ids, fact)?;
    }
    Ok(())
}
