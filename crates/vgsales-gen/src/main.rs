use clap::Parser;
use tracing::{error, info};

use vgsales_gen::build::{run_build, BuildRequest};
use vgsales_gen::cli::{Args, Command};
use vgsales_gen::config::GeneratorConfig;
use vgsales_gen::error::{GenError, GenResult};
use vgsales_gen::logging::init_tracing;
use vgsales_gen::store::SalesStore;
use vgsales_gen::verify::verify_store;

fn main() -> GenResult<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter)?;

    match args.command.unwrap_or_default() {
        Command::Build(build) => {
            let config = GeneratorConfig::resolve(build.config.as_deref(), build.overrides())?;
            let request = BuildRequest {
                input: args.input.clone(),
                database: args.db.clone(),
                config,
            };
            let report = run_build(&request)?;
            if let Some(path) = &build.report {
                report.write_json(path)?;
                info!(path = %path.display(), "wrote run report");
            }
            println!(
                "[ok] sales store built: {} (seed={}, {}..{}, lifetime_rows={}, monthly_rows={})",
                args.db.display(),
                report.seed,
                report.first_month,
                report.last_month,
                report.totals.lifetime.rows,
                report.totals.monthly.rows
            );
        }
        Command::Verify => {
            let store = SalesStore::open_read_only(&args.db)?;
            let violations = verify_store(&store)?;
            if !violations.is_empty() {
                for violation in &violations {
                    error!(check = violation.check, "{}", violation.detail);
                }
                return Err(GenError::Invariant(format!(
                    "{} consistency violations in {}",
                    violations.len(),
                    args.db.display()
                )));
            }
            println!("[ok] sales store consistent: {}", args.db.display());
        }
    }

    Ok(())
}
