use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::data::months::YearMonth;
use crate::error::GenResult;

#[derive(Debug, Parser)]
#[command(
    name = "vgsales-gen",
    about = "Synthesizes the regional/monthly sales store behind the sales dashboard"
)]
pub struct Args {
    #[arg(long, env = "VGSALES_INPUT", default_value = "data/vgsales_30.csv")]
    pub input: PathBuf,
    #[arg(long, env = "VGSALES_DB", default_value = "data/vgsales_30.db")]
    pub db: PathBuf,
    #[arg(long, env = "VGSALES_LOG", default_value = "info")]
    pub log_filter: String,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Drop and regenerate the store from the seed catalog (default).
    Build(BuildArgs),
    /// Check an existing store for consistency.
    Verify,
}

impl Default for Command {
    fn default() -> Self {
        Self::Build(BuildArgs::default())
    }
}

#[derive(Debug, Default, ClapArgs)]
pub struct BuildArgs {
    /// Seed for every random draw; omit for a fresh dataset each run.
    #[arg(long)]
    pub seed: Option<u64>,
    /// First month of the window, YYYY-MM.
    #[arg(long, value_parser = parse_year_month)]
    pub start: Option<YearMonth>,
    /// Number of consecutive months to generate.
    #[arg(long)]
    pub months: Option<usize>,
    /// YAML file with generator settings; flags win over it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write a JSON run report here.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BuildArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            start_month: self.start,
            months: self.months,
            seed: self.seed,
        }
    }
}

pub fn parse_year_month(value: &str) -> GenResult<YearMonth> {
    YearMonth::parse(value)
}
