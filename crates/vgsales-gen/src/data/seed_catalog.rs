use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use super::datasets::{RawSeedRow, SeedRow};
use crate::error::{GenError, GenResult};

/// Reads and validates the whole seed catalog. The first malformed row
/// aborts the load.
pub fn load_seed_rows(path: &Path) -> GenResult<Vec<SeedRow>> {
    if !path.is_file() {
        return Err(GenError::MissingInput(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawSeedRow = record.deserialize(Some(&headers))?;
        rows.push(raw.validate(line)?);
    }

    info!(path = %path.display(), rows = rows.len(), "loaded seed catalog");
    Ok(rows)
}

pub fn catalog_sha256(path: &Path) -> GenResult<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}
