use std::collections::HashMap;

use crate::data::datasets::SeedRow;
use crate::error::GenResult;
use crate::store::{FactKey, SalesStore};

/// Natural key of a title. Ports and re-releases under another publisher or
/// year are separate titles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TitleKey {
    pub name: String,
    pub release_year: i32,
    pub publisher: String,
}

impl TitleKey {
    pub fn of(row: &SeedRow) -> Self {
        Self {
            name: row.name.clone(),
            release_year: row.release_year,
            publisher: row.publisher.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRow {
    pub platform_id: i64,
    pub genre_id: i64,
    pub publisher_id: i64,
    pub title_id: i64,
}

impl ResolvedRow {
    pub fn fact_key(&self) -> FactKey {
        FactKey {
            title_id: self.title_id,
            platform_id: self.platform_id,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimensionCounts {
    pub platforms: usize,
    pub genres: usize,
    pub publishers: usize,
    pub titles: usize,
}

/// Name→id maps for one run. Names match exactly and case-sensitively;
/// each new name is inserted once.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    platforms: HashMap<String, i64>,
    genres: HashMap<String, i64>,
    publishers: HashMap<String, i64>,
    titles: HashMap<TitleKey, i64>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, store: &SalesStore, row: &SeedRow) -> GenResult<ResolvedRow> {
        let platform_id = resolve_or_insert(&mut self.platforms, &row.platform, |name| {
            store.insert_platform(name)
        })?;
        let genre_id =
            resolve_or_insert(&mut self.genres, &row.genre, |name| store.insert_genre(name))?;
        let publisher_id = resolve_or_insert(&mut self.publishers, &row.publisher, |name| {
            store.insert_publisher(name)
        })?;

        let key = TitleKey::of(row);
        let title_id = match self.titles.get(&key) {
            Some(id) => *id,
            None => {
                let id = store.insert_title(&row.name, row.release_year, genre_id, publisher_id)?;
                self.titles.insert(key, id);
                id
            }
        };

        Ok(ResolvedRow {
            platform_id,
            genre_id,
            publisher_id,
            title_id,
        })
    }

    pub fn counts(&self) -> DimensionCounts {
        DimensionCounts {
            platforms: self.platforms.len(),
            genres: self.genres.len(),
            publishers: self.publishers.len(),
            titles: self.titles.len(),
        }
    }
}

fn resolve_or_insert<F>(map: &mut HashMap<String, i64>, name: &str, insert: F) -> GenResult<i64>
where
    F: FnOnce(&str) -> GenResult<i64>,
{
    if let Some(id) = map.get(name) {
        return Ok(*id);
    }
    let id = insert(name)?;
    map.insert(name.to_string(), id);
    Ok(id)
}
