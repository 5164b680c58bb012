//! SQLite persistence for the generated star schema.
//!
//! Only this module issues SQL. The table and column names are the
//! dashboard's read contract and must not drift.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};

use crate::error::{GenError, GenResult};
use crate::materialize::{LifetimeFact, MonthlyFact};
use crate::results::{FactTotals, StoreTotals};
use crate::synth::regions::{Region, REGION_COUNT};

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE PLATFORM (
    platform_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    platform_name TEXT NOT NULL UNIQUE
);

CREATE TABLE REGION (
    region_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    region_name TEXT NOT NULL UNIQUE,
    region_code TEXT NOT NULL UNIQUE
);

CREATE TABLE GENRE (
    genre_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    genre_name TEXT NOT NULL UNIQUE
);

CREATE TABLE PUBLISHER (
    publisher_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    publisher_name TEXT NOT NULL UNIQUE
);

CREATE TABLE GAME (
    game_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    game_name    TEXT NOT NULL,
    release_year INTEGER,
    genre_id     INTEGER NOT NULL,
    publisher_id INTEGER NOT NULL,
    FOREIGN KEY (genre_id)     REFERENCES GENRE(genre_id),
    FOREIGN KEY (publisher_id) REFERENCES PUBLISHER(publisher_id)
);

CREATE TABLE SALE (
    game_id       INTEGER NOT NULL,
    platform_id   INTEGER NOT NULL,
    region_id     INTEGER NOT NULL,
    sales_million REAL    NOT NULL,
    sales_units   INTEGER NOT NULL,
    revenue_jpy   INTEGER NOT NULL,
    PRIMARY KEY (game_id, platform_id, region_id),
    FOREIGN KEY (game_id)     REFERENCES GAME(game_id),
    FOREIGN KEY (platform_id) REFERENCES PLATFORM(platform_id),
    FOREIGN KEY (region_id)   REFERENCES REGION(region_id)
);

CREATE TABLE SaleMonthly (
    game_id       INTEGER NOT NULL,
    platform_id   INTEGER NOT NULL,
    region_id     INTEGER NOT NULL,
    year_month    TEXT    NOT NULL,
    sales_million REAL    NOT NULL,
    sales_units   INTEGER NOT NULL,
    revenue_jpy   INTEGER NOT NULL,
    PRIMARY KEY (game_id, platform_id, region_id, year_month),
    FOREIGN KEY (game_id)     REFERENCES GAME(game_id),
    FOREIGN KEY (platform_id) REFERENCES PLATFORM(platform_id),
    FOREIGN KEY (region_id)   REFERENCES REGION(region_id)
);
"#;

/// Row ids of the seeded regions, indexed by [`Region::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionIds([i64; REGION_COUNT]);

impl RegionIds {
    pub fn get(&self, region: Region) -> i64 {
        self.0[region.index()]
    }
}

/// Foreign keys shared by every fact row of one seed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactKey {
    pub title_id: i64,
    pub platform_id: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverdrawnTuple {
    pub title_id: i64,
    pub platform_id: i64,
    pub region_id: i64,
    pub lifetime_units: i64,
    pub monthly_units: i64,
}

pub struct SalesStore {
    conn: Connection,
}

impl SalesStore {
    /// Drops any existing database at `path` and creates an empty schema.
    pub fn create(path: &Path) -> GenResult<Self> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> GenResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn open_read_only(path: &Path) -> GenResult<Self> {
        if !path.is_file() {
            return Err(GenError::MissingInput(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Runs `f` inside one transaction; any error rolls everything back.
    pub fn in_transaction<T, F>(&self, f: F) -> GenResult<T>
    where
        F: FnOnce(&Self) -> GenResult<T>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(err)
            }
        }
    }

    pub fn seed_regions(&self) -> GenResult<RegionIds> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO REGION (region_name, region_code) VALUES (?1, ?2)")?;
        let mut ids = [0_i64; REGION_COUNT];
        for region in Region::ALL {
            stmt.execute(params![region.name(), region.code()])?;
            ids[region.index()] = self.conn.last_insert_rowid();
        }
        Ok(RegionIds(ids))
    }

    pub fn insert_platform(&self, name: &str) -> GenResult<i64> {
        self.insert_named("INSERT INTO PLATFORM (platform_name) VALUES (?1)", name)
    }

    pub fn insert_genre(&self, name: &str) -> GenResult<i64> {
        self.insert_named("INSERT INTO GENRE (genre_name) VALUES (?1)", name)
    }

    pub fn insert_publisher(&self, name: &str) -> GenResult<i64> {
        self.insert_named("INSERT INTO PUBLISHER (publisher_name) VALUES (?1)", name)
    }

    fn insert_named(&self, sql: &str, name: &str) -> GenResult<i64> {
        self.conn.prepare_cached(sql)?.execute(params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_title(
        &self,
        name: &str,
        release_year: i32,
        genre_id: i64,
        publisher_id: i64,
    ) -> GenResult<i64> {
        self.conn
            .prepare_cached(
                "INSERT INTO GAME (game_name, release_year, genre_id, publisher_id)
                 VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(params![name, release_year, genre_id, publisher_id])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_lifetime(
        &self,
        key: FactKey,
        region_ids: &RegionIds,
        fact: &LifetimeFact,
    ) -> GenResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO SALE
                    (game_id, platform_id, region_id, sales_million, sales_units, revenue_jpy)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?
            .execute(params![
                key.title_id,
                key.platform_id,
                region_ids.get(fact.region),
                fact.units_million,
                fact.units,
                fact.revenue,
            ])?;
        Ok(())
    }

    pub fn insert_monthly(
        &self,
        key: FactKey,
        region_ids: &RegionIds,
        fact: &MonthlyFact,
    ) -> GenResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO SaleMonthly
                    (game_id, platform_id, region_id, year_month,
                     sales_million, sales_units, revenue_jpy)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?
            .execute(params![
                key.title_id,
                key.platform_id,
                region_ids.get(fact.region),
                fact.year_month.to_string(),
                fact.units_million,
                fact.units,
                fact.revenue,
            ])?;
        Ok(())
    }

    pub fn count_rows(&self, table: StoreTable) -> GenResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn totals(&self) -> GenResult<StoreTotals> {
        Ok(StoreTotals {
            lifetime: self.fact_totals(StoreTable::Sale)?,
            monthly: self.fact_totals(StoreTable::SaleMonthly)?,
        })
    }

    fn fact_totals(&self, table: StoreTable) -> GenResult<FactTotals> {
        let sql = format!(
            "SELECT COUNT(*), COALESCE(SUM(sales_units), 0), COALESCE(SUM(revenue_jpy), 0)
             FROM {}",
            table.as_str()
        );
        let totals = self.conn.query_row(&sql, [], |row| {
            Ok(FactTotals {
                rows: row.get::<_, i64>(0)? as u64,
                units: row.get(1)?,
                revenue_jpy: row.get(2)?,
            })
        })?;
        Ok(totals)
    }

    /// Units sold in `[from, to]` (inclusive `YYYY-MM` bounds), zero when nothing matches.
    pub fn monthly_units_between(&self, from: &str, to: &str) -> GenResult<i64> {
        let units = self.conn.query_row(
            "SELECT COALESCE(SUM(sales_units), 0) FROM SaleMonthly
             WHERE year_month BETWEEN ?1 AND ?2",
            params![from, to],
            |row| row.get(0),
        )?;
        Ok(units)
    }

    /// Lifetime tuples whose monthly units add up to more than the lifetime figure.
    pub fn overdrawn_lifetime_tuples(&self) -> GenResult<Vec<OverdrawnTuple>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.game_id, s.platform_id, s.region_id, s.sales_units,
                    COALESCE(SUM(m.sales_units), 0) AS monthly_units
             FROM SALE s
             LEFT JOIN SaleMonthly m
               ON m.game_id = s.game_id
              AND m.platform_id = s.platform_id
              AND m.region_id = s.region_id
             GROUP BY s.game_id, s.platform_id, s.region_id, s.sales_units
             HAVING monthly_units > s.sales_units",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(OverdrawnTuple {
                    title_id: row.get(0)?,
                    platform_id: row.get(1)?,
                    region_id: row.get(2)?,
                    lifetime_units: row.get(3)?,
                    monthly_units: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Monthly rows whose (game, platform, region) has no lifetime row.
    pub fn orphan_monthly_rows(&self) -> GenResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM SaleMonthly m
             WHERE NOT EXISTS (
                SELECT 1 FROM SALE s
                WHERE s.game_id = m.game_id
                  AND s.platform_id = m.platform_id
                  AND s.region_id = m.region_id
             )",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    pub fn non_positive_fact_rows(&self, table: StoreTable) -> GenResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE sales_units <= 0",
            table.as_str()
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn distinct_year_months(&self) -> GenResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT year_month FROM SaleMonthly ORDER BY year_month")?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(values)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreTable {
    Platform,
    Region,
    Genre,
    Publisher,
    Game,
    Sale,
    SaleMonthly,
}

impl StoreTable {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "PLATFORM",
            Self::Region => "REGION",
            Self::Genre => "GENRE",
            Self::Publisher => "PUBLISHER",
            Self::Game => "GAME",
            Self::Sale => "SALE",
            Self::SaleMonthly => "SaleMonthly",
        }
    }
}
