//! Dataset Module
//! The in-memory dataset: construction from a data directory and the
//! season-filtered query surface.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::loader::{self, LoadError};
use super::schema::{
    self, ColumnSet, SeasonFilter, REGULAR_COMPACT_FILE, REGULAR_DETAILED_FILE, SEASONS_FILE,
    SEEDS_FILE, SLOTS_FILE, TEAMS_FILE, TOURNEY_COMPACT_FILE, TOURNEY_DETAILED_FILE,
};

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("unknown team id: {0}")]
    UnknownTeam(u32),
    #[error("detailed columns are not loaded")]
    DetailedUnavailable,
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Parsed march-ml-mania dataset.
///
/// Construction reads the eight CSV files from one directory, stacks the
/// pre-2003 compact result rows on top of the detailed rows for both the
/// regular season and the tournament, and keeps everything in memory.
/// Instances never change after construction, so sharing one across
/// threads behind a reference is safe.
///
/// See <https://www.kaggle.com/c/march-machine-learning-mania-2017/data>
/// for the column-by-column description of the source files.
pub struct Dataset {
    data_dir: PathBuf,
    regular_results: DataFrame,
    tourney_results: DataFrame,
    compact_headers: Vec<String>,
    detailed_headers: Vec<String>,
    teams: HashMap<u32, String>,
    seasons: DataFrame,
    seeds: DataFrame,
    slots: DataFrame,
}

impl Dataset {
    /// Load the dataset from the given directory.
    ///
    /// Fails if any input file is missing or unparseable, or if the
    /// detailed result files do not extend the compact schema.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let data_dir = data_dir.into();
        info!(dir = %data_dir.display(), "loading march-ml-mania dataset");

        let regular_compact = loader::read_table(&data_dir, REGULAR_COMPACT_FILE)?;
        let tourney_compact = loader::read_table(&data_dir, TOURNEY_COMPACT_FILE)?;
        let regular_detailed = loader::read_table(&data_dir, REGULAR_DETAILED_FILE)?;
        let tourney_detailed = loader::read_table(&data_dir, TOURNEY_DETAILED_FILE)?;

        for (df, file) in [
            (&regular_compact, REGULAR_COMPACT_FILE),
            (&tourney_compact, TOURNEY_COMPACT_FILE),
            (&regular_detailed, REGULAR_DETAILED_FILE),
            (&tourney_detailed, TOURNEY_DETAILED_FILE),
        ] {
            loader::require_columns(df, file, &["Season"])?;
        }

        let compact_headers = loader::header_names(&regular_compact);
        let detailed_headers = loader::header_names(&regular_detailed);

        schema::validate_header_extension(&compact_headers, &detailed_headers)
            .map_err(|reason| LoadError::HeaderMismatch { reason })?;
        if loader::header_names(&tourney_compact) != compact_headers {
            return Err(LoadError::HeaderMismatch {
                reason: "tournament compact columns differ from regular-season compact columns"
                    .to_string(),
            });
        }
        if loader::header_names(&tourney_detailed) != detailed_headers {
            return Err(LoadError::HeaderMismatch {
                reason: "tournament detailed columns differ from regular-season detailed columns"
                    .to_string(),
            });
        }

        let regular_results = loader::merge_result_eras(&regular_compact, &regular_detailed)?;
        let tourney_results = loader::merge_result_eras(&tourney_compact, &tourney_detailed)?;

        let teams_df = loader::read_table(&data_dir, TEAMS_FILE)?;
        let teams = team_directory(&teams_df)?;

        let seasons = loader::read_table(&data_dir, SEASONS_FILE)?;
        loader::require_columns(&seasons, SEASONS_FILE, &["Season"])?;

        let seeds = loader::read_table(&data_dir, SEEDS_FILE)?;
        loader::require_columns(&seeds, SEEDS_FILE, &["Season", "Seed", "Team"])?;

        let slots = loader::read_table(&data_dir, SLOTS_FILE)?;
        loader::require_columns(&slots, SLOTS_FILE, &["Season"])?;

        info!(
            teams = teams.len(),
            regular_games = regular_results.height(),
            tourney_games = tourney_results.height(),
            "dataset loaded"
        );

        Ok(Self {
            data_dir,
            regular_results,
            tourney_results,
            compact_headers,
            detailed_headers,
            teams,
            seasons,
            seeds,
            slots,
        })
    }

    /// Load the dataset from [`DEFAULT_DATA_DIR`](crate::data::DEFAULT_DATA_DIR).
    pub fn open_default() -> Result<Self, LoadError> {
        Self::open(schema::DEFAULT_DATA_DIR)
    }

    /// Name of the team with the given id.
    pub fn team(&self, id: u32) -> Result<&str, QueryError> {
        self.teams
            .get(&id)
            .map(String::as_str)
            .ok_or(QueryError::UnknownTeam(id))
    }

    /// Distinct season years, in season-file row order.
    ///
    /// The source file is not guaranteed chronological and the order is
    /// preserved as-is. Returns a fresh vector on every call.
    pub fn years(&self) -> Result<Vec<i32>, QueryError> {
        let unique = self
            .seasons
            .column("Season")?
            .as_materialized_series()
            .unique_stable()?;
        Ok(unique
            .i64()?
            .into_no_null_iter()
            .map(|year| year as i32)
            .collect())
    }

    /// Tournament seed label for every seeded team of one season.
    ///
    /// A season with no seed rows yields an empty map. Should a team appear
    /// twice within one season, the last row wins.
    pub fn seeds_for(&self, season: i32) -> Result<HashMap<u32, String>, QueryError> {
        let rows = self
            .seeds
            .clone()
            .lazy()
            .filter(col("Season").eq(lit(season)))
            .collect()?;

        let teams = rows.column("Team")?.i64()?;
        let seeds = rows.column("Seed")?.str()?;

        let mut map = HashMap::with_capacity(rows.height());
        for (team, seed) in teams.into_iter().zip(seeds.into_iter()) {
            if let (Some(team), Some(seed)) = (team, seed) {
                map.insert(team as u32, seed.to_string());
            }
        }
        Ok(map)
    }

    /// Regular-season games, filtered to the given seasons and projected to
    /// the given column set. Seasons absent from the data yield zero rows.
    pub fn regular_games(
        &self,
        seasons: impl Into<SeasonFilter>,
        columns: ColumnSet,
    ) -> Result<DataFrame, QueryError> {
        self.games(&self.regular_results, &seasons.into(), columns)
    }

    /// Tournament games, filtered and projected like
    /// [`regular_games`](Self::regular_games).
    pub fn tourney_games(
        &self,
        seasons: impl Into<SeasonFilter>,
        columns: ColumnSet,
    ) -> Result<DataFrame, QueryError> {
        self.games(&self.tourney_results, &seasons.into(), columns)
    }

    fn games(
        &self,
        results: &DataFrame,
        seasons: &SeasonFilter,
        columns: ColumnSet,
    ) -> Result<DataFrame, QueryError> {
        let headers = match columns {
            ColumnSet::Compact => &self.compact_headers,
            ColumnSet::Detailed => {
                // Unreachable after a successful load.
                if self.detailed_headers.len() <= self.compact_headers.len() {
                    return Err(QueryError::DetailedUnavailable);
                }
                &self.detailed_headers
            }
        };

        let mut lf = results.clone().lazy();
        match seasons {
            SeasonFilter::All => {}
            SeasonFilter::Single(year) => {
                lf = lf.filter(col("Season").eq(lit(*year)));
            }
            SeasonFilter::Years(years) => {
                let years: Vec<i64> = years.iter().map(|&year| year as i64).collect();
                lf = lf.filter(col("Season").is_in(lit(Series::new("Season".into(), years))));
            }
        }

        let projection: Vec<Expr> = headers.iter().map(|name| col(name.as_str())).collect();
        Ok(lf.select(projection).collect()?)
    }

    /// Team id to team name directory.
    pub fn teams(&self) -> &HashMap<u32, String> {
        &self.teams
    }

    /// Season and region metadata, one row per season.
    pub fn seasons(&self) -> &DataFrame {
        &self.seasons
    }

    /// Tournament seed rows, one per (season, team).
    pub fn seeds(&self) -> &DataFrame {
        &self.seeds
    }

    /// Tournament bracket layout, one row per slot.
    pub fn slots(&self) -> &DataFrame {
        &self.slots
    }

    /// Merged regular-season results across both eras.
    pub fn regular_results(&self) -> &DataFrame {
        &self.regular_results
    }

    /// Merged tournament results across both eras.
    pub fn tourney_results(&self) -> &DataFrame {
        &self.tourney_results
    }

    /// Column names of the compact results schema.
    pub fn compact_headers(&self) -> &[String] {
        &self.compact_headers
    }

    /// Column names of the detailed results schema.
    pub fn detailed_headers(&self) -> &[String] {
        &self.detailed_headers
    }

    /// Directory the dataset was loaded from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Build the team id to name map from the teams frame.
fn team_directory(df: &DataFrame) -> Result<HashMap<u32, String>, LoadError> {
    loader::require_columns(df, TEAMS_FILE, &["Team_Id", "Team_Name"])?;

    let ids = df
        .column("Team_Id")
        .and_then(|column| column.i64())
        .map_err(|source| LoadError::Column {
            file: TEAMS_FILE,
            source,
        })?;
    let names = df
        .column("Team_Name")
        .and_then(|column| column.str())
        .map_err(|source| LoadError::Column {
            file: TEAMS_FILE,
            source,
        })?;

    let mut teams = HashMap::with_capacity(df.height());
    for (id, name) in ids.into_iter().zip(names.into_iter()) {
        if let (Some(id), Some(name)) = (id, name) {
            teams.insert(id as u32, name.to_string());
        }
    }
    Ok(teams)
}
