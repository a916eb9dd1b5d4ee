//! March Mania - NCAA basketball dataset access
//!
//! Loads the march-ml-mania CSV files (teams, seasons, regular-season and
//! tournament results, bracket seeds and slots) into Polars DataFrames and
//! exposes season-filtered queries over the merged result tables.
//!
//! ```no_run
//! use march_mania::{ColumnSet, Dataset, SeasonFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ds = Dataset::open_default()?;
//! println!("{}", ds.team(1314)?);
//! let games = ds.regular_games(2005, ColumnSet::Compact)?;
//! let detailed = ds.tourney_games(SeasonFilter::All, ColumnSet::Detailed)?;
//! # Ok(())
//! # }
//! ```

pub mod data;

pub use data::{ColumnSet, Dataset, LoadError, QueryError, SeasonFilter};
