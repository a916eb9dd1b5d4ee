//! Data module - CSV loading and season queries

mod dataset;
mod loader;
mod schema;

pub use dataset::{Dataset, QueryError};
pub use loader::LoadError;
pub use schema::{ColumnSet, SeasonFilter, DEFAULT_DATA_DIR, DETAILED_ERA_START};
