//! Dataset Schema Module
//! File names, era constants, and the query parameter types.

/// Conventional location of the dataset relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "march-ml-mania-dataset";

/// First season covered by the detailed results files. Compact rows from
/// this season onward duplicate detailed rows and are dropped when the two
/// eras are merged.
pub const DETAILED_ERA_START: i32 = 2003;

pub(crate) const TEAMS_FILE: &str = "Teams.csv";
pub(crate) const SEASONS_FILE: &str = "Seasons.csv";
pub(crate) const REGULAR_COMPACT_FILE: &str = "RegularSeasonCompactResults.csv";
pub(crate) const REGULAR_DETAILED_FILE: &str = "RegularSeasonDetailedResults.csv";
pub(crate) const TOURNEY_COMPACT_FILE: &str = "TourneyCompactResults.csv";
pub(crate) const TOURNEY_DETAILED_FILE: &str = "TourneyDetailedResults.csv";
pub(crate) const SEEDS_FILE: &str = "TourneySeeds.csv";
pub(crate) const SLOTS_FILE: &str = "TourneySlots.csv";

/// Which column subset a game query projects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSet {
    /// Teams, scores, location, overtime count.
    Compact,
    /// Compact columns plus the per-team box-score statistics.
    Detailed,
}

impl Default for ColumnSet {
    fn default() -> Self {
        ColumnSet::Compact
    }
}

/// Season restriction for game queries.
///
/// Replaces an "integer, list of integers, or nothing" parameter with an
/// explicit variant so call sites state what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonFilter {
    /// Every season in the merged tables.
    All,
    Single(i32),
    Years(Vec<i32>),
}

impl Default for SeasonFilter {
    fn default() -> Self {
        SeasonFilter::All
    }
}

impl From<i32> for SeasonFilter {
    fn from(year: i32) -> Self {
        SeasonFilter::Single(year)
    }
}

impl From<Vec<i32>> for SeasonFilter {
    fn from(years: Vec<i32>) -> Self {
        SeasonFilter::Years(years)
    }
}

impl From<&[i32]> for SeasonFilter {
    fn from(years: &[i32]) -> Self {
        SeasonFilter::Years(years.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for SeasonFilter {
    fn from(years: [i32; N]) -> Self {
        SeasonFilter::Years(years.to_vec())
    }
}

/// Check that the detailed header list extends the compact one: strictly
/// larger, and containing every compact column in the same relative order.
/// Returns a description of the first violation.
pub(crate) fn validate_header_extension(
    compact: &[String],
    detailed: &[String],
) -> Result<(), String> {
    if detailed.len() <= compact.len() {
        return Err(format!(
            "detailed schema has {} columns, compact has {}",
            detailed.len(),
            compact.len()
        ));
    }

    let mut remaining = detailed.iter();
    for name in compact {
        if !remaining.any(|d| d == name) {
            return Err(format!("compact column {name:?} missing or out of order"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detailed_extending_compact_is_accepted() {
        let compact = names(&["Season", "Wteam", "Lteam"]);
        let detailed = names(&["Season", "Wteam", "Lteam", "Wfgm", "Lfgm"]);
        assert!(validate_header_extension(&compact, &detailed).is_ok());
    }

    #[test]
    fn interleaved_extra_columns_are_accepted() {
        let compact = names(&["Season", "Wteam", "Lteam"]);
        let detailed = names(&["Season", "Daynum", "Wteam", "Wfgm", "Lteam"]);
        assert!(validate_header_extension(&compact, &detailed).is_ok());
    }

    #[test]
    fn equal_schemas_are_rejected() {
        let headers = names(&["Season", "Wteam", "Lteam"]);
        assert!(validate_header_extension(&headers, &headers).is_err());
    }

    #[test]
    fn reordered_columns_are_rejected() {
        let compact = names(&["Season", "Wteam", "Lteam"]);
        let detailed = names(&["Season", "Lteam", "Wteam", "Wfgm"]);
        assert!(validate_header_extension(&compact, &detailed).is_err());
    }

    #[test]
    fn missing_compact_column_is_rejected() {
        let compact = names(&["Season", "Wteam", "Lteam"]);
        let detailed = names(&["Season", "Wteam", "Wfgm", "Lfgm"]);
        assert!(validate_header_extension(&compact, &detailed).is_err());
    }

    #[test]
    fn season_filter_conversions() {
        assert_eq!(SeasonFilter::from(2005), SeasonFilter::Single(2005));
        assert_eq!(
            SeasonFilter::from(vec![2010, 2011]),
            SeasonFilter::Years(vec![2010, 2011])
        );
        assert_eq!(
            SeasonFilter::from([2010, 2011]),
            SeasonFilter::Years(vec![2010, 2011])
        );
        assert_eq!(SeasonFilter::default(), SeasonFilter::All);
        assert_eq!(ColumnSet::default(), ColumnSet::Compact);
    }
}
