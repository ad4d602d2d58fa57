use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::match_record::Outcome;
use super::match_row::MatchScope;
use crate::error::{LeagueError, Result};

/// Buckets offered for the matches-played and points filters.
pub const COUNT_BUCKETS: [&str; 11] = [
    "0-10", "10-20", "20-30", "30-40", "40-50", "50-60", "60-70", "70-80", "80-90", "90-100",
    "100<",
];

/// Buckets offered for the points-per-match filter.
pub const POINTS_PER_MATCH_BUCKETS: [&str; 3] = ["0-1", "1-2", "2-3"];

/// A numeric range predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeFilter {
    /// `min <= value <= max`.
    Between { min: f64, max: f64 },
    /// `value > threshold`, written `"100<"`.
    Above(f64),
}

impl RangeFilter {
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            RangeFilter::Between { min, max } => value >= min && value <= max,
            RangeFilter::Above(threshold) => value > threshold,
        }
    }
}

impl FromStr for RangeFilter {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = || LeagueError::InvalidRange(s.to_string());
        if let Some(threshold) = text.strip_suffix('<') {
            let threshold = threshold.trim().parse().map_err(|_| invalid())?;
            return Ok(RangeFilter::Above(threshold));
        }
        let (min, max) = text.split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max: f64 = max.trim().parse().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(RangeFilter::Between { min, max })
    }
}

/// Filters chosen in a table view. Every set criterion must hold for a row
/// to be kept; criteria a row kind does not carry are ignored for it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Player name or team (`"Alice & Bob"`, any order).
    pub subject: Option<String>,
    pub matches_played: Option<RangeFilter>,
    pub points: Option<RangeFilter>,
    pub points_per_match: Option<RangeFilter>,
    pub outcome: Option<Outcome>,
    /// Inclusive lower bound on the match time.
    pub played_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the match time.
    pub played_to: Option<DateTime<Utc>>,
    pub scope: MatchScope,
}

impl FilterCriteria {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_matches_played(mut self, range: RangeFilter) -> Self {
        self.matches_played = Some(range);
        self
    }

    pub fn with_points(mut self, range: RangeFilter) -> Self {
        self.points = Some(range);
        self
    }

    pub fn with_points_per_match(mut self, range: RangeFilter) -> Self {
        self.points_per_match = Some(range);
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_played_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.played_from = from;
        self.played_to = to;
        self
    }

    pub fn with_scope(mut self, scope: MatchScope) -> Self {
        self.scope = scope;
        self
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[default]
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sortable columns of the standings tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StandingsField {
    #[strum(to_string = "subject", serialize = "player", serialize = "players")]
    Subject,
    #[strum(to_string = "matchesPlayed", serialize = "matches")]
    MatchesPlayed,
    Wins,
    #[strum(to_string = "losses", serialize = "looses")]
    Losses,
    Draws,
    Points,
    PointsPerMatch,
    WinPercentage,
    GoalsFor,
    GoalsAgainst,
    GoalDifference,
}

/// Sortable columns of the match listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MatchField {
    Team,
    Rival,
    Score,
    Outcome,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: F) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Header click: ascending first, descending when the column is
    /// already sorted ascending.
    pub fn toggle(self, field: F) -> Self {
        if self.field == field && self.direction == SortDirection::Ascending {
            Self::descending(field)
        } else {
            Self::ascending(field)
        }
    }
}

impl<F> SortSpec<F>
where
    F: Copy + PartialEq + FromStr<Err = strum::ParseError>,
{
    /// Parse a column id and direction as a table widget sends them, e.g.
    /// `("pointsPerMatch", "desc")`.
    pub fn parse(field: &str, direction: &str) -> Result<Self> {
        Ok(Self::new(field.trim().parse()?, direction.trim().parse()?))
    }
}

impl Default for SortSpec<StandingsField> {
    fn default() -> Self {
        Self::descending(StandingsField::PointsPerMatch)
    }
}

impl Default for SortSpec<MatchField> {
    fn default() -> Self {
        Self::descending(MatchField::Date)
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    All,
    Rows(usize),
}

impl PageSize {
    /// A page of `rows` rows; zero rows means "all rows".
    pub fn rows(rows: usize) -> Self {
        if rows == 0 {
            PageSize::All
        } else {
            PageSize::Rows(rows)
        }
    }
}

impl From<i64> for PageSize {
    /// Negative sizes (`-1` in table widgets) and zero mean "all rows".
    fn from(size: i64) -> Self {
        usize::try_from(size).map_or(PageSize::All, PageSize::rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub index: usize,
    pub size: PageSize,
}

impl PageRequest {
    pub fn new(index: usize, size: impl Into<PageSize>) -> Self {
        Self {
            index,
            size: size.into(),
        }
    }

    pub fn all() -> Self {
        Self::new(0, PageSize::All)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, PageSize::Rows(DEFAULT_PAGE_SIZE))
    }
}

/// A row with its 1-based position in the sorted, filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub position: usize,
    #[serde(flatten)]
    pub row: T,
}

/// One page of a table plus the filtered row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<Ranked<T>>,
    pub total_count: usize,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        match self.request.size {
            PageSize::All | PageSize::Rows(0) => usize::from(self.total_count > 0),
            PageSize::Rows(rows) => self.total_count.div_ceil(rows),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|ranked| &ranked.row)
    }
}
