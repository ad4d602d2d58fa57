use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::model::{
    canonical_subject, saturating_i64, AggregateRow, FilterCriteria, MatchField, MatchRow,
    MatchScope, Page, PageRequest, PageSize, RangeFilter, Ranked, SortSpec, StandingsField,
};

/// A value a table column sorts by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Integer(i64),
    Number(f64),
    Text(Cow<'a, str>),
    Time(DateTime<Utc>),
}

impl SortValue<'_> {
    /// Numbers compare numerically, text by code point, times chronologically.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            SortValue::Integer(v) => Some(*v as f64),
            SortValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// A row kind that can be filtered, sorted and paginated.
pub trait TableRow {
    type Field: Copy;

    fn sort_value(&self, field: Self::Field) -> SortValue<'_>;

    /// Whether the row passes every criterion that applies to this row kind.
    fn satisfies(&self, criteria: &FilterCriteria) -> bool;
}

fn in_range(range: Option<RangeFilter>, value: f64) -> bool {
    range.map_or(true, |r| r.contains(value))
}

impl TableRow for AggregateRow {
    type Field = StandingsField;

    fn sort_value(&self, field: StandingsField) -> SortValue<'_> {
        let goals = self.goals.unwrap_or_default();
        match field {
            StandingsField::Subject => SortValue::Text(Cow::Borrowed(&self.subject)),
            StandingsField::MatchesPlayed => SortValue::Integer(self.matches_played.into()),
            StandingsField::Wins => SortValue::Integer(self.wins.into()),
            StandingsField::Losses => SortValue::Integer(self.losses.into()),
            StandingsField::Draws => SortValue::Integer(self.draws.into()),
            StandingsField::Points => SortValue::Integer(self.points.into()),
            StandingsField::PointsPerMatch => SortValue::Number(self.points_per_match),
            StandingsField::WinPercentage => SortValue::Number(self.win_percentage),
            StandingsField::GoalsFor => SortValue::Integer(saturating_i64(goals.goals_for)),
            StandingsField::GoalsAgainst => SortValue::Integer(saturating_i64(goals.goals_against)),
            StandingsField::GoalDifference => SortValue::Integer(goals.goal_difference),
        }
    }

    fn satisfies(&self, criteria: &FilterCriteria) -> bool {
        let subject_ok = criteria.subject.as_deref().map_or(true, |subject| {
            let subject = canonical_subject(subject);
            self.subject == subject || self.members.iter().any(|m| *m == subject)
        });
        subject_ok
            && in_range(criteria.matches_played, self.matches_played.into())
            && in_range(criteria.points, self.points.into())
            && in_range(criteria.points_per_match, self.points_per_match)
    }
}

impl TableRow for MatchRow {
    type Field = MatchField;

    fn sort_value(&self, field: MatchField) -> SortValue<'_> {
        match field {
            MatchField::Team => SortValue::Text(Cow::Owned(self.team.to_string())),
            MatchField::Rival => SortValue::Text(Cow::Owned(self.rival.to_string())),
            MatchField::Score => SortValue::Text(Cow::Owned(self.score())),
            MatchField::Outcome => SortValue::Text(Cow::Owned(self.outcome.to_string())),
            MatchField::Date => SortValue::Time(self.played_at),
        }
    }

    fn satisfies(&self, criteria: &FilterCriteria) -> bool {
        let scope_ok = match &criteria.scope {
            MatchScope::All => true,
            MatchScope::Mine(player) => self.involves(player),
        };
        let subject_ok = criteria.subject.as_deref().map_or(true, |subject| {
            self.team.matches_subject(subject) || self.rival.matches_subject(subject)
        });
        scope_ok
            && subject_ok
            && criteria.outcome.map_or(true, |o| self.outcome == o)
            && criteria.played_from.map_or(true, |from| self.played_at >= from)
            && criteria.played_to.map_or(true, |to| self.played_at <= to)
    }
}

/// Keep the rows passing `criteria`, sort them stably by `sort`, number them
/// from 1 and cut out the requested page.
///
/// A page past the end is empty. `total_count` is the number of rows that
/// passed the filters.
#[instrument(skip_all, fields(rows = rows.len(), page = request.index))]
pub fn filter_sort_paginate<T>(
    rows: &[T],
    criteria: &FilterCriteria,
    sort: &SortSpec<T::Field>,
    request: &PageRequest,
) -> Page<T>
where
    T: TableRow + Clone,
{
    let mut kept = rows.iter().filter(|row| row.satisfies(criteria)).collect_vec();
    kept.sort_by(|a, b| {
        let ordering = a.sort_value(sort.field).compare(&b.sort_value(sort.field));
        sort.direction.apply(ordering)
    });
    let total_count = kept.len();

    let (skip, take) = match request.size {
        PageSize::Rows(size) if size > 0 => (request.index.saturating_mul(size), size),
        _ if request.index == 0 => (0, total_count),
        _ => (total_count, 0),
    };
    let items = kept
        .into_iter()
        .enumerate()
        .skip(skip)
        .take(take)
        .map(|(idx, row)| Ranked {
            position: idx + 1,
            row: row.clone(),
        })
        .collect_vec();

    debug!(total_count, returned = items.len(), "paginated table");
    Page {
        items,
        total_count,
        request: *request,
    }
}
