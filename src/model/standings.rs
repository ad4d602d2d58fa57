use serde::{Deserialize, Serialize};

use super::match_record::Outcome;

/// Whether standings are aggregated per player or per team.
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
#[strum(serialize_all = "lowercase")]
pub enum StandingsMode {
    #[default]
    Player,
    Team,
}

/// Goal totals, tracked for teams only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalTotals {
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
}

/// One leaderboard line for a single player or team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Player name, or canonical team identity in team mode.
    pub subject: String,
    /// The player itself, or the team's players sorted by name.
    pub members: Vec<String>,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
    pub points_per_match: f64,
    pub win_percentage: f64,
    #[serde(flatten)]
    pub goals: Option<GoalTotals>,
}

impl AggregateRow {
    pub(crate) fn new(subject: String, members: Vec<String>, track_goals: bool) -> Self {
        Self {
            subject,
            members,
            matches_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0,
            points_per_match: 0.0,
            win_percentage: 0.0,
            goals: track_goals.then(GoalTotals::default),
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome, goals_for: u32, goals_against: u32) {
        self.matches_played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        self.points += outcome.points();
        if let Some(goals) = self.goals.as_mut() {
            goals.goals_for = goals.goals_for.saturating_add(u64::from(goals_for));
            goals.goals_against = goals.goals_against.saturating_add(u64::from(goals_against));
        }
    }

    /// Derive the ratio columns once all matches are recorded.
    pub(crate) fn finish(&mut self) {
        if self.matches_played > 0 {
            let played = f64::from(self.matches_played);
            self.points_per_match = f64::from(self.points) / played;
            self.win_percentage = f64::from(self.wins) / played * 100.0;
        } else {
            self.points_per_match = 0.0;
            self.win_percentage = 0.0;
        }
        if let Some(goals) = self.goals.as_mut() {
            goals.goal_difference =
                saturating_i64(goals.goals_for).saturating_sub(saturating_i64(goals.goals_against));
        }
    }
}

pub(crate) fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Podium place for the best three teams by win percentage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trophy {
    Gold,
    Silver,
    Bronze,
}

impl Trophy {
    /// Trophy for a zero-based rank, if it is on the podium.
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Trophy::Gold),
            1 => Some(Trophy::Silver),
            2 => Some(Trophy::Bronze),
            _ => None,
        }
    }

    pub fn medal(self) -> &'static str {
        match self {
            Trophy::Gold => "🥇",
            Trophy::Silver => "🥈",
            Trophy::Bronze => "🥉",
        }
    }
}

/// A team standings row placed in the win-percentage ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRanking {
    #[serde(flatten)]
    pub row: AggregateRow,
    pub trophy: Option<Trophy>,
}
