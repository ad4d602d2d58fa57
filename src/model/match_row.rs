use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::match_record::{MatchRecord, Outcome, Side};
use super::roster::Roster;

/// Whether a match listing shows every match or only those of one player.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchScope {
    #[default]
    All,
    Mine(String),
}

impl MatchScope {
    pub fn perspective(&self) -> Option<&str> {
        match self {
            MatchScope::All => None,
            MatchScope::Mine(player) => Some(player),
        }
    }
}

/// A match as one side saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRow {
    pub key: Option<String>,
    pub team: Roster,
    pub rival: Roster,
    pub goals_for: u32,
    pub goals_against: u32,
    pub outcome: Outcome,
    pub played_at: DateTime<Utc>,
}

impl MatchRow {
    pub fn from_side(record: &MatchRecord, side: Side) -> Self {
        Self {
            key: record.key.clone(),
            team: record.roster(side).clone(),
            rival: record.roster(side.opposite()).clone(),
            goals_for: record.goals(side),
            goals_against: record.goals(side.opposite()),
            outcome: record.outcome(side),
            played_at: record.played_at,
        }
    }

    /// Score from `team`'s side, e.g. `"1 : 4"`.
    pub fn score(&self) -> String {
        format!("{} : {}", self.goals_for, self.goals_against)
    }

    pub fn involves(&self, player: &str) -> bool {
        self.team.contains(player) || self.rival.contains(player)
    }
}
