use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roster::Roster;
use crate::error::{LeagueError, Result};

/// Result of a match from one side's point of view.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Draw,
        }
    }

    /// League points: 3 for a win, 1 for a draw, 0 for a loss.
    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// Which column of a match record a roster was stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A single played match, validated at the feed boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Key the record was stored under in the feed, when known.
    pub key: Option<String>,
    pub team_a: Roster,
    pub team_b: Roster,
    pub score_a: u32,
    pub score_b: u32,
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Build a record, rejecting rosters that share a player.
    pub fn new(
        team_a: Roster,
        team_b: Roster,
        score_a: u32,
        score_b: u32,
        played_at: DateTime<Utc>,
    ) -> Result<Self> {
        if let Some(name) = team_a.shared_player(&team_b) {
            return Err(LeagueError::OverlappingRosters {
                name: name.to_string(),
            });
        }
        Ok(Self {
            key: None,
            team_a,
            team_b,
            score_a,
            score_b,
            played_at,
        })
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub fn outcome(&self, side: Side) -> Outcome {
        Outcome::from_goals(self.goals(side), self.goals(side.opposite()))
    }

    /// The side `player` played on, if they took part.
    pub fn side_of(&self, player: &str) -> Option<Side> {
        if self.team_a.contains(player) {
            Some(Side::A)
        } else if self.team_b.contains(player) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, player: &str) -> bool {
        self.side_of(player).is_some()
    }

    /// Score in stored column order, e.g. `"5 : 3"`.
    pub fn score(&self) -> String {
        format!("{} : {}", self.score_a, self.score_b)
    }
}
