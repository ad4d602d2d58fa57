use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};

/// Separator between player names in free-text rosters (`"Alice & Bob"`).
pub const ROSTER_SEPARATOR: char = '&';

const DISPLAY_SEPARATOR: &str = " & ";

/// The players forming one side of a match, in the order they were recorded.
///
/// A roster is never empty, holds no duplicate names, and no name contains
/// [`ROSTER_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    /// Build a roster from individual names. Names are trimmed, blank
    /// names are dropped and repeated names are kept once.
    pub fn new<I, S>(players: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for player in players {
            let name = player.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if name.contains(ROSTER_SEPARATOR) {
                return Err(LeagueError::InvalidPlayerName {
                    name: name.to_string(),
                });
            }
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            return Err(LeagueError::EmptyRoster);
        }
        Ok(Self(names))
    }

    /// Parse a free-text roster such as `"Alice & Bob"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.split(ROSTER_SEPARATOR))
    }

    /// Names in recorded order.
    pub fn players(&self) -> &[String] {
        &self.0
    }

    /// Number of players, 1 for a solo side.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a validated roster.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|p| p == player)
    }

    /// The first other player on this roster, if `player` is on it and has a partner.
    pub fn partner_of(&self, player: &str) -> Option<&str> {
        if !self.contains(player) {
            return None;
        }
        self.0.iter().map(String::as_str).find(|p| *p != player)
    }

    /// A player present on both rosters, if any.
    pub fn shared_player<'a>(&'a self, other: &Roster) -> Option<&'a str> {
        self.0
            .iter()
            .map(String::as_str)
            .find(|p| other.contains(p))
    }

    /// Player names sorted by code point.
    pub fn sorted_players(&self) -> Vec<String> {
        self.0.iter().sorted().cloned().collect_vec()
    }

    /// Order-independent identity of this roster.
    pub fn team_id(&self) -> TeamId {
        TeamId(self.0.iter().sorted().join(DISPLAY_SEPARATOR))
    }

    /// Whether this roster is the team named by `subject` (any player order)
    /// or, for a single name, whether that player is on it.
    pub fn matches_subject(&self, subject: &str) -> bool {
        if subject.contains(ROSTER_SEPARATOR) {
            Roster::parse(subject).is_ok_and(|r| r.team_id() == self.team_id())
        } else {
            self.contains(subject.trim())
        }
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(DISPLAY_SEPARATOR))
    }
}

impl FromStr for Roster {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Order-independent identity of a roster: its names sorted and joined
/// with `" & "`, so `{Alice, Bob}` and `{Bob, Alice}` are the same team.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TeamId {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Roster::parse(s)?.team_id())
    }
}

impl From<&Roster> for TeamId {
    fn from(roster: &Roster) -> Self {
        roster.team_id()
    }
}

/// Canonical form of a player or team name typed by a user.
pub(crate) fn canonical_subject(subject: &str) -> Cow<'_, str> {
    if subject.contains(ROSTER_SEPARATOR) {
        match Roster::parse(subject) {
            Ok(roster) => Cow::Owned(roster.team_id().0),
            Err(_) => Cow::Borrowed(subject.trim()),
        }
    } else {
        Cow::Borrowed(subject.trim())
    }
}
