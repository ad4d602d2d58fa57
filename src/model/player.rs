use serde::Serialize;

use super::match_record::Outcome;

/// Placeholder shown as the last result of a player without matches.
pub const NO_RESULT: &str = "-";

/// Headline numbers for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    /// Score of the most recent match, e.g. `"5 : 3"`, or [`NO_RESULT`].
    pub last_result: String,
    /// Matches played in the calendar week (Monday to Monday) of the reference instant.
    pub week_matches: u32,
    pub win_percent: u32,
    /// Mean goals of the player's side, rounded to one decimal.
    pub avg_goals: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            last_result: NO_RESULT.to_string(),
            week_matches: 0,
            win_percent: 0,
            avg_goals: 0.0,
        }
    }
}

/// Win/loss/draw counts, the feed of the outcome chart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn points(&self) -> u32 {
        self.wins * Outcome::Win.points() + self.draws * Outcome::Draw.points()
    }
}

/// Form over a player's most recent matches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct RecentForm {
    pub matches: u32,
    pub wins: u32,
    pub points_per_match: f64,
}

/// How a player fared alongside one partner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerRow {
    /// `None` when the player was alone on their side.
    pub partner: Option<String>,
    pub matches: u32,
    pub wins: u32,
    pub points: u32,
    pub points_per_match: f64,
}

impl PartnerRow {
    /// Partner name, or `"Solo"`.
    pub fn label(&self) -> &str {
        self.partner.as_deref().unwrap_or("Solo")
    }
}

/// Metric used to rank partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "camelCase")]
pub enum PartnerMetric {
    Matches,
    Wins,
    Points,
    PointsPerMatch,
}

/// Per-partner results of one player, in order of first appearance.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PartnerBreakdown {
    pub rows: Vec<PartnerRow>,
}

impl PartnerBreakdown {
    /// Rows ordered by `metric`, highest first; ties keep first appearance.
    pub fn ranked_by(&self, metric: PartnerMetric) -> Vec<&PartnerRow> {
        let mut ranked: Vec<&PartnerRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| metric_value(b, metric).total_cmp(&metric_value(a, metric)));
        ranked
    }

    pub fn top(&self, metric: PartnerMetric, n: usize) -> Vec<&PartnerRow> {
        let mut ranked = self.ranked_by(metric);
        ranked.truncate(n);
        ranked
    }

    pub fn best(&self, metric: PartnerMetric) -> Option<&PartnerRow> {
        self.ranked_by(metric).first().copied()
    }

    pub fn worst(&self, metric: PartnerMetric) -> Option<&PartnerRow> {
        self.ranked_by(metric).last().copied()
    }

    pub fn total_matches(&self) -> u32 {
        self.rows.iter().map(|r| r.matches).sum()
    }
}

fn metric_value(row: &PartnerRow, metric: PartnerMetric) -> f64 {
    match metric {
        PartnerMetric::Matches => f64::from(row.matches),
        PartnerMetric::Wins => f64::from(row.wins),
        PartnerMetric::Points => f64::from(row.points),
        PartnerMetric::PointsPerMatch => row.points_per_match,
    }
}

/// Everything the statistics view shows for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: String,
    pub outcomes: OutcomeCounts,
    pub total_points: u32,
    pub points_per_match: f64,
    pub win_percentage: f64,
    pub recent_form: RecentForm,
    pub partners: PartnerBreakdown,
}
