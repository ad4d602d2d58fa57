use tracing::{debug, instrument};

use super::listing::newest_first;
use crate::model::{
    MatchRecord, Outcome, OutcomeCounts, PartnerBreakdown, PartnerRow, PlayerProfile, RecentForm,
};

/// Number of most recent matches that make up a player's form.
pub const RECENT_FORM_WINDOW: usize = 5;

/// Outcome counts, points, recent form and partners of `player`.
#[instrument(skip(matches), fields(matches = matches.len()))]
pub fn player_profile(matches: &[MatchRecord], player: &str) -> PlayerProfile {
    let mut outcomes = OutcomeCounts::default();
    for record in matches {
        if let Some(side) = record.side_of(player) {
            outcomes.record(record.outcome(side));
        }
    }

    let mut recent = OutcomeCounts::default();
    newest_first(matches.iter().filter(|m| m.involves(player)))
        .into_iter()
        .take(RECENT_FORM_WINDOW)
        .filter_map(|m| m.side_of(player).map(|side| m.outcome(side)))
        .for_each(|outcome| recent.record(outcome));

    let total = outcomes.total();
    let total_points = outcomes.points();
    PlayerProfile {
        player: player.to_string(),
        outcomes,
        total_points,
        points_per_match: ratio(total_points, total),
        win_percentage: ratio(outcomes.wins, total) * 100.0,
        recent_form: RecentForm {
            matches: recent.total(),
            wins: recent.wins,
            points_per_match: ratio(recent.points(), recent.total()),
        },
        partners: partner_breakdown(matches, player),
    }
}

/// Results of `player` grouped by the partner they played with, in order of
/// first appearance. Sides where the player was alone count under `None`.
#[instrument(skip(matches), fields(matches = matches.len()))]
pub fn partner_breakdown(matches: &[MatchRecord], player: &str) -> PartnerBreakdown {
    let mut rows: Vec<PartnerRow> = Vec::new();
    for record in matches {
        let Some(side) = record.side_of(player) else {
            continue;
        };
        let partner = record.roster(side).partner_of(player);
        let idx = match rows.iter().position(|r| r.partner.as_deref() == partner) {
            Some(idx) => idx,
            None => {
                rows.push(PartnerRow {
                    partner: partner.map(str::to_string),
                    matches: 0,
                    wins: 0,
                    points: 0,
                    points_per_match: 0.0,
                });
                rows.len() - 1
            }
        };
        let outcome = record.outcome(side);
        let row = &mut rows[idx];
        row.matches += 1;
        row.points += outcome.points();
        if outcome == Outcome::Win {
            row.wins += 1;
        }
    }
    for row in &mut rows {
        row.points_per_match = ratio(row.points, row.matches);
    }
    debug!(partners = rows.len(), "built partner breakdown");
    PartnerBreakdown { rows }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}
