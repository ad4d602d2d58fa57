use std::sync::OnceLock;

use chrono::{DateTime, TimeZone};
use tracing::{debug, instrument};

use crate::config::DashboardConfig;
use crate::engine;
use crate::feed::Snapshot;
use crate::model::*;

/// The main entry point for building league views.
///
/// `Dashboard` holds the latest [`Snapshot`] of matches and derives
/// standings, match tables and player statistics from it. Standings are
/// computed once per snapshot version and reused until the next snapshot
/// is applied.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use league_standings::{Dashboard, FilterCriteria, MatchRecord, PageRequest, Roster, StandingsMode};
///
/// let played_at = Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap();
/// let record = MatchRecord::new(
///     Roster::parse("Bartek & Ola")?,
///     Roster::parse("Kuba & Ewa")?,
///     5,
///     3,
///     played_at,
/// )?;
///
/// let mut dashboard = Dashboard::new();
/// dashboard.set_matches(vec![record]);
/// let page = dashboard.standings_table(
///     StandingsMode::Team,
///     &FilterCriteria::default(),
///     None,
///     &PageRequest::default(),
/// );
/// assert_eq!(page.items[0].row.subject, "Bartek & Ola");
/// # Ok::<(), league_standings::LeagueError>(())
/// ```
#[derive(Debug, Default)]
pub struct Dashboard {
    config: DashboardConfig,
    snapshot: Snapshot,
    player_standings: OnceLock<Vec<AggregateRow>>,
    team_standings: OnceLock<Vec<AggregateRow>>,
    team_ranking: OnceLock<Vec<TeamRanking>>,
}

impl Dashboard {
    /// Create an empty dashboard with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dashboard with the given presentation settings.
    pub fn with_config(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Settings the dashboard was created with.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Apply a snapshot from the feed. Cached views are dropped when the
    /// version differs from the current one.
    #[instrument(skip(self, snapshot), fields(version = snapshot.version))]
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        if snapshot.version == self.snapshot.version && snapshot.matches == self.snapshot.matches {
            return;
        }
        debug!(count = snapshot.matches.len(), "applying match snapshot");
        self.snapshot = snapshot;
        self.player_standings = OnceLock::new();
        self.team_standings = OnceLock::new();
        self.team_ranking = OnceLock::new();
    }

    /// Replace the matches directly, bumping the snapshot version.
    pub fn set_matches(&mut self, matches: Vec<MatchRecord>) {
        let version = self.snapshot.version + 1;
        self.replace_snapshot(Snapshot::new(version, matches));
    }

    /// Version of the snapshot currently applied; 0 before the first one.
    pub fn version(&self) -> u64 {
        self.snapshot.version
    }

    /// Every match of the current snapshot, in feed order.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.snapshot.matches
    }

    /// One row per player, in order of first appearance.
    pub fn player_standings(&self) -> &[AggregateRow] {
        self.player_standings
            .get_or_init(|| engine::build_player_standings(self.matches()))
    }

    /// One row per team, in order of first appearance, with goal totals.
    pub fn team_standings(&self) -> &[AggregateRow] {
        self.team_standings
            .get_or_init(|| engine::build_team_standings(self.matches()))
    }

    /// Player or team standings depending on `mode`.
    pub fn standings(&self, mode: StandingsMode) -> &[AggregateRow] {
        match mode {
            StandingsMode::Player => self.player_standings(),
            StandingsMode::Team => self.team_standings(),
        }
    }

    /// Teams ordered by win percentage with trophies for the top three.
    pub fn team_ranking(&self) -> &[TeamRanking] {
        self.team_ranking
            .get_or_init(|| engine::rank_teams(self.matches()))
    }

    /// One page of the standings table. Without `sort` the table is ordered
    /// by points per match, highest first.
    pub fn standings_table(
        &self,
        mode: StandingsMode,
        criteria: &FilterCriteria,
        sort: Option<SortSpec<StandingsField>>,
        page: &PageRequest,
    ) -> Page<AggregateRow> {
        let sort = sort.unwrap_or_default();
        engine::filter_sort_paginate(self.standings(mode), criteria, &sort, page)
    }

    /// One page of the match table. Rows are seen from the side of the
    /// player in `criteria.scope`. Without `sort` the newest match comes first.
    pub fn match_table(
        &self,
        criteria: &FilterCriteria,
        sort: Option<SortSpec<MatchField>>,
        page: &PageRequest,
    ) -> Page<MatchRow> {
        let rows = engine::build_match_rows(self.matches(), &criteria.scope);
        let sort = sort.unwrap_or_default();
        engine::filter_sort_paginate(&rows, criteria, &sort, page)
    }

    /// First page of a table at the configured page size. A page size of
    /// zero shows every row.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::new(0, PageSize::rows(self.config.page_size))
    }

    /// Headline statistics of `player`, with the calendar week taken in the
    /// time zone of `as_of`.
    pub fn player_stats<Tz: TimeZone>(&self, player: &str, as_of: &DateTime<Tz>) -> PlayerStats {
        engine::compute_player_stats(self.matches(), player, as_of)
    }

    /// Outcome counts, recent form and partner breakdown of `player`.
    pub fn player_profile(&self, player: &str) -> PlayerProfile {
        engine::player_profile(self.matches(), player)
    }

    /// Matches of `team`, newest first, seen from the team's side. `limit`
    /// caps the number of rows.
    pub fn team_history(&self, team: &TeamId, limit: Option<usize>) -> Vec<MatchRow> {
        engine::team_history(self.matches(), team, limit)
    }

    /// The configured number of most recent matches, newest first.
    pub fn last_matches(&self) -> Vec<MatchRecord> {
        engine::last_matches(self.matches(), self.config.last_matches)
    }

    /// Distinct player names, sorted.
    pub fn players(&self) -> Vec<String> {
        engine::player_names(self.matches())
    }

    /// Distinct team identities, sorted.
    pub fn teams(&self) -> Vec<TeamId> {
        engine::team_ids(self.matches())
    }

    /// Player a statistics view opens on: the current user when they have
    /// played, otherwise the first player by name.
    pub fn selected_player(&self) -> Option<String> {
        engine::default_player(&self.players(), self.config.current_user.as_deref())
    }

    /// Scope for the "mine only" toggle of the match table.
    pub fn my_scope(&self, mine_only: bool) -> MatchScope {
        match (&self.config.current_user, mine_only) {
            (Some(user), true) => MatchScope::Mine(user.clone()),
            _ => MatchScope::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::fixtures::record;

    fn season() -> Vec<MatchRecord> {
        vec![
            record("Bartek & Ola", "Kuba & Ewa", 5, 3, (2024, 1, 8)),
            record("Kuba & Ewa", "Bartek & Ola", 2, 2, (2024, 1, 9)),
            record("Kuba & Jan", "Bartek & Ewa", 4, 1, (2024, 1, 10)),
            record("Ola & Jan", "Kuba & Ewa", 0, 1, (2024, 1, 11)),
        ]
    }

    fn dashboard() -> Dashboard {
        let mut dashboard =
            Dashboard::with_config(DashboardConfig::default().with_current_user("Bartek"));
        dashboard.set_matches(season());
        dashboard
    }

    #[test]
    fn test_standings_cached_per_version() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.version(), 1);
        let first = dashboard.player_standings().as_ptr();
        assert_eq!(dashboard.player_standings().as_ptr(), first);

        let mut matches = season();
        matches.push(record("Bartek & Jan", "Ola & Ewa", 3, 0, (2024, 1, 12)));
        dashboard.set_matches(matches);
        assert_eq!(dashboard.version(), 2);
        let bartek = dashboard
            .player_standings()
            .iter()
            .find(|row| row.subject == "Bartek")
            .unwrap();
        assert_eq!(bartek.matches_played, 4);
    }

    #[test]
    fn test_same_snapshot_keeps_cache() {
        let mut dashboard = dashboard();
        dashboard.team_standings();
        let snapshot = Snapshot {
            version: 1,
            matches: dashboard.snapshot.matches.clone(),
        };
        dashboard.replace_snapshot(snapshot);
        assert!(dashboard.team_standings.get().is_some());
    }

    #[test]
    fn test_standings_table_defaults_to_points_per_match() {
        let dashboard = dashboard();
        let page = dashboard.standings_table(
            StandingsMode::Player,
            &FilterCriteria::default(),
            None,
            &dashboard.first_page(),
        );
        assert_eq!(page.total_count, 5);
        let values: Vec<f64> = page.rows().map(|row| row.points_per_match).collect();
        assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(page.items[0].position, 1);
    }

    #[test]
    fn test_match_table_mine_only() {
        let dashboard = dashboard();
        let criteria = FilterCriteria::default().with_scope(dashboard.my_scope(true));
        let page = dashboard.match_table(&criteria, None, &PageRequest::all());
        assert_eq!(page.total_count, 3);
        assert!(page.rows().all(|row| row.team.contains("Bartek")));
        let outcomes: Vec<_> = page.rows().map(|row| row.outcome).collect();
        assert_eq!(outcomes, [Outcome::Loss, Outcome::Draw, Outcome::Win]);

        let everything = dashboard.match_table(&FilterCriteria::default(), None, &PageRequest::all());
        assert_eq!(everything.total_count, 4);
    }

    #[test]
    fn test_selection_helpers() {
        let dashboard = dashboard();
        assert_eq!(dashboard.players(), ["Bartek", "Ewa", "Jan", "Kuba", "Ola"]);
        assert_eq!(dashboard.selected_player().as_deref(), Some("Bartek"));
        assert_eq!(dashboard.last_matches().len(), 4);
        assert_eq!(dashboard.my_scope(false), MatchScope::All);

        let anonymous = Dashboard::new();
        assert_eq!(anonymous.my_scope(true), MatchScope::All);
        assert_eq!(anonymous.selected_player(), None);
    }

    #[test]
    fn test_player_views() {
        let dashboard = dashboard();
        let as_of = Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).unwrap();
        let stats = dashboard.player_stats("Bartek", &as_of);
        assert_eq!(stats.week_matches, 3);
        assert_eq!(stats.last_result, "4 : 1");

        let profile = dashboard.player_profile("Bartek");
        assert_eq!(profile.outcomes.total(), 3);

        let team: TeamId = "Ola & Bartek".parse().unwrap();
        assert_eq!(dashboard.team_history(&team, None).len(), 2);
        assert_eq!(dashboard.team_ranking()[0].trophy, Some(Trophy::Gold));
    }

    #[test]
    fn test_zero_page_size_shows_every_row() {
        let mut dashboard = Dashboard::with_config(DashboardConfig::default().with_page_size(0));
        dashboard.set_matches(season());
        let page = dashboard.standings_table(
            StandingsMode::Player,
            &FilterCriteria::default(),
            None,
            &dashboard.first_page(),
        );
        assert_eq!(page.items.len(), page.total_count);
        assert_eq!(page.page_count(), 1);
    }
}
