use league_standings::{
    spawn_poller, Dashboard, DashboardConfig, FeedClient, FeedConfig, FilterCriteria, StandingsMode,
};

#[tokio::main]
async fn main() {
    let config = FeedConfig::from_env().unwrap();
    println!("Polling {} every {:?}", config.snapshot_url(), config.poll_interval());

    let every = config.poll_interval();
    let (mut snapshots, poller) = spawn_poller(FeedClient::new(config), every);

    let mut dashboard = Dashboard::with_config(DashboardConfig::default());
    for _ in 0..3 {
        if snapshots.changed().await.is_err() {
            break;
        }
        dashboard.replace_snapshot(snapshots.borrow_and_update().clone());
        println!("Snapshot {} with {} matches", dashboard.version(), dashboard.matches().len());

        let page = dashboard.standings_table(
            StandingsMode::Team,
            &FilterCriteria::default(),
            None,
            &dashboard.first_page(),
        );
        println!("{}", serde_json::to_string_pretty(&page).unwrap());

        for ranking in dashboard.team_ranking().iter().take(3) {
            let medal = ranking.trophy.map(|t| t.medal()).unwrap_or_default();
            println!("{medal} {} ({:.0}%)", ranking.row.subject, ranking.row.win_percentage);
        }
    }

    drop(snapshots);
    poller.await.unwrap();
}
