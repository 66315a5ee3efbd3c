//! Common utilities and helper functions shared across commands.

use serde::Serialize;
use std::path::PathBuf;

pub(crate) use crate::engine::ranking::signed as format_signed;

use crate::{
    cli::types::{PlayerQuery, TeamId},
    engine::{types::Fixture, ModelConfig, PlayerMetrics, TeamLookup},
    fpl::Snapshot,
    Result,
};

use super::{resolve_config, resolve_snapshot_path};

/// Context containing common resources needed by every command
pub struct CommandContext {
    pub snapshot: Snapshot,
    pub config: ModelConfig,
    pub horizon: usize,
}

impl CommandContext {
    /// Load the snapshot and model config; `horizon` falls back to the
    /// config's default.
    pub fn load(
        snapshot: Option<PathBuf>,
        config: Option<PathBuf>,
        horizon: Option<usize>,
    ) -> Result<Self> {
        let config = resolve_config(config)?;
        let path = resolve_snapshot_path(snapshot)?;
        let snapshot = Snapshot::load(&path)?;
        Ok(Self::new(snapshot, config, horizon))
    }

    pub fn new(snapshot: Snapshot, config: ModelConfig, horizon: Option<usize>) -> Self {
        let horizon = horizon.unwrap_or(config.default_horizon);
        Self {
            snapshot,
            config,
            horizon,
        }
    }

    pub fn find_player(&self, query: &PlayerQuery) -> Result<&PlayerMetrics> {
        self.snapshot.find(query)
    }

    /// Resolve every query, failing on the first that doesn't match.
    pub fn find_players(&self, queries: &[PlayerQuery]) -> Result<Vec<&PlayerMetrics>> {
        queries.iter().map(|q| self.snapshot.find(q)).collect()
    }

    /// Short club name, or `"???"` when the team is unknown.
    pub fn team_short_name(&self, team: TeamId) -> &str {
        self.snapshot
            .team_strength(team)
            .map(|t| t.short_name.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("???")
    }
}

/// `"MCI (H) 5, SHU (A) 2"` for the first `horizon` fixtures.
pub fn format_fixtures(fixtures: &[Fixture], horizon: usize, neutral: u8) -> String {
    if fixtures.is_empty() {
        return "no fixtures".to_string();
    }
    fixtures
        .iter()
        .take(horizon)
        .map(|f| format!("{} {}", f.opponent, f.difficulty_or(neutral)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?); // tarpaulin::skip
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::json;

    use crate::fpl::Snapshot;

    /// A small native snapshot: two teams, six players, a four-man squad.
    pub fn snapshot() -> Snapshot {
        let fixtures_ars = json!([
            {"gameweek": 11, "opponent": "SHU (H)", "difficulty": 2},
            {"gameweek": 12, "opponent": "BUR (A)", "difficulty": 2},
            {"gameweek": 13, "opponent": "LUT (H)", "difficulty": 2}
        ]);
        let fixtures_mci = json!([
            {"gameweek": 11, "opponent": "ARS (A)", "difficulty": 4},
            {"gameweek": 12, "opponent": "LIV (H)", "difficulty": 5},
            {"gameweek": 13, "opponent": "NEW (A)", "difficulty": 4}
        ]);
        let player = |id: u32, name: &str, pos: &str, team: u32, form: f64, ppg: f64, price: f64| {
            let fixtures = if team == 1 { fixtures_ars.clone() } else { fixtures_mci.clone() };
            json!({
                "id": id, "name": name, "position": pos, "team_id": team,
                "form": form, "points_per_game": ppg, "ict_index": 120.0,
                "appearances": 10, "minutes": 900, "bonus": 8,
                "price": price, "upcoming_fixtures": fixtures
            })
        };
        serde_json::from_value(json!({
            "current_gameweek": 10,
            "teams": [
                {"id": 1, "short_name": "ARS", "strength_attack_home": 1300,
                 "strength_attack_away": 1250, "strength_defence_home": 1320,
                 "strength_defence_away": 1280},
                {"id": 2, "short_name": "MCI", "strength_attack_home": 1350,
                 "strength_attack_away": 1300, "strength_defence_home": 1300,
                 "strength_defence_away": 1250}
            ],
            "players": [
                player(1, "Raya", "GKP", 1, 4.0, 4.2, 5.5),
                player(2, "Saliba", "DEF", 1, 5.0, 4.8, 6.0),
                player(3, "Saka", "MID", 1, 8.0, 6.5, 10.0),
                player(4, "Haaland", "FWD", 2, 6.0, 7.5, 15.0),
                player(5, "Foden", "MID", 2, 3.0, 4.0, 9.5),
                player(6, "Odegaard", "MID", 1, 7.5, 5.5, 8.5)
            ],
            "squad": [1, 2, 4, 5]
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_horizon_defaults_to_config() {
        let ctx = CommandContext::new(test_support::snapshot(), ModelConfig::default(), None);
        assert_eq!(ctx.horizon, 3);
        let ctx = CommandContext::new(test_support::snapshot(), ModelConfig::default(), Some(5));
        assert_eq!(ctx.horizon, 5);
    }

    #[test]
    fn test_find_players() {
        let ctx = CommandContext::new(test_support::snapshot(), ModelConfig::default(), None);
        let queries: Vec<PlayerQuery> = vec!["saka".parse().unwrap(), "4".parse().unwrap()];
        let found = ctx.find_players(&queries).unwrap();
        assert_eq!(found[0].name, "Saka");
        assert_eq!(found[1].name, "Haaland");

        let missing: Vec<PlayerQuery> = vec!["saka".parse().unwrap(), "nobody".parse().unwrap()];
        assert!(ctx.find_players(&missing).is_err());
    }

    #[test]
    fn test_team_short_name() {
        let ctx = CommandContext::new(test_support::snapshot(), ModelConfig::default(), None);
        assert_eq!(ctx.team_short_name(TeamId::new(2)), "MCI");
        assert_eq!(ctx.team_short_name(TeamId::new(9)), "???");
    }

    #[test]
    fn test_format_fixtures() {
        let fixtures = vec![
            Fixture::new(11, "MCI (H)", 5),
            Fixture::new(12, "SHU (A)", 2),
            Fixture::new(13, "LUT (H)", 2),
        ];
        assert_eq!(format_fixtures(&fixtures, 2, 3), "MCI (H) 5, SHU (A) 2");
        assert_eq!(format_fixtures(&[], 3, 3), "no fixtures");
    }
}
