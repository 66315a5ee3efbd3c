//! Integration tests for loading snapshots from disk

use fpl_xpts::{
    rank_squad, ModelConfig, PlayerId, PlayerQuery, Position, Snapshot, TeamId, TeamLookup,
    XptsError,
};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn fpl_bundle() -> Value {
    json!({
        "bootstrap-static": {
            "events": [
                {"id": 20, "is_current": true, "finished": false},
                {"id": 21, "is_next": true}
            ],
            "teams": [
                {"id": 1, "short_name": "LIV", "strength_attack_home": 1380,
                 "strength_attack_away": 1340, "strength_defence_home": 1360,
                 "strength_defence_away": 1320},
                {"id": 2, "short_name": "BRE", "strength_attack_home": 1150,
                 "strength_attack_away": 1100, "strength_defence_home": 1120,
                 "strength_defence_away": 1080}
            ],
            "element_types": [
                {"id": 1, "singular_name_short": "GKP"},
                {"id": 2, "singular_name_short": "DEF"},
                {"id": 3, "singular_name_short": "MID"},
                {"id": 4, "singular_name_short": "FWD"}
            ],
            "elements": [
                {"id": 1, "web_name": "Salah", "first_name": "Mohamed", "second_name": "Salah",
                 "element_type": 3, "team": 1, "form": "8.5", "points_per_game": "7.9",
                 "ict_index": "260.1", "minutes": 1700, "bonus": 22, "now_cost": 135,
                 "selected_by_percent": "60.2", "transfers_in_event": 90000,
                 "transfers_out_event": 10000},
                {"id": 2, "web_name": "Mbeumo", "first_name": "Bryan", "second_name": "Mbeumo",
                 "element_type": 3, "team": 2, "form": "5.0", "points_per_game": "5.2",
                 "ict_index": "170.0", "minutes": 1650, "bonus": 9, "now_cost": 78,
                 "selected_by_percent": "18.0", "chance_of_playing_next_round": 50},
                {"id": 3, "web_name": "Raya", "first_name": "David", "second_name": "Raya",
                 "element_type": 1, "team": 2, "form": "3.0", "points_per_game": "3.9",
                 "ict_index": "40.0", "minutes": 1800, "bonus": 4, "now_cost": 55,
                 "selected_by_percent": "9.0"}
            ]
        },
        "fixtures": [
            {"id": 1, "event": 20, "team_h": 1, "team_a": 2, "team_h_difficulty": 2,
             "team_a_difficulty": 5, "finished": true},
            {"id": 2, "event": 21, "team_h": 2, "team_a": 1, "team_h_difficulty": 5,
             "team_a_difficulty": 3, "finished": false},
            {"id": 3, "event": 22, "team_h": 1, "team_a": 2, "team_h_difficulty": 2,
             "team_a_difficulty": 5, "finished": false}
        ],
        "picks": {"picks": [
            {"element": 2, "position": 2},
            {"element": 1, "position": 1, "is_captain": true}
        ]},
        "understat": [
            {"player_name": "Mohamed Salah", "games": 19, "time": "1700", "xG": "12.0", "xA": "5.0"}
        ]
    })
}

fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

#[test]
fn test_load_fpl_bundle_from_disk() {
    let file = write_json(&fpl_bundle());
    let snapshot = Snapshot::load(file.path()).unwrap();

    assert_eq!(snapshot.current_gameweek.as_u16(), 20);
    assert_eq!(snapshot.players.len(), 3);
    assert_eq!(snapshot.squad, vec![PlayerId::new(1), PlayerId::new(2)]);

    let salah = snapshot.player(PlayerId::new(1)).unwrap();
    assert_eq!(salah.position, Position::MID);
    assert_eq!(salah.price, 13.5);
    assert_eq!(salah.net_transfers_event, 80000);
    assert_eq!(salah.appearances, None);
    assert!(salah.xgi_per90.is_some());
    let opponents: Vec<&str> = salah
        .upcoming_fixtures
        .iter()
        .map(|f| f.opponent.as_str())
        .collect();
    assert_eq!(opponents, vec!["BRE (A)", "BRE (H)"]);
    assert_eq!(salah.upcoming_fixtures[0].difficulty, Some(3));

    let mbeumo = snapshot.player(PlayerId::new(2)).unwrap();
    assert_eq!(mbeumo.chance_of_playing, Some(50.0));
    assert_eq!(mbeumo.xgi_per90, None);

    assert_eq!(
        snapshot.team_strength(TeamId::new(2)).unwrap().short_name,
        "BRE"
    );
}

#[test]
fn test_native_snapshot_survives_a_round_trip() {
    let bundle_file = write_json(&fpl_bundle());
    let snapshot = Snapshot::load(bundle_file.path()).unwrap();

    let native = serde_json::to_value(&snapshot).unwrap();
    assert!(native.get("players").is_some());
    let native_file = write_json(&native);
    let reloaded = Snapshot::load(native_file.path()).unwrap();
    assert_eq!(reloaded, snapshot);
}

#[test]
fn test_squad_ranking_from_loaded_snapshot() {
    let file = write_json(&fpl_bundle());
    let snapshot = Snapshot::load(file.path()).unwrap();
    let config = ModelConfig::default();

    let ranking = rank_squad(snapshot.squad_players(), &snapshot, 2, &config);
    assert_eq!(ranking.ranked.len(), 2);
    assert_eq!(ranking.captain.unwrap().player.name, "Salah");
    assert_eq!(ranking.vice_captain.unwrap().player.name, "Mbeumo");
}

#[test]
fn test_player_lookup_by_query() {
    let file = write_json(&fpl_bundle());
    let snapshot = Snapshot::load(file.path()).unwrap();

    let query: PlayerQuery = "SALAH".parse().unwrap();
    assert_eq!(snapshot.find(&query).unwrap().id, PlayerId::new(1));
    let query: PlayerQuery = "3".parse().unwrap();
    assert_eq!(snapshot.find(&query).unwrap().name, "Raya");
    let query: PlayerQuery = "kane".parse().unwrap();
    assert!(matches!(
        snapshot.find(&query),
        Err(XptsError::PlayerNotFound { .. })
    ));
}

#[test]
fn test_load_errors() {
    let missing = std::env::temp_dir().join("fpl-xpts-no-such-snapshot.json");
    assert!(matches!(Snapshot::load(&missing), Err(XptsError::Io(_))));

    let file = write_json(&json!({"neither": "format"}));
    assert!(matches!(Snapshot::load(file.path()), Err(XptsError::Json(_))));
}
