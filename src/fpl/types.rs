//! Raw FPL and Understat payloads, as the public endpoints return them.
//!
//! Only the fields the model reads are declared; everything else in the
//! payloads is ignored.

use serde::{de::Error, Deserialize, Deserializer, Serialize};

use crate::engine::types::de_chance_of_playing;

/// FPL sends many decimals as strings (`"5.2"`); accept those, plain numbers,
/// `null` and `""` (as 0).
fn de_loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().map_err(D::Error::custom),
    }
}

/// `bootstrap-static/`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BootstrapStatic {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub teams: Vec<FplTeam>,
    #[serde(default)]
    pub element_types: Vec<ElementType>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl BootstrapStatic {
    /// The gameweek flagged current, else the one before the next, else 0
    /// (pre-season).
    pub fn current_gameweek(&self) -> u16 {
        if let Some(current) = self.events.iter().find(|e| e.is_current) {
            return current.id;
        }
        self.events
            .iter()
            .find(|e| e.is_next)
            .map(|e| e.id.saturating_sub(1))
            .unwrap_or(0)
    }
}

/// A gameweek.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    pub id: u16,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FplTeam {
    pub id: u32,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub strength_attack_home: Option<f64>,
    #[serde(default)]
    pub strength_attack_away: Option<f64>,
    #[serde(default)]
    pub strength_defence_home: Option<f64>,
    #[serde(default)]
    pub strength_defence_away: Option<f64>,
}

/// Position metadata; `singular_name_short` is `"GKP"`, `"DEF"`, ...
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElementType {
    pub id: u8,
    #[serde(default)]
    pub singular_name_short: String,
}

/// A player.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Element {
    pub id: u32,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    pub element_type: u8,
    pub team: u32,
    #[serde(default, deserialize_with = "de_loose_f64")]
    pub form: f64,
    #[serde(default, deserialize_with = "de_loose_f64")]
    pub points_per_game: f64,
    #[serde(default, deserialize_with = "de_loose_f64")]
    pub ict_index: f64,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub bonus: u32,
    #[serde(default, deserialize_with = "de_chance_of_playing")]
    pub chance_of_playing_next_round: Option<f64>,
    /// Price in tenths of a million.
    #[serde(default)]
    pub now_cost: u32,
    #[serde(default, deserialize_with = "de_loose_f64")]
    pub selected_by_percent: f64,
    #[serde(default)]
    pub transfers_in_event: i64,
    #[serde(default)]
    pub transfers_out_event: i64,
}

/// `fixtures/`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FplFixture {
    /// Unscheduled fixtures have no gameweek.
    #[serde(default)]
    pub event: Option<u16>,
    pub team_h: u32,
    pub team_a: u32,
    #[serde(default)]
    pub team_h_difficulty: Option<u8>,
    #[serde(default)]
    pub team_a_difficulty: Option<u8>,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pick {
    pub element: u32,
    #[serde(default)]
    pub position: Option<u8>,
}

/// `entry/{id}/event/{gw}/picks/`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ManagerPicks {
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// Season totals for one player from Understat.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnderstatPlayer {
    #[serde(alias = "player_name")]
    pub name: String,
    /// Minutes played.
    #[serde(default, deserialize_with = "de_loose_f64")]
    pub time: f64,
    #[serde(rename = "xG", default, deserialize_with = "de_loose_f64")]
    pub xg: f64,
    #[serde(rename = "xA", default, deserialize_with = "de_loose_f64")]
    pub xa: f64,
}

/// Everything needed to build a [`Snapshot`](super::snapshot::Snapshot),
/// saved side by side in one file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FplBundle {
    #[serde(alias = "bootstrap_static", alias = "bootstrap-static")]
    pub bootstrap: BootstrapStatic,
    #[serde(default)]
    pub fixtures: Vec<FplFixture>,
    #[serde(default)]
    pub picks: Option<ManagerPicks>,
    #[serde(default)]
    pub understat: Vec<UnderstatPlayer>,
}
