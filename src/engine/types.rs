//! Plain data the model consumes and produces.
//!
//! Everything here is a snapshot value: the engine never caches or mutates
//! these records, it recomputes results from them on every call.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use super::config::MomentumRule;
use super::factors::Factor;
use crate::cli::types::{Gameweek, PlayerId, Position, TeamId};

/// Opponent-label marker the provider uses for home fixtures, e.g. `"ARS (H)"`.
pub const HOME_MARKER: &str = "(H)";

/// Per-player inputs to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team_id: TeamId,
    /// Recent form, nominally 0-10 but can run higher.
    #[serde(default)]
    pub form: f64,
    #[serde(default)]
    pub points_per_game: f64,
    /// Season-cumulative ICT index.
    #[serde(default)]
    pub ict_index: f64,
    /// Matches played, when the provider knows it.
    #[serde(default)]
    pub appearances: Option<u32>,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub bonus: u32,
    /// Percent chance of playing; `None` means no flag, i.e. fully available.
    #[serde(default, deserialize_with = "de_chance_of_playing")]
    pub chance_of_playing: Option<f64>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub selected_by_percent: f64,
    /// Transfers in minus transfers out for the current gameweek.
    #[serde(default)]
    pub net_transfers_event: i64,
    /// Expected goal involvements per 90 from an external xG feed.
    #[serde(default)]
    pub xgi_per90: Option<f64>,
    /// Upcoming fixtures in gameweek order, already limited to unplayed matches.
    #[serde(default)]
    pub upcoming_fixtures: Vec<Fixture>,
}

impl PlayerMetrics {
    /// Appearances used for per-game rates.
    ///
    /// When the provider gives no appearance count this is an estimate:
    /// `minutes / minutes_per_appearance`, rounded. It is a heuristic, not
    /// measured data, and undercounts players who are often subbed on.
    pub fn estimated_appearances(&self, minutes_per_appearance: f64) -> f64 {
        match self.appearances {
            Some(n) if n > 0 => n as f64,
            _ if minutes_per_appearance > 0.0 => {
                (self.minutes as f64 / minutes_per_appearance).round()
            }
            _ => 0.0,
        }
    }

    pub fn price_pressure(&self, rule: &MomentumRule) -> PricePressure {
        PricePressure::from_net_transfers(self.net_transfers_event, rule)
    }
}

/// Accept `null`, `""`, a number, or a numeric string for chance of playing.
pub(crate) fn de_chance_of_playing<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
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
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid chance of playing: {s:?}"))),
    }
}

/// Where a fixture is played, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn is_home(&self) -> bool {
        matches!(self, Venue::Home)
    }
}

/// One upcoming match for a player's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub gameweek: Option<Gameweek>,
    /// Opponent label, suffixed `(H)` or `(A)`.
    #[serde(default)]
    pub opponent: String,
    /// Ordinal 1 (easiest) to 5 (hardest).
    #[serde(default)]
    pub difficulty: Option<u8>,
}

impl Fixture {
    pub fn new(gameweek: u16, opponent: impl Into<String>, difficulty: u8) -> Self {
        Self {
            gameweek: Some(Gameweek::new(gameweek)),
            opponent: opponent.into(),
            difficulty: Some(difficulty),
        }
    }

    /// Stand-in used when a player has no fixture data at all.
    pub fn placeholder(neutral_difficulty: u8) -> Self {
        Self {
            gameweek: None,
            opponent: "TBD".to_string(),
            difficulty: Some(neutral_difficulty),
        }
    }

    /// Unlabelled fixtures count as away.
    pub fn venue(&self) -> Venue {
        if self.opponent.contains(HOME_MARKER) {
            Venue::Home
        } else {
            Venue::Away
        }
    }

    /// Difficulty, or `neutral` when the provider left it out (or sent 0).
    pub fn difficulty_or(&self, neutral: u8) -> u8 {
        match self.difficulty {
            Some(d) if d > 0 => d,
            _ => neutral,
        }
    }
}

/// Attack/defence strength ratings for one team, split by venue.
///
/// Ratings are on FPL's scale, roughly 1000-1400. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub id: TeamId,
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

impl TeamStrength {
    /// The rating relevant to a player: defence for defensive profiles,
    /// attack otherwise, at the fixture's venue. Zero counts as missing.
    pub fn rating(&self, defensive: bool, venue: Venue) -> Option<f64> {
        let raw = match (defensive, venue) {
            (true, Venue::Home) => self.strength_defence_home,
            (true, Venue::Away) => self.strength_defence_away,
            (false, Venue::Home) => self.strength_attack_home,
            (false, Venue::Away) => self.strength_attack_away,
        };
        raw.filter(|v| *v != 0.0 && v.is_finite())
    }
}

/// Team-strength access the engine needs from a data provider.
pub trait TeamLookup {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength>;
}

impl<S: BuildHasher> TeamLookup for HashMap<TeamId, TeamStrength, S> {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength> {
        self.get(&team)
    }
}

impl TeamLookup for BTreeMap<TeamId, TeamStrength> {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength> {
        self.get(&team)
    }
}

impl TeamLookup for [TeamStrength] {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength> {
        self.iter().find(|t| t.id == team)
    }
}

impl TeamLookup for Vec<TeamStrength> {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength> {
        self.as_slice().team_strength(team)
    }
}

/// Transfer-market momentum derived from net transfers this gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricePressure {
    Rising,
    LikelyRising,
    Stable,
    LikelyFalling,
    Falling,
}

impl PricePressure {
    pub fn from_net_transfers(net: i64, rule: &MomentumRule) -> Self {
        if net >= rule.strong_net_transfers {
            PricePressure::Rising
        } else if net >= rule.likely_net_transfers {
            PricePressure::LikelyRising
        } else if net <= -rule.strong_net_transfers {
            PricePressure::Falling
        } else if net <= -rule.likely_net_transfers {
            PricePressure::LikelyFalling
        } else {
            PricePressure::Stable
        }
    }

    pub fn is_rising(&self) -> bool {
        matches!(self, PricePressure::Rising | PricePressure::LikelyRising)
    }

    pub fn is_falling(&self) -> bool {
        matches!(self, PricePressure::Falling | PricePressure::LikelyFalling)
    }
}

impl fmt::Display for PricePressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PricePressure::Rising => "rising",
            PricePressure::LikelyRising => "likely-rising",
            PricePressure::Stable => "stable",
            PricePressure::LikelyFalling => "likely-falling",
            PricePressure::Falling => "falling",
        };
        write!(f, "{}", s)
    }
}

/// Projection for one player in one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XptsResult {
    pub xpts: f64,
    pub factors: Vec<Factor>,
    /// At most three labels, strongest impact first.
    pub top_reasons: Vec<String>,
}

/// Projection for one player over a window of fixtures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiGwResult {
    pub total_xpts: f64,
    pub per_gw: Vec<XptsResult>,
    pub avg_xpts: f64,
    /// At most three labels, most frequently recurring first.
    pub top_reasons: Vec<String>,
    /// Set when no fixtures were available and a neutral stand-in was used.
    pub placeholder: bool,
}

/// Round half away from zero to `decimals` places. Never returns `-0.0`.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor + 0.0
}
