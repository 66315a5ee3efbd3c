//! The eight weighted factors behind a single-fixture projection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{ModelConfig, WeightProfile};
use super::types::{round_to, Fixture, PlayerMetrics, TeamLookup, Venue};

/// Decimal places impacts are rounded to before summing.
pub const IMPACT_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorKind {
    Form,
    #[serde(rename = "ppg")]
    PointsPerGame,
    Ict,
    #[serde(rename = "fdr")]
    FixtureDifficulty,
    HomeAway,
    #[serde(rename = "teamStr")]
    TeamStrength,
    Availability,
    #[serde(rename = "bonus")]
    BonusRate,
}

impl FactorKind {
    /// Every factor, in the order they are reported.
    pub const ALL: [FactorKind; 8] = [
        FactorKind::Form,
        FactorKind::PointsPerGame,
        FactorKind::Ict,
        FactorKind::FixtureDifficulty,
        FactorKind::HomeAway,
        FactorKind::TeamStrength,
        FactorKind::Availability,
        FactorKind::BonusRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FactorKind::Form => "form",
            FactorKind::PointsPerGame => "ppg",
            FactorKind::Ict => "ict",
            FactorKind::FixtureDifficulty => "fdr",
            FactorKind::HomeAway => "homeAway",
            FactorKind::TeamStrength => "teamStr",
            FactorKind::Availability => "availability",
            FactorKind::BonusRate => "bonus",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One scored factor for a player/fixture pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub kind: FactorKind,
    /// Raw input, before normalization.
    pub value: f64,
    /// 0-10.
    pub norm: f64,
    pub weight: f64,
    /// `norm * weight`, rounded to [`IMPACT_DECIMALS`].
    pub impact: f64,
    pub label: String,
}

impl Factor {
    fn new(kind: FactorKind, value: f64, norm: f64, weight: f64, label: String) -> Self {
        Self {
            kind,
            value,
            norm,
            weight,
            impact: round_to(norm * weight, IMPACT_DECIMALS),
            label,
        }
    }
}

fn form_label(form: f64) -> String {
    let s = if form >= 7.0 {
        "In great form"
    } else if form >= 5.0 {
        "Decent form"
    } else if form >= 3.0 {
        "Average form"
    } else {
        "Poor form"
    };
    s.to_string()
}

fn fdr_label(difficulty: u8, opponent: &str) -> String {
    let tier = if difficulty <= 2 {
        "Easy fixture"
    } else if difficulty <= 3 {
        "Medium fixture"
    } else {
        "Tough fixture"
    };
    let opponent = opponent.trim();
    if opponent.is_empty() {
        tier.to_string()
    } else {
        format!("{tier} {opponent}")
    }
}

fn ict_label(norm: f64) -> String {
    let s = if norm >= 7.0 {
        "High attacking threat"
    } else if norm >= 4.0 {
        "Moderate involvement"
    } else {
        "Low attacking involvement"
    };
    s.to_string()
}

fn availability_label(chance: Option<f64>) -> String {
    let s = match chance {
        None => "Fully available",
        Some(c) if c >= 100.0 => "Fully available",
        Some(c) if c >= 75.0 => "Likely to play",
        Some(c) if c >= 50.0 => "Fitness doubt",
        Some(c) if c >= 25.0 => "Unlikely to play",
        Some(_) => "Expected to miss",
    };
    s.to_string()
}

/// Score all eight factors for one player in one fixture.
///
/// Missing fixture data means difficulty `neutral_difficulty` and an away venue.
pub fn compute_factors<L>(
    player: &PlayerMetrics,
    fixture: &Fixture,
    teams: &L,
    config: &ModelConfig,
) -> Vec<Factor>
where
    L: TeamLookup + ?Sized,
{
    let norm = &config.normalization;
    let profile = WeightProfile::for_position(player.position);
    let weights = config.weights_for(profile);
    let venue = fixture.venue();
    let team = teams.team_strength(player.team_id);
    let difficulty = fixture.difficulty_or(norm.neutral_difficulty);
    let appearances = player.estimated_appearances(norm.minutes_per_appearance);

    let ict_norm = norm.norm_ict(player.ict_index);
    let strength_raw = team
        .and_then(|t| t.rating(profile.is_defensive(), venue))
        .unwrap_or(0.0);
    let bonus_per_game = player.bonus as f64 / appearances.max(1.0);

    vec![
        Factor::new(
            FactorKind::Form,
            player.form,
            norm.norm_form(player.form),
            weights.form,
            form_label(player.form),
        ),
        Factor::new(
            FactorKind::PointsPerGame,
            player.points_per_game,
            norm.norm_ppg(player.points_per_game),
            weights.ppg,
            format!("{:.1} pts/game average", player.points_per_game),
        ),
        Factor::new(
            FactorKind::Ict,
            player.ict_index,
            ict_norm,
            weights.ict,
            ict_label(ict_norm),
        ),
        Factor::new(
            FactorKind::FixtureDifficulty,
            difficulty as f64,
            norm.norm_fdr(difficulty as f64),
            weights.fdr,
            fdr_label(difficulty, &fixture.opponent),
        ),
        Factor::new(
            FactorKind::HomeAway,
            if venue.is_home() { 1.0 } else { 0.0 },
            norm.norm_home_away(venue),
            weights.home_away,
            match venue {
                Venue::Home => "Home advantage".to_string(),
                Venue::Away => "Away match".to_string(),
            },
        ),
        Factor::new(
            FactorKind::TeamStrength,
            strength_raw,
            norm.norm_team_strength(team, profile, venue),
            weights.team_strength,
            if profile.is_defensive() {
                "Team defence strength".to_string()
            } else {
                "Team attack strength".to_string()
            },
        ),
        Factor::new(
            FactorKind::Availability,
            player.chance_of_playing.unwrap_or(100.0),
            norm.norm_availability(player.chance_of_playing),
            weights.availability,
            availability_label(player.chance_of_playing),
        ),
        Factor::new(
            FactorKind::BonusRate,
            player.bonus as f64,
            norm.norm_bonus(player.bonus as f64, appearances),
            weights.bonus,
            format!("{:.1} bonus/game", bonus_per_game),
        ),
    ]
}
