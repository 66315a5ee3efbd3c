//! Calibration for the expected-points model.
//!
//! Every constant here was tuned by eye against real gameweeks, none of them
//! come from a model fit. They all live in one serde structure so a JSON file
//! can override any subset of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::factors::FactorKind;
use crate::cli::types::Position;
use crate::error::{Result, XptsError};

/// Allowed drift when checking that a weight profile sums to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Which weight set a player is scored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightProfile {
    Attacking,
    Defensive,
}

impl WeightProfile {
    pub fn for_position(position: Position) -> Self {
        if position.is_defensive() {
            WeightProfile::Defensive
        } else {
            WeightProfile::Attacking
        }
    }

    pub fn is_defensive(&self) -> bool {
        matches!(self, WeightProfile::Defensive)
    }
}

/// Weight for each of the eight factors. A profile must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub form: f64,
    pub ppg: f64,
    pub ict: f64,
    pub fdr: f64,
    pub home_away: f64,
    pub team_strength: f64,
    pub availability: f64,
    pub bonus: f64,
}

impl FactorWeights {
    pub fn attacking() -> Self {
        Self {
            form: 0.18,
            ppg: 0.14,
            ict: 0.18,
            fdr: 0.14,
            home_away: 0.10,
            team_strength: 0.12,
            availability: 0.09,
            bonus: 0.05,
        }
    }

    /// Leans on form, fixture and team strength; individual ICT matters less
    /// for clean-sheet points.
    pub fn defensive() -> Self {
        Self {
            form: 0.20,
            ppg: 0.16,
            ict: 0.10,
            fdr: 0.16,
            home_away: 0.10,
            team_strength: 0.14,
            availability: 0.09,
            bonus: 0.05,
        }
    }

    pub fn weight(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Form => self.form,
            FactorKind::PointsPerGame => self.ppg,
            FactorKind::Ict => self.ict,
            FactorKind::FixtureDifficulty => self.fdr,
            FactorKind::HomeAway => self.home_away,
            FactorKind::TeamStrength => self.team_strength,
            FactorKind::Availability => self.availability,
            FactorKind::BonusRate => self.bonus,
        }
    }

    pub fn sum(&self) -> f64 {
        FactorKind::ALL.iter().map(|k| self.weight(*k)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileWeights {
    pub attacking: FactorWeights,
    pub defensive: FactorWeights,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            attacking: FactorWeights::attacking(),
            defensive: FactorWeights::defensive(),
        }
    }
}

impl ProfileWeights {
    pub fn for_profile(&self, profile: WeightProfile) -> &FactorWeights {
        match profile {
            WeightProfile::Attacking => &self.attacking,
            WeightProfile::Defensive => &self.defensive,
        }
    }
}

/// Divisors and fallbacks that put raw metrics on a common 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Season ICT of 500 maps to 10.
    pub ict_divisor: f64,
    /// 5 points per game maps to 10.
    pub ppg_multiplier: f64,
    /// Difficulty at which the fixture factor bottoms out.
    pub fdr_hardest: f64,
    /// Score gained per difficulty step below `fdr_hardest`.
    pub fdr_step: f64,
    /// Difficulty assumed when a fixture has none.
    pub neutral_difficulty: u8,
    /// Chance-of-playing percent per scale point.
    pub availability_divisor: f64,
    /// Score for a player with no availability flag.
    pub fully_available: f64,
    /// Bonus-per-appearance multiplier; 3 bonus a game is roughly the cap.
    pub bonus_rate_multiplier: f64,
    /// Strength rating that maps to 0.
    pub team_strength_baseline: f64,
    /// Strength rating points per scale point.
    pub team_strength_divisor: f64,
    /// Fixed home bias.
    pub home_bias: f64,
    /// Fixed away bias.
    pub away_bias: f64,
    /// Fallback for any metric with no data.
    pub neutral: f64,
    /// Used to estimate appearances from minutes when the provider has no count.
    pub minutes_per_appearance: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            ict_divisor: 50.0,
            ppg_multiplier: 2.0,
            fdr_hardest: 5.0,
            fdr_step: 2.5,
            neutral_difficulty: 3,
            availability_divisor: 10.0,
            fully_available: 10.0,
            bonus_rate_multiplier: 3.3,
            team_strength_baseline: 900.0,
            team_strength_divisor: 60.0,
            home_bias: 7.5,
            away_bias: 4.5,
            neutral: 5.0,
            minutes_per_appearance: 70.0,
        }
    }
}

/// How factor impacts turn into a projection and its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maps the 0-10 weighted sum onto a realistic FPL points range.
    pub points_scale: f64,
    /// Minimum impact for a factor to be quoted as a reason.
    pub reason_floor: f64,
    pub max_reasons: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_scale: 0.85,
            reason_floor: 0.5,
            max_reasons: 3,
        }
    }
}

/// Price-momentum override for transfer recommendations.
///
/// Kept apart from the scoring thresholds so it can be switched off or
/// retuned on its own. The net-transfer thresholds are uncalibrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumRule {
    pub enabled: bool,
    /// Net transfers for a rise/fall to be considered imminent.
    pub strong_net_transfers: i64,
    /// Net transfers for a rise/fall to be considered likely.
    pub likely_net_transfers: i64,
}

impl Default for MomentumRule {
    fn default() -> Self {
        Self {
            enabled: true,
            strong_net_transfers: 50_000,
            likely_net_transfers: 20_000,
        }
    }
}

/// Thresholds for transfer risk and recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Low risk needs |points diff| at or under this...
    pub low_risk_max_points: f64,
    /// ...and |form diff| under this.
    pub low_risk_max_form: f64,
    /// High risk above this |points diff|...
    pub high_risk_min_points: f64,
    /// ...or above this average incoming difficulty.
    pub high_risk_min_difficulty: f64,
    /// Strong Buy needs a points gain above this.
    pub strong_buy_min_points: f64,
    /// Avoid below this points diff...
    pub avoid_max_points: f64,
    /// ...or below this form diff.
    pub avoid_max_form: f64,
    pub momentum: MomentumRule,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            low_risk_max_points: 2.0,
            low_risk_max_form: 1.0,
            high_risk_min_points: 5.0,
            high_risk_min_difficulty: 3.5,
            strong_buy_min_points: 3.0,
            avoid_max_points: -2.0,
            avoid_max_form: -1.5,
            momentum: MomentumRule::default(),
        }
    }
}

/// Full model calibration.
///
/// # Examples
///
/// ```rust
/// use fpl_xpts::ModelConfig;
///
/// let config = ModelConfig::from_json_str(r#"{ "scoring": { "points_scale": 0.9 } }"#).unwrap();
/// assert_eq!(config.scoring.points_scale, 0.9);
/// assert_eq!(config.scoring.reason_floor, 0.5);
/// assert_eq!(config.default_horizon, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights: ProfileWeights,
    pub normalization: NormalizationConfig,
    pub scoring: ScoringConfig,
    pub transfer: TransferConfig,
    /// Gameweeks projected when the caller does not say.
    pub default_horizon: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights: ProfileWeights::default(),
            normalization: NormalizationConfig::default(),
            scoring: ScoringConfig::default(),
            transfer: TransferConfig::default(),
            default_horizon: 3,
        }
    }
}

impl ModelConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!("Loaded model config from {}", path.display());
        Ok(config)
    }

    pub fn weights_for(&self, profile: WeightProfile) -> &FactorWeights {
        self.weights.for_profile(profile)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        for (name, weights) in [
            ("attacking", &self.weights.attacking),
            ("defensive", &self.weights.defensive),
        ] {
            let sum = weights.sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(XptsError::InvalidConfig {
                    message: format!("{name} weights sum to {sum}, expected 1.0"),
                });
            }
            if FactorKind::ALL.iter().any(|k| weights.weight(*k) < 0.0) {
                return Err(XptsError::InvalidConfig {
                    message: format!("{name} weights must not be negative"),
                });
            }
        }
        if self.scoring.points_scale < 0.0 {
            return Err(XptsError::InvalidConfig {
                message: "points_scale must not be negative".to_string(),
            });
        }
        let momentum = &self.transfer.momentum;
        if momentum.likely_net_transfers <= 0 || momentum.strong_net_transfers <= 0 {
            return Err(XptsError::InvalidConfig {
                message: "momentum net-transfer thresholds must be positive".to_string(),
            });
        }
        let difficulty = self.normalization.neutral_difficulty;
        if !(1..=5).contains(&difficulty) {
            return Err(XptsError::InvalidConfig {
                message: format!("neutral_difficulty must be 1-5, got {difficulty}"),
            });
        }
        if momentum.likely_net_transfers > momentum.strong_net_transfers {
            return Err(XptsError::InvalidConfig {
                message: "likely_net_transfers must not exceed strong_net_transfers".to_string(),
            });
        }
        Ok(())
    }
}
