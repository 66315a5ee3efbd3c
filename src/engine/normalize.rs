//! Map raw player/team metrics onto a common 0-10 scale.
//!
//! Every function here is total. Missing data falls back to a neutral score
//! (or to "fully available" for availability) instead of failing, and NaN
//! inputs clamp to the bottom of the range.

use super::config::{NormalizationConfig, WeightProfile};
use super::types::{TeamStrength, Venue};

/// Bounds of the common scale.
pub const SCALE_MIN: f64 = 0.0;
pub const SCALE_MAX: f64 = 10.0;

/// Bound `value` to `[min, max]`. NaN becomes `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    // f64::max ignores a NaN operand, so NaN lands on `min`
    value.max(min).min(max)
}

fn to_scale(value: f64) -> f64 {
    clamp(value, SCALE_MIN, SCALE_MAX)
}

impl NormalizationConfig {
    pub fn norm_form(&self, form: f64) -> f64 {
        to_scale(form)
    }

    pub fn norm_ppg(&self, points_per_game: f64) -> f64 {
        to_scale(points_per_game * self.ppg_multiplier)
    }

    pub fn norm_ict(&self, ict: f64) -> f64 {
        to_scale(ict / self.ict_divisor)
    }

    /// Linear and decreasing: difficulty 1 scores 10, difficulty 5 scores 0.
    pub fn norm_fdr(&self, difficulty: f64) -> f64 {
        to_scale((self.fdr_hardest - difficulty) * self.fdr_step)
    }

    pub fn norm_availability(&self, chance_of_playing: Option<f64>) -> f64 {
        match chance_of_playing {
            None => self.fully_available,
            Some(chance) => to_scale(chance / self.availability_divisor),
        }
    }

    pub fn norm_bonus(&self, bonus: f64, appearances: f64) -> f64 {
        // also catches NaN appearances
        if !(appearances > 0.0) {
            return self.neutral;
        }
        to_scale(bonus / appearances * self.bonus_rate_multiplier)
    }

    pub fn norm_team_strength(
        &self,
        team: Option<&TeamStrength>,
        profile: WeightProfile,
        venue: Venue,
    ) -> f64 {
        match team.and_then(|t| t.rating(profile.is_defensive(), venue)) {
            Some(raw) => {
                to_scale((raw - self.team_strength_baseline) / self.team_strength_divisor)
            }
            None => self.neutral,
        }
    }

    /// Fixed bias, not derived from data.
    pub fn norm_home_away(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home_bias,
            Venue::Away => self.away_bias,
        }
    }
}
