//! Fantasy Premier League position types and utilities.

use crate::error::XptsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FPL player positions.
///
/// `Unknown` only appears when provider data carries a position string we do
/// not recognise. It never parses from the command line.
///
/// # Examples
///
/// ```rust
/// use fpl_xpts::Position;
///
/// let gk: Position = "GK".parse().unwrap();
/// assert_eq!(gk, Position::GKP);
/// assert_eq!(gk.to_string(), "GKP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GKP,
    DEF,
    MID,
    FWD,
    #[serde(other)]
    Unknown,
}

impl Position {
    /// Map an FPL `element_type` id (1-4) to a position.
    pub fn from_element_type(id: u8) -> Self {
        match id {
            1 => Position::GKP,
            2 => Position::DEF,
            3 => Position::MID,
            4 => Position::FWD,
            _ => Position::Unknown,
        }
    }

    /// True for the positions scored on clean sheets rather than attacking returns.
    pub fn is_defensive(&self) -> bool {
        matches!(self, Position::GKP | Position::DEF)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::GKP => "GKP",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
            Position::Unknown => "???",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = XptsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GKP" | "GK" | "GOALKEEPER" => Ok(Position::GKP),
            "DEF" | "DEFENDER" => Ok(Position::DEF),
            "MID" | "MIDFIELDER" => Ok(Position::MID),
            "FWD" | "FW" | "FORWARD" => Ok(Position::FWD),
            _ => Err(XptsError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
