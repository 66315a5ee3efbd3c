//! ID types for Fantasy Premier League entities.

use crate::error::{XptsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for FPL player (element) IDs.
///
/// # Examples
///
/// ```rust
/// use fpl_xpts::PlayerId;
///
/// let id = PlayerId::new(328);
/// assert_eq!(id.as_u32(), 328);
/// assert_eq!(id.to_string(), "328");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for Premier League team IDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for gameweek numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Gameweek(pub u16);

impl Gameweek {
    pub fn new(gw: u16) -> Self {
        Self(gw)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Gameweek {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}", self.0)
    }
}

impl FromStr for Gameweek {
    type Err = XptsError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim().trim_start_matches("GW").trim_start_matches("gw");
        raw.parse().map(Self).map_err(|_| XptsError::InvalidConfig {
            message: format!("invalid gameweek: {s:?}"),
        })
    }
}
