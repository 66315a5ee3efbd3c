//! Player selectors for CLI commands.

use super::ids::PlayerId;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How a player was named on the command line.
///
/// A purely numeric argument is an FPL element id, anything else is matched
/// against display names (case-insensitive substring).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerQuery {
    Id(PlayerId),
    Name(String),
}

impl PlayerQuery {
    /// Does this query select a player with the given id and name?
    pub fn matches(&self, id: PlayerId, name: &str) -> bool {
        match self {
            PlayerQuery::Id(want) => *want == id,
            PlayerQuery::Name(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        }
    }

    /// Exact (case-insensitive) name match, used to break ties between substring hits.
    pub fn matches_exactly(&self, name: &str) -> bool {
        match self {
            PlayerQuery::Id(_) => false,
            PlayerQuery::Name(needle) => name.to_lowercase() == needle.to_lowercase(),
        }
    }
}

impl FromStr for PlayerQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<PlayerId>() {
            Ok(id) => PlayerQuery::Id(id),
            Err(_) => PlayerQuery::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for PlayerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerQuery::Id(id) => write!(f, "#{}", id),
            PlayerQuery::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_query_is_id() {
        let q: PlayerQuery = "351".parse().unwrap();
        assert_eq!(q, PlayerQuery::Id(PlayerId::new(351)));
        assert!(q.matches(PlayerId::new(351), "Anyone"));
        assert!(!q.matches(PlayerId::new(350), "Anyone"));
    }

    #[test]
    fn test_name_query_substring_match() {
        let q: PlayerQuery = "saka".parse().unwrap();
        assert!(q.matches(PlayerId::new(1), "Saka"));
        assert!(q.matches(PlayerId::new(1), "B.Saka"));
        assert!(!q.matches(PlayerId::new(1), "Salah"));
        assert!(q.matches_exactly("SAKA"));
        assert!(!q.matches_exactly("B.Saka"));
    }

    #[test]
    fn test_exact_match_folds_non_ascii_case() {
        let q: PlayerQuery = "ødegaard".parse().unwrap();
        assert!(q.matches(PlayerId::new(1), "Ødegaard"));
        assert!(q.matches_exactly("Ødegaard"));
        assert!(!q.matches_exactly("Ødegaard Jr"));
    }

    #[test]
    fn test_query_display() {
        assert_eq!("7".parse::<PlayerQuery>().unwrap().to_string(), "#7");
        assert_eq!("Palmer".parse::<PlayerQuery>().unwrap().to_string(), "Palmer");
    }
}
