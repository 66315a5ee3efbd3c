//! Matching FPL players to Understat records by name.
//!
//! The two sources spell names differently (`"Ødegaard"` vs `"Martin Odegaard"`),
//! so names are reduced to lowercase ASCII letters and spaces before comparing.

use deunicode::deunicode;
use std::collections::HashMap;

use super::types::{Element, UnderstatPlayer};

/// Suffix matching is only tried for web names at least this long.
const MIN_SUFFIX_LEN: usize = 4;

/// Strip accents, lowercase, and drop everything but `a-z` and whitespace.
pub fn normalize_name(name: &str) -> String {
    let ascii = deunicode(name).to_lowercase();
    ascii
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Expected goal involvements per 90 minutes, if the player has played.
pub fn xgi_per90(player: &UnderstatPlayer) -> Option<f64> {
    if player.time > 0.0 {
        Some((player.xg + player.xa) / player.time * 90.0)
    } else {
        None
    }
}

/// Understat records keyed by normalized name. A later record with the same
/// key replaces an earlier one.
pub struct UnderstatIndex<'a> {
    entries: Vec<(String, &'a UnderstatPlayer)>,
    by_key: HashMap<String, usize>,
}

impl<'a> UnderstatIndex<'a> {
    pub fn new(players: &'a [UnderstatPlayer]) -> Self {
        let mut entries: Vec<(String, &'a UnderstatPlayer)> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();
        for player in players {
            let key = normalize_name(&player.name);
            if key.is_empty() {
                continue;
            }
            match by_key.get(&key) {
                Some(&i) => entries[i].1 = player,
                None => {
                    by_key.insert(key.clone(), entries.len());
                    entries.push((key, player));
                }
            }
        }
        Self { entries, by_key }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn exact(&self, key: &str) -> Option<&'a UnderstatPlayer> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).map(|&i| self.entries[i].1)
    }

    /// Find the Understat record for an FPL player.
    ///
    /// Tries the web name, the second name, then the full name; failing
    /// those, a web name of four or more letters may match as a suffix of a
    /// record's name (or the other way round), which catches compound
    /// surnames like `"Alexander-Arnold"`.
    pub fn find(&self, element: &Element) -> Option<&'a UnderstatPlayer> {
        let web = normalize_name(&element.web_name);
        let full = normalize_name(&format!("{} {}", element.first_name, element.second_name));

        self.exact(&web)
            .or_else(|| self.exact(&normalize_name(&element.second_name)))
            .or_else(|| self.exact(&full))
            .or_else(|| {
                if web.len() < MIN_SUFFIX_LEN {
                    return None;
                }
                self.entries
                    .iter()
                    .find(|(key, _)| key.ends_with(&web) || web.ends_with(key.as_str()))
                    .map(|(_, player)| *player)
            })
    }
}
