//! The resolved data snapshot the engine runs against.
//!
//! A snapshot file is either a previously saved [`Snapshot`] or a raw
//! [`FplBundle`]; the bundle is converted on load.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::types::{FplBundle, FplFixture, FplTeam};
use super::understat::{xgi_per90, UnderstatIndex};
use crate::cli::types::{Gameweek, PlayerId, PlayerQuery, Position, TeamId};
use crate::engine::types::{Fixture, PlayerMetrics, TeamLookup, TeamStrength};
use crate::error::{Result, XptsError};


/// Upcoming fixtures kept per team.
pub const MAX_UPCOMING_FIXTURES: usize = 5;

/// Players, teams and the manager's squad at one point in the season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub current_gameweek: Gameweek,
    pub players: Vec<PlayerMetrics>,
    #[serde(default)]
    pub teams: Vec<TeamStrength>,
    /// The manager's picks, in pick order.
    #[serde(default)]
    pub squad: Vec<PlayerId>,
}

/// Either snapshot layout
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    /// Raw FPL payloads saved side by side
    Fpl(Box<FplBundle>),
    /// A snapshot written by this tool
    Native(Snapshot),
}

impl SnapshotFile {
    fn into_snapshot(self) -> Snapshot {
        match self {
            SnapshotFile::Fpl(bundle) => Snapshot::from_bundle(*bundle),
            SnapshotFile::Native(snapshot) => snapshot,
        }
    }
}

impl TeamLookup for Snapshot {
    fn team_strength(&self, team: TeamId) -> Option<&TeamStrength> {
        self.teams.team_strength(team)
    }
}

impl Snapshot {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(s)?;
        Ok(file.into_snapshot())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            gameweek = %snapshot.current_gameweek,
            players = snapshot.players.len(),
            teams = snapshot.teams.len(),
            squad = snapshot.squad.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerMetrics> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Resolve a command-line player query.
    ///
    /// A name matching several players is ambiguous unless exactly one of
    /// them matches it in full.
    pub fn find(&self, query: &PlayerQuery) -> Result<&PlayerMetrics> {
        let hits: Vec<&PlayerMetrics> = self
            .players
            .iter()
            .filter(|p| query.matches(p.id, &p.name))
            .collect();

        match hits.as_slice() {
            [] => Err(XptsError::PlayerNotFound {
                query: query.to_string(),
            }),
            [only] => Ok(*only),
            many => {
                let exact: Vec<&PlayerMetrics> = many
                    .iter()
                    .copied()
                    .filter(|p| query.matches_exactly(&p.name))
                    .collect();
                if let [only] = exact.as_slice() {
                    return Ok(*only);
                }
                Err(XptsError::AmbiguousPlayer {
                    query: query.to_string(),
                    matches: many.iter().map(|p| format!("{} ({})", p.name, p.id)).collect(),
                })
            }
        }
    }

    /// The squad's players, in pick order. Picks missing from `players` are
    /// skipped.
    pub fn squad_players(&self) -> Vec<&PlayerMetrics> {
        self.squad
            .iter()
            .filter_map(|&id| {
                let player = self.player(id);
                if player.is_none() {
                    tracing::warn!(player_id = %id, "squad pick not found in snapshot, skipping");
                }
                player
            })
            .collect()
    }

    pub fn in_squad(&self, id: PlayerId) -> bool {
        self.squad.contains(&id)
    }

    /// Build a snapshot from raw FPL payloads.
    pub fn from_bundle(bundle: FplBundle) -> Self {
        let FplBundle {
            bootstrap,
            fixtures,
            picks,
            understat,
        } = bundle;

        let current_gameweek = bootstrap.current_gameweek();

        let positions: HashMap<u8, Position> = bootstrap
            .element_types
            .iter()
            .map(|t| {
                let position = t
                    .singular_name_short
                    .parse::<Position>()
                    .unwrap_or_else(|_| Position::from_element_type(t.id));
                (t.id, position)
            })
            .collect();

        let short_names: HashMap<u32, &str> = bootstrap
            .teams
            .iter()
            .map(|t| (t.id, t.short_name.as_str()))
            .collect();

        let upcoming = upcoming_fixtures_by_team(&fixtures, &short_names, current_gameweek);
        let xg_index = UnderstatIndex::new(&understat);

        let mut players = Vec::with_capacity(bootstrap.elements.len());
        for element in &bootstrap.elements {
            if !short_names.contains_key(&element.team) {
                tracing::warn!(
                    player_id = element.id,
                    team = element.team,
                    "player belongs to an unknown team, skipping"
                );
                continue;
            }
            let position = positions
                .get(&element.element_type)
                .copied()
                .unwrap_or_else(|| Position::from_element_type(element.element_type));

            players.push(PlayerMetrics {
                id: PlayerId::new(element.id),
                name: element.web_name.clone(),
                position,
                team_id: TeamId::new(element.team),
                form: element.form,
                points_per_game: element.points_per_game,
                ict_index: element.ict_index,
                appearances: None,
                minutes: element.minutes,
                bonus: element.bonus,
                chance_of_playing: element.chance_of_playing_next_round,
                price: element.now_cost as f64 / 10.0,
                selected_by_percent: element.selected_by_percent,
                net_transfers_event: element.transfers_in_event - element.transfers_out_event,
                xgi_per90: xg_index.find(element).and_then(xgi_per90),
                upcoming_fixtures: upcoming.get(&element.team).cloned().unwrap_or_default(),
            });
        }

        let squad = picks
            .map(|p| {
                let mut picks = p.picks;
                picks.sort_by_key(|pick| pick.position.unwrap_or(u8::MAX));
                picks.into_iter().map(|pick| PlayerId::new(pick.element)).collect()
            })
            .unwrap_or_default();

        Snapshot {
            current_gameweek: Gameweek::new(current_gameweek),
            players,
            teams: bootstrap.teams.iter().map(team_strength).collect(),
            squad,
        }
    }
}

fn team_strength(team: &FplTeam) -> TeamStrength {
    TeamStrength {
        id: TeamId::new(team.id),
        short_name: team.short_name.clone(),
        strength_attack_home: team.strength_attack_home,
        strength_attack_away: team.strength_attack_away,
        strength_defence_home: team.strength_defence_home,
        strength_defence_away: team.strength_defence_away,
    }
}

/// Each team's next unplayed fixtures after `current_gameweek`, in gameweek
/// order, at most [`MAX_UPCOMING_FIXTURES`] per team.
fn upcoming_fixtures_by_team(
    fixtures: &[FplFixture],
    short_names: &HashMap<u32, &str>,
    current_gameweek: u16,
) -> HashMap<u32, Vec<Fixture>> {
    let mut future: Vec<&FplFixture> = fixtures
        .iter()
        .filter(|f| !f.finished && f.event.is_some_and(|gw| gw > current_gameweek))
        .collect();
    future.sort_by_key(|f| f.event);

    let label = |team: u32, venue: &str| {
        let short = short_names.get(&team).copied().unwrap_or("?");
        format!("{short} ({venue})")
    };

    let mut upcoming: HashMap<u32, Vec<Fixture>> = HashMap::new();
    for fixture in future {
        let gameweek = fixture.event.map(Gameweek::new);

        let home = upcoming.entry(fixture.team_h).or_default();
        if home.len() < MAX_UPCOMING_FIXTURES {
            home.push(Fixture {
                gameweek,
                opponent: label(fixture.team_a, "H"),
                difficulty: fixture.team_h_difficulty,
            });
        }

        let away = upcoming.entry(fixture.team_a).or_default();
        if away.len() < MAX_UPCOMING_FIXTURES {
            away.push(Fixture {
                gameweek,
                opponent: label(fixture.team_h, "A"),
                difficulty: fixture.team_a_difficulty,
            });
        }
    }
    upcoming
}
