//! Starting XI suggestion from a ranked squad.
//!
//! FPL lineups need exactly one goalkeeper, 3-5 defenders, 2-5 midfielders
//! and 1-3 forwards, eleven players in all. The pick is greedy: fill every
//! position's minimum with its best players, then take the best remaining
//! players until eleven start, skipping anyone whose position is full.

use serde::Serialize;

use super::ranking::{sort_by_xpts, PlayerProjection};
use crate::cli::types::Position;

pub const STARTING_XI: usize = 11;

/// Inclusive starter bounds for one position, and its slot in a
/// per-position count array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLimits {
    pub slot: usize,
    pub min: usize,
    pub max: usize,
}

/// Positions that can start, in slot order.
const STARTING_POSITIONS: [Position; 4] =
    [Position::GKP, Position::DEF, Position::MID, Position::FWD];

/// Starter bounds, or `None` for positions that can never start.
pub fn slot_limits(position: Position) -> Option<SlotLimits> {
    let (slot, min, max) = match position {
        Position::GKP => (0, 1, 1),
        Position::DEF => (1, 3, 5),
        Position::MID => (2, 2, 5),
        Position::FWD => (3, 1, 3),
        Position::Unknown => return None,
    };
    Some(SlotLimits { slot, min, max })
}

const OUTFIELD: [Position; 3] = [Position::DEF, Position::MID, Position::FWD];

/// Formation string, e.g. `"4-4-2"`: defenders, midfielders, forwards.
///
/// Goalkeepers and unknown positions are not counted.
pub fn detect_formation<I>(positions: I) -> String
where
    I: IntoIterator<Item = Position>,
{
    let mut counts = [0usize; 3];
    for position in positions {
        if let Some(i) = OUTFIELD.iter().position(|p| *p == position) {
            counts[i] += 1;
        }
    }
    format!("{}-{}-{}", counts[0], counts[1], counts[2])
}

#[derive(Debug, Clone, Serialize)]
pub struct Lineup<'a> {
    pub formation: String,
    /// Starters, best projection first.
    pub starters: Vec<PlayerProjection<'a>>,
    pub bench: Vec<PlayerProjection<'a>>,
    pub captain: Option<PlayerProjection<'a>>,
    pub vice_captain: Option<PlayerProjection<'a>>,
}

/// Pick a valid starting XI from projected players.
///
/// Squads too small or too unbalanced for a full eleven get as many starters
/// as the position limits allow. Captain and vice-captain are the two best
/// starters.
pub fn suggest_lineup<'a>(projections: &[PlayerProjection<'a>]) -> Lineup<'a> {
    let mut pool = projections.to_vec();
    sort_by_xpts(&mut pool);

    let mut chosen = vec![false; pool.len()];
    let mut counts = [0usize; STARTING_POSITIONS.len()];
    let mut starters = 0usize;

    for position in STARTING_POSITIONS {
        let Some(limits) = slot_limits(position) else {
            continue;
        };
        for (i, projection) in pool.iter().enumerate() {
            if counts[limits.slot] >= limits.min {
                break;
            }
            if projection.player.position == position {
                chosen[i] = true;
                counts[limits.slot] += 1;
                starters += 1;
            }
        }
    }

    for (i, projection) in pool.iter().enumerate() {
        if starters >= STARTING_XI {
            break;
        }
        if chosen[i] {
            continue;
        }
        let position = projection.player.position;
        let Some(limits) = slot_limits(position) else {
            continue;
        };
        if counts[limits.slot] < limits.max {
            chosen[i] = true;
            counts[limits.slot] += 1;
            starters += 1;
        }
    }

    let (starting, bench): (Vec<_>, Vec<_>) = pool
        .into_iter()
        .zip(chosen)
        .partition(|(_, is_starter)| *is_starter);
    let starters: Vec<PlayerProjection<'a>> = starting.into_iter().map(|(p, _)| p).collect();
    let bench: Vec<PlayerProjection<'a>> = bench.into_iter().map(|(p, _)| p).collect();

    Lineup {
        formation: detect_formation(starters.iter().map(|p| p.player.position)),
        captain: starters.first().cloned(),
        vice_captain: starters.get(1).cloned(),
        starters,
        bench,
    }
}
