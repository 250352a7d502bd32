//! Support formation planning
//!
//! Escort ships are laid out in three columns (center first, then left,
//! then right). Row 0 follows the player directly; deeper rows chain onto
//! the ship one row ahead in the same column, forming up to three tails.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A `(column, row)` coordinate in the escort formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub column: usize,
    pub row: usize,
}

impl Slot {
    /// Distance kept behind the leader
    pub fn rest_distance(&self) -> f32 {
        if self.row == 0 {
            SUPPORT_BASE_REST_DISTANCE
        } else {
            SUPPORT_SEGMENT_SPACING
        }
    }

    /// Sideways offset relative to the leader's facing
    pub fn lateral_offset(&self) -> f32 {
        if self.row == 0 {
            SUPPORT_COLUMN_OFFSETS.get(self.column).copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Non-owning reference to whatever a support ship follows.
///
/// `Support` indexes into the player's support list and is re-resolved
/// every tick, so removals never leave a dangling link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leader {
    Player,
    Support(usize),
}

/// How an existing formation reacts to a re-plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relayout {
    /// Teleport every ship onto its target and zero its velocity
    Snap,
    /// Only update leader links; ships re-converge through their springs
    Relink,
}

/// Number of escorts a given power level grants
pub fn support_count_for_level(power_level: u32) -> usize {
    (power_level.saturating_sub(1) as usize).min(MAX_SUPPORT_SHIPS)
}

/// Slot assigned to the `index`-th acquired escort
pub fn slot_for_index(index: usize) -> Slot {
    let cycle = SUPPORT_COLUMN_ORDER.len();
    Slot {
        column: SUPPORT_COLUMN_ORDER[index % cycle],
        row: index / cycle,
    }
}

/// Slots for the first `count` escorts (capped at the roster limit)
pub fn formation_slots(count: usize) -> Vec<Slot> {
    (0..count.min(MAX_SUPPORT_SHIPS)).map(slot_for_index).collect()
}

/// Leader for the ship at `index` given the slots currently in use.
///
/// Row 0 follows the player. Deeper rows follow the ship occupying the same
/// column one row ahead, falling back to the player when that slot is empty.
pub fn leader_for(slots: &[Slot], index: usize) -> Leader {
    let Some(slot) = slots.get(index) else {
        return Leader::Player;
    };
    if slot.row == 0 {
        return Leader::Player;
    }
    slots
        .iter()
        .enumerate()
        .find(|(i, s)| *i != index && s.column == slot.column && s.row == slot.row - 1)
        .map(|(i, _)| Leader::Support(i))
        .unwrap_or(Leader::Player)
}

/// Full plan for a roster of `count` ships: slot and leader per index
pub fn plan(count: usize) -> Vec<(Slot, Leader)> {
    let slots = formation_slots(count);
    (0..slots.len())
        .map(|i| (slots[i], leader_for(&slots, i)))
        .collect()
}
