use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat at the table, numbered in deal order from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Largest table a [`PlayerMask`](crate::model::mask::PlayerMask) can describe.
    pub const LIMIT: usize = 32;

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LIMIT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub(crate) const fn from_bit(bit: u32) -> Self {
        Self(bit as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seat to the left, wrapping around a table of `player_count`.
    pub fn next(self, player_count: usize) -> PlayerId {
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every seat of a table, in deal order.
pub fn seats(player_count: usize) -> impl Iterator<Item = PlayerId> {
    (0..player_count.min(PlayerId::LIMIT)).map(|index| PlayerId(index as u8))
}

/// Seats strictly after `start`, stopping before `end`, wrapping around the table.
///
/// When `end == start` every other seat is visited once.
pub fn seats_between(
    start: PlayerId,
    end: PlayerId,
    player_count: usize,
) -> impl Iterator<Item = PlayerId> {
    let seats = player_count.clamp(1, PlayerId::LIMIT);
    (1..seats)
        .map(move |offset| PlayerId(((start.index() + offset) % seats) as u8))
        .take_while(move |seat| *seat != end)
}
