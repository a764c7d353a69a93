use crate::model::card::CardId;
use crate::model::player::{PlayerId, seats_between};
use crate::model::triple::Triple;

/// A suggestion as observed at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub suggester: PlayerId,
    pub triple: Triple,
    pub disprover: Option<PlayerId>,
    /// Card shown to the suggester, when this seat got to see it.
    pub revealed: Option<CardId>,
}

impl Suggestion {
    pub fn is_disproved(&self) -> bool {
        self.disprover.is_some()
    }

    /// Seats that were asked before the disprover and could not answer.
    pub fn passed(&self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        let end = self.disprover.unwrap_or(self.suggester);
        seats_between(self.suggester, end, player_count)
    }
}
