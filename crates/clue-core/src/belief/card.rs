use crate::model::card::CardId;
use crate::model::mask::PlayerMask;
use crate::model::player::PlayerId;

/// What is known about one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBelief {
    pub(crate) owner: Option<PlayerId>,
    pub(crate) in_solution: bool,
    pub(crate) possible_owners: PlayerMask,
    pub(crate) revealed_to: PlayerMask,
}

impl CardBelief {
    pub(crate) fn new(possible_owners: PlayerMask) -> Self {
        Self {
            owner: None,
            in_solution: false,
            possible_owners,
            revealed_to: PlayerMask::EMPTY,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn in_solution(&self) -> bool {
        self.in_solution
    }

    /// Seats not yet ruled out. Empty once the card is resolved.
    pub fn possible_owners(&self) -> PlayerMask {
        self.possible_owners
    }

    /// Seats this card has been shown to. Only tracked for our own cards.
    pub fn revealed_to(&self) -> PlayerMask {
        self.revealed_to
    }

    pub fn is_resolved(&self) -> bool {
        self.owner.is_some() || self.in_solution
    }
}

/// Resolution counters for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBelief {
    pub(crate) unresolved: usize,
    pub(crate) solution: Option<CardId>,
}

impl CategoryBelief {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            unresolved: size,
            solution: None,
        }
    }

    /// Cards in the category with neither an owner nor solution status.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn solution(&self) -> Option<CardId> {
        self.solution
    }
}
