use crate::model::card::CardId;
use crate::model::mask::CardMask;
use crate::model::player::PlayerId;

/// Knowledge about one seat's hand.
///
/// `may_have` only lists cards that are still open for this seat: a card
/// moves out of it once it is assigned (to this or another seat) or ruled
/// out, so `must_have` and `may_have` are always disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBelief {
    pub(crate) id: PlayerId,
    pub(crate) hand_size: usize,
    pub(crate) must_have: CardMask,
    pub(crate) may_have: CardMask,
    pub(crate) selection_groups: Vec<CardMask>,
}

impl PlayerBelief {
    pub(crate) fn new(id: PlayerId, hand_size: usize, may_have: CardMask) -> Self {
        Self {
            id,
            hand_size,
            must_have: CardMask::EMPTY,
            may_have,
            selection_groups: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn must_have(&self) -> CardMask {
        self.must_have
    }

    pub fn may_have(&self) -> CardMask {
        self.may_have
    }

    /// Groups this seat holds at least one card of, in the order they were learned.
    pub fn selection_groups(&self) -> &[CardMask] {
        &self.selection_groups
    }

    /// Cards in this hand that are not yet identified.
    pub fn open_slots(&self) -> usize {
        self.hand_size.saturating_sub(self.must_have.len())
    }

    pub fn is_complete(&self) -> bool {
        self.must_have.len() == self.hand_size
    }

    pub fn is_satisfied(&self, group: CardMask) -> bool {
        !self.must_have.is_disjoint(group)
    }

    /// Selection groups not yet satisfied by a known card.
    pub fn pending_groups(&self) -> impl Iterator<Item = CardMask> + '_ {
        self.selection_groups
            .iter()
            .copied()
            .filter(|group| !self.is_satisfied(*group))
    }

    pub fn could_hold(&self, card: CardId) -> bool {
        self.must_have.contains(card) || self.may_have.contains(card)
    }
}
