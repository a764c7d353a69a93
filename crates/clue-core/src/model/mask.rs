//! Fixed-width bit sets over cards and seats.

use crate::model::card::CardId;
use crate::model::player::PlayerId;

/// Set of cards, one bit per [`CardId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CardMask(u64);

impl CardMask {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// The first `count` cards of a deck.
    pub const fn first_n(count: usize) -> Self {
        if count >= CardId::LIMIT {
            Self(u64::MAX)
        } else {
            Self((1u64 << count) - 1)
        }
    }

    pub const fn single(card: CardId) -> Self {
        Self(1 << card.index())
    }

    pub const fn contains(self, card: CardId) -> bool {
        self.0 & (1 << card.index()) != 0
    }

    pub const fn with(self, card: CardId) -> Self {
        Self(self.0 | (1 << card.index()))
    }

    pub const fn without(self, card: CardId) -> Self {
        Self(self.0 & !(1 << card.index()))
    }

    /// Adds `card`, returning whether it was absent.
    pub fn insert(&mut self, card: CardId) -> bool {
        let before = self.0;
        self.0 |= 1 << card.index();
        before != self.0
    }

    /// Removes `card`, returning whether it was present.
    pub fn remove(&mut self, card: CardId) -> bool {
        let before = self.0;
        self.0 &= !(1 << card.index());
        before != self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest-numbered card in the set.
    pub fn first(self) -> Option<CardId> {
        if self.0 == 0 {
            None
        } else {
            Some(CardId::from_bit(self.0.trailing_zeros()))
        }
    }

    pub fn iter(self) -> CardIter {
        CardIter(self.0)
    }
}

impl FromIterator<CardId> for CardMask {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, CardMask::with)
    }
}

impl IntoIterator for CardMask {
    type Item = CardId;
    type IntoIter = CardIter;

    fn into_iter(self) -> CardIter {
        self.iter()
    }
}

/// Ascending iterator over the cards of a [`CardMask`].
#[derive(Debug, Clone)]
pub struct CardIter(u64);

impl Iterator for CardIter {
    type Item = CardId;

    fn next(&mut self) -> Option<CardId> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(CardId::from_bit(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for CardIter {}

/// Set of seats, one bit per [`PlayerId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerMask(u32);

impl PlayerMask {
    pub const EMPTY: Self = Self(0);

    /// Every seat of a table of `player_count`.
    pub const fn all(player_count: usize) -> Self {
        if player_count >= PlayerId::LIMIT {
            Self(u32::MAX)
        } else {
            Self((1u32 << player_count) - 1)
        }
    }

    pub const fn contains(self, player: PlayerId) -> bool {
        self.0 & (1 << player.index()) != 0
    }

    pub fn insert(&mut self, player: PlayerId) -> bool {
        let before = self.0;
        self.0 |= 1 << player.index();
        before != self.0
    }

    pub fn remove(&mut self, player: PlayerId) -> bool {
        let before = self.0;
        self.0 &= !(1 << player.index());
        before != self.0
    }

    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PlayerId> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let bit = bits.trailing_zeros();
            bits &= bits - 1;
            Some(PlayerId::from_bit(bit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CardMask, PlayerMask};
    use crate::model::card::CardId;
    use crate::model::player::PlayerId;

    fn card(index: usize) -> CardId {
        CardId::from_index(index).unwrap()
    }

    #[test]
    fn insert_and_remove_report_changes() {
        let mut mask = CardMask::EMPTY;
        assert!(mask.insert(card(5)));
        assert!(!mask.insert(card(5)));
        assert!(mask.contains(card(5)));
        assert!(mask.remove(card(5)));
        assert!(!mask.remove(card(5)));
        assert!(mask.is_empty());
    }

    #[test]
    fn iterates_in_ascending_order() {
        let mask: CardMask = [card(40), card(2), card(63), card(0)].into_iter().collect();
        let cards: Vec<usize> = mask.iter().map(CardId::index).collect();
        assert_eq!(cards, vec![0, 2, 40, 63]);
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.first(), Some(card(0)));
    }

    #[test]
    fn set_algebra() {
        let a: CardMask = [card(1), card(2), card(3)].into_iter().collect();
        let b: CardMask = [card(3), card(4)].into_iter().collect();
        assert_eq!(a.intersection(b), CardMask::single(card(3)));
        assert_eq!(a.difference(b).len(), 2);
        assert_eq!(a.union(b).len(), 4);
        assert!(!a.is_disjoint(b));
        assert!(CardMask::single(card(4)).is_subset(b));
    }

    #[test]
    fn first_n_covers_full_width() {
        assert_eq!(CardMask::first_n(3).len(), 3);
        assert_eq!(CardMask::first_n(64).len(), 64);
    }

    #[test]
    fn player_mask_all_and_iter() {
        let mut mask = PlayerMask::all(4);
        assert_eq!(mask.len(), 4);
        assert!(mask.remove(PlayerId::from_index(2).unwrap()));
        let seats: Vec<usize> = mask.iter().map(PlayerId::index).collect();
        assert_eq!(seats, vec![0, 1, 3]);
        assert!(mask.is_subset(PlayerMask::all(4)));
        assert_eq!(PlayerMask::all(32).len(), 32);
    }
}
