use core::fmt;

/// Handle to a card: its position in the owning [`Deck`](crate::model::deck::Deck).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u8);

impl CardId {
    /// Largest deck a [`CardMask`](crate::model::mask::CardMask) can describe.
    pub const LIMIT: usize = 64;

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
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CardId;

    #[test]
    fn from_index_rejects_values_past_limit() {
        assert_eq!(CardId::from_index(63).map(CardId::index), Some(63));
        assert_eq!(CardId::from_index(64), None);
    }
}
