use crate::model::card::CardId;
use crate::model::category::Category;
use crate::model::deck::Deck;
use crate::model::mask::CardMask;

/// One card per category, stored in [`Category::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple([CardId; Category::COUNT]);

impl Triple {
    /// Orders `cards` by category; `None` unless each category appears exactly once.
    pub fn from_cards(deck: &Deck, cards: [CardId; Category::COUNT]) -> Option<Self> {
        let mut slots: [Option<CardId>; Category::COUNT] = [None; Category::COUNT];
        for card in cards {
            let slot = &mut slots[deck.category(card).index()];
            if slot.is_some() {
                return None;
            }
            *slot = Some(card);
        }
        let [Some(suspect), Some(weapon), Some(room)] = slots else {
            return None;
        };
        Some(Self([suspect, weapon, room]))
    }

    /// Builds a triple from per-category picks that the caller already ordered.
    pub(crate) const fn from_ordered(cards: [CardId; Category::COUNT]) -> Self {
        Self(cards)
    }

    /// First card of every category.
    pub fn first(deck: &Deck) -> Self {
        Self(Category::ALL.map(|category| deck.members(category)[0]))
    }

    /// Every possible triple of `deck`, suspects varying slowest.
    pub fn all(deck: &Deck) -> impl Iterator<Item = Triple> + '_ {
        deck.members(Category::Suspect).iter().flat_map(move |&suspect| {
            deck.members(Category::Weapon).iter().flat_map(move |&weapon| {
                deck.members(Category::Room)
                    .iter()
                    .map(move |&room| Triple([suspect, weapon, room]))
            })
        })
    }

    pub fn card(&self, category: Category) -> CardId {
        self.0[category.index()]
    }

    pub fn cards(&self) -> [CardId; Category::COUNT] {
        self.0
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.0.contains(&card)
    }

    pub fn mask(&self) -> CardMask {
        self.0.into_iter().collect()
    }

    pub fn names<'a>(&self, deck: &'a Deck) -> [&'a str; Category::COUNT] {
        self.0.map(|card| deck.name(card))
    }

    pub fn to_names(&self, deck: &Deck) -> [String; Category::COUNT] {
        self.0.map(|card| deck.name(card).to_string())
    }
}
