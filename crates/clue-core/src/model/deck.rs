use crate::model::card::CardId;
use crate::model::category::Category;
use crate::model::mask::CardMask;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

const CLASSIC_SUSPECTS: [&str; 6] = ["Scarlet", "Mustard", "White", "Green", "Peacock", "Plum"];
const CLASSIC_WEAPONS: [&str; 6] = ["Candlestick", "Knife", "Pipe", "Revolver", "Rope", "Wrench"];
const CLASSIC_ROOMS: [&str; 9] = [
    "Kitchen",
    "Ballroom",
    "Conservatory",
    "DiningRoom",
    "BilliardRoom",
    "Library",
    "Lounge",
    "Hall",
    "Study",
];

/// The card universe of a game: three categories of uniquely named cards.
///
/// Card ids are assigned category by category in the order given, so
/// iterating a [`CardMask`] walks suspects, then weapons, then rooms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DeckLayout")]
pub struct Deck {
    names: Vec<String>,
    categories: Vec<Category>,
    members: [Vec<CardId>; Category::COUNT],
    index: HashMap<String, CardId>,
}

/// Serialized form of a [`Deck`].
#[derive(Debug, Clone, Deserialize)]
pub struct DeckLayout {
    pub suspects: Vec<String>,
    pub weapons: Vec<String>,
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("category {0} has no cards")]
    EmptyCategory(Category),
    #[error("deck has {count} cards but at most {max} are supported")]
    TooManyCards { count: usize, max: usize },
    #[error("card name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("card name '{0}' is empty or contains whitespace")]
    InvalidName(String),
}

impl TryFrom<DeckLayout> for Deck {
    type Error = DeckError;

    fn try_from(layout: DeckLayout) -> Result<Self, DeckError> {
        Deck::new([layout.suspects, layout.weapons, layout.rooms])
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::classic()
    }
}

impl Deck {
    /// Six suspects, six weapons and nine rooms.
    pub fn classic() -> Self {
        Self::build([
            CLASSIC_SUSPECTS.iter().map(|name| name.to_string()).collect(),
            CLASSIC_WEAPONS.iter().map(|name| name.to_string()).collect(),
            CLASSIC_ROOMS.iter().map(|name| name.to_string()).collect(),
        ])
    }

    pub fn new<S: Into<String>>(categories: [Vec<S>; Category::COUNT]) -> Result<Self, DeckError> {
        let categories = categories.map(|names| names.into_iter().map(Into::into).collect::<Vec<String>>());

        let count: usize = categories.iter().map(Vec::len).sum();
        if count > CardId::LIMIT {
            return Err(DeckError::TooManyCards {
                count,
                max: CardId::LIMIT,
            });
        }

        let mut seen = HashSet::new();
        for (category, names) in Category::ALL.iter().zip(categories.iter()) {
            if names.is_empty() {
                return Err(DeckError::EmptyCategory(*category));
            }
            for name in names {
                if name.is_empty() || name.chars().any(char::is_whitespace) {
                    return Err(DeckError::InvalidName(name.clone()));
                }
                if !seen.insert(name.as_str()) {
                    return Err(DeckError::DuplicateName(name.clone()));
                }
            }
        }

        Ok(Self::build(categories))
    }

    fn build(categories: [Vec<String>; Category::COUNT]) -> Self {
        let mut names = Vec::new();
        let mut owners = Vec::new();
        let mut members: [Vec<CardId>; Category::COUNT] = Default::default();
        let mut index = HashMap::new();
        for (category, group) in Category::ALL.into_iter().zip(categories) {
            for name in group {
                let Some(id) = CardId::from_index(names.len()) else {
                    break;
                };
                index.insert(name.clone(), id);
                members[category.index()].push(id);
                owners.push(category);
                names.push(name);
            }
        }
        Self {
            names,
            categories: owners,
            members,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Cards dealt to players: everything except one solution card per category.
    pub fn dealt_count(&self) -> usize {
        self.len().saturating_sub(Category::COUNT)
    }

    pub fn card(&self, name: &str) -> Option<CardId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, card: CardId) -> &str {
        &self.names[card.index()]
    }

    pub fn category(&self, card: CardId) -> Category {
        self.categories[card.index()]
    }

    pub fn members(&self, category: Category) -> &[CardId] {
        &self.members[category.index()]
    }

    pub fn category_mask(&self, category: Category) -> CardMask {
        self.members(category).iter().copied().collect()
    }

    pub fn full_mask(&self) -> CardMask {
        CardMask::first_n(self.len())
    }

    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.full_mask().iter()
    }

    /// Names of `mask`'s cards in deck order, comma separated.
    pub fn describe(&self, mask: CardMask) -> String {
        mask.iter()
            .map(|card| self.name(card))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, DeckError};
    use crate::model::category::Category;

    #[test]
    fn classic_deck_has_21_cards() {
        let deck = Deck::classic();
        assert_eq!(deck.len(), 21);
        assert_eq!(deck.dealt_count(), 18);
        assert_eq!(deck.members(Category::Suspect).len(), 6);
        assert_eq!(deck.members(Category::Weapon).len(), 6);
        assert_eq!(deck.members(Category::Room).len(), 9);
    }

    #[test]
    fn lookup_by_name_roundtrips() {
        let deck = Deck::classic();
        let knife = deck.card("Knife").expect("knife exists");
        assert_eq!(deck.name(knife), "Knife");
        assert_eq!(deck.category(knife), Category::Weapon);
        assert_eq!(deck.card("Spoon"), None);
    }

    #[test]
    fn ids_follow_category_order() {
        let deck = Deck::new([vec!["a", "b"], vec!["c"], vec!["d", "e"]]).unwrap();
        let order: Vec<&str> = deck.cards().map(|card| deck.name(card)).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(deck.describe(deck.category_mask(Category::Room)), "d,e");
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Deck::new([vec!["a"], vec!["b"], vec!["a"]]).unwrap_err();
        assert_eq!(err, DeckError::DuplicateName("a".to_string()));
    }

    #[test]
    fn rejects_empty_category() {
        let err = Deck::new([vec!["a"], Vec::<&str>::new(), vec!["b"]]).unwrap_err();
        assert_eq!(err, DeckError::EmptyCategory(Category::Weapon));
    }

    #[test]
    fn rejects_names_with_whitespace() {
        let err = Deck::new([vec!["Dining Room"], vec!["b"], vec!["c"]]).unwrap_err();
        assert!(matches!(err, DeckError::InvalidName(_)));
    }

    #[test]
    fn rejects_oversized_deck() {
        let rooms: Vec<String> = (0..63).map(|i| format!("r{i}")).collect();
        let err = Deck::new([vec!["a".to_string()], vec!["b".to_string()], rooms]).unwrap_err();
        assert!(matches!(err, DeckError::TooManyCards { count: 65, .. }));
    }

    #[test]
    fn deserializes_from_layout() {
        let yaml = "suspects: [Mu, Re]\nweapons: [Axe]\nrooms: [Pipe, Hall]\n";
        let deck: Deck = serde_yaml::from_str(yaml).expect("valid deck");
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.category(deck.card("Hall").unwrap()), Category::Room);

        let invalid = "suspects: [Mu]\nweapons: []\nrooms: [Pipe]\n";
        assert!(serde_yaml::from_str::<Deck>(invalid).is_err());
    }
}
