use super::card::{CardBelief, CategoryBelief};
use super::player::PlayerBelief;
use crate::error::{Contradiction, MalformedEvent};
use crate::model::card::CardId;
use crate::model::category::Category;
use crate::model::deal::hand_size;
use crate::model::deck::Deck;
use crate::model::mask::{CardMask, PlayerMask};
use crate::model::player::{PlayerId, seats};

/// Fewest seats a game can have.
pub const MIN_PLAYERS: usize = 2;

/// Everything known about card ownership, seen from one seat.
///
/// Cards and seats refer to each other through `possible_owners` and
/// `may_have`; every mutation here updates both sides so that
/// `player ∈ card.possible_owners` exactly when `card ∈ player.may_have`.
#[derive(Debug, Clone)]
pub struct BeliefState {
    deck: Deck,
    perspective: PlayerId,
    pub(super) cards: Vec<CardBelief>,
    pub(super) categories: [CategoryBelief; Category::COUNT],
    pub(super) players: Vec<PlayerBelief>,
}

impl BeliefState {
    /// Fresh state in which every seat may hold every card.
    pub fn new(deck: Deck, player_count: usize, perspective: PlayerId) -> Result<Self, MalformedEvent> {
        if !(MIN_PLAYERS..=PlayerId::LIMIT).contains(&player_count) {
            return Err(MalformedEvent::PlayerCount {
                count: player_count,
                min: MIN_PLAYERS,
                max: PlayerId::LIMIT,
            });
        }
        if perspective.index() >= player_count {
            return Err(MalformedEvent::PlayerOutOfRange {
                index: perspective.index(),
                player_count,
            });
        }

        let everyone = PlayerMask::all(player_count);
        let cards = deck.cards().map(|_| CardBelief::new(everyone)).collect();
        let categories = Category::ALL.map(|category| CategoryBelief::new(deck.members(category).len()));
        let dealt = deck.dealt_count();
        let players = seats(player_count)
            .map(|seat| PlayerBelief::new(seat, hand_size(dealt, player_count, seat), deck.full_mask()))
            .collect();

        Ok(Self {
            deck,
            perspective,
            cards,
            categories,
            players,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The seat this state belongs to; its hand is fully known.
    pub fn perspective(&self) -> PlayerId {
        self.perspective
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, player: PlayerId) -> &PlayerBelief {
        &self.players[player.index()]
    }

    pub fn players(&self) -> &[PlayerBelief] {
        &self.players
    }

    pub fn card(&self, card: CardId) -> &CardBelief {
        &self.cards[card.index()]
    }

    pub fn category(&self, category: Category) -> &CategoryBelief {
        &self.categories[category.index()]
    }

    pub fn solution(&self, category: Category) -> Option<CardId> {
        self.categories[category.index()].solution
    }

    pub fn is_solved(&self) -> bool {
        self.categories.iter().all(|category| category.solution.is_some())
    }

    /// Cards with neither an owner nor solution status.
    pub fn unresolved_cards(&self) -> CardMask {
        self.deck
            .cards()
            .filter(|card| !self.cards[card.index()].is_resolved())
            .collect()
    }

    /// Cards this state's own seat holds.
    pub fn own_hand(&self) -> CardMask {
        self.players[self.perspective.index()].must_have
    }

    /// Records our own hand: every listed card is ours, every other card is not.
    pub fn seat_own_hand(&mut self, hand: CardMask) -> Result<(), Contradiction> {
        let me = self.perspective;
        for card in hand {
            self.assign_owner(card, me)?;
        }
        for card in self.deck.full_mask().difference(hand) {
            self.exclude_owner(card, me);
        }
        Ok(())
    }

    /// Resolves `card` as held by `player`.
    pub fn assign_owner(&mut self, card: CardId, player: PlayerId) -> Result<(), Contradiction> {
        let entry = &self.cards[card.index()];
        if let Some(owner) = entry.owner {
            return Err(Contradiction::AlreadyOwned {
                card: self.name(card),
                owner,
            });
        }
        if entry.in_solution {
            return Err(Contradiction::SolutionCard {
                card: self.name(card),
            });
        }
        let holder = &self.players[player.index()];
        if !holder.may_have.contains(card) {
            return Err(Contradiction::OwnerExcluded {
                card: self.name(card),
                player,
            });
        }
        if holder.is_complete() {
            return Err(Contradiction::HandOverflow {
                card: self.name(card),
                player,
                hand_size: holder.hand_size,
            });
        }

        self.detach(card);
        self.cards[card.index()].owner = Some(player);
        self.players[player.index()].must_have.insert(card);
        self.categories[self.deck.category(card).index()].unresolved -= 1;
        Ok(())
    }

    /// Resolves `card` as its category's hidden solution.
    ///
    /// Returns `false` when `card` already was the solution.
    pub fn assign_solution(&mut self, card: CardId) -> Result<bool, Contradiction> {
        let category = self.deck.category(card);
        if let Some(owner) = self.cards[card.index()].owner {
            return Err(Contradiction::OwnedSolution {
                card: self.name(card),
                owner,
            });
        }
        match self.categories[category.index()].solution {
            Some(existing) if existing == card => return Ok(false),
            Some(existing) => {
                return Err(Contradiction::SecondSolution {
                    category,
                    existing: self.name(existing),
                    attempted: self.name(card),
                });
            }
            None => {}
        }

        self.detach(card);
        self.cards[card.index()].in_solution = true;
        let entry = &mut self.categories[category.index()];
        entry.solution = Some(card);
        entry.unresolved -= 1;
        Ok(true)
    }

    /// Rules `player` out for `card`. Returns whether anything changed.
    pub fn exclude_owner(&mut self, card: CardId, player: PlayerId) -> bool {
        if !self.players[player.index()].may_have.remove(card) {
            return false;
        }
        self.cards[card.index()].possible_owners.remove(player);
        true
    }

    /// Records that `player` holds at least one card of `group`.
    pub fn add_selection_group(&mut self, player: PlayerId, group: CardMask) {
        self.players[player.index()].selection_groups.push(group);
    }

    /// Records that our own `card` was shown to `player`.
    pub fn mark_revealed(&mut self, card: CardId, player: PlayerId) {
        self.cards[card.index()].revealed_to.insert(player);
    }

    /// Applies the card and category resolution rules once over the whole deck.
    pub fn resolve_categories(&mut self) -> Result<bool, Contradiction> {
        let mut changed = false;

        for card in self.unresolved_cards() {
            if !self.cards[card.index()].possible_owners.is_empty() {
                continue;
            }
            let category = self.deck.category(card);
            match self.categories[category.index()].solution {
                None => {
                    self.assign_solution(card)?;
                    changed = true;
                }
                Some(existing) => {
                    return Err(Contradiction::Unplaceable {
                        card: self.name(card),
                        category,
                        existing: self.name(existing),
                    });
                }
            }
        }

        for category in Category::ALL {
            let entry = &self.categories[category.index()];
            if entry.solution.is_some() {
                continue;
            }
            let unresolved = entry.unresolved;
            match unresolved {
                0 => return Err(Contradiction::CategoryExhausted { category }),
                1 => {
                    let last = self
                        .unresolved_cards()
                        .intersection(self.deck.category_mask(category))
                        .first();
                    if let Some(card) = last {
                        self.assign_solution(card)?;
                        changed = true;
                    }
                }
                _ => {}
            }
        }

        Ok(changed)
    }

    /// Clears every seat's claim on a card that is about to be resolved.
    fn detach(&mut self, card: CardId) {
        let owners = self.cards[card.index()].possible_owners;
        for seat in owners.iter() {
            self.players[seat.index()].may_have.remove(card);
        }
        self.cards[card.index()].possible_owners = PlayerMask::EMPTY;
    }

    pub(super) fn name(&self, card: CardId) -> String {
        self.deck.name(card).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::BeliefState;
    use crate::error::{Contradiction, MalformedEvent};
    use crate::model::card::CardId;
    use crate::model::category::Category;
    use crate::model::deck::Deck;
    use crate::model::mask::CardMask;
    use crate::model::player::PlayerId;

    fn small_deck() -> Deck {
        Deck::new([
            vec!["Mu", "Re", "Pe"],
            vec!["Axe", "Ba", "Kn"],
            vec!["Pipe", "Hall", "Den"],
        ])
        .unwrap()
    }

    fn id(index: usize) -> PlayerId {
        PlayerId::from_index(index).unwrap()
    }

    fn card(state: &BeliefState, name: &str) -> CardId {
        state.deck().card(name).unwrap()
    }

    fn fresh() -> BeliefState {
        BeliefState::new(small_deck(), 3, id(0)).unwrap()
    }

    #[test]
    fn new_state_is_fully_open() {
        let state = fresh();
        assert_eq!(state.player_count(), 3);
        for player in state.players() {
            assert_eq!(player.hand_size(), 2);
            assert_eq!(player.may_have().len(), 9);
            assert!(player.must_have().is_empty());
        }
        for category in Category::ALL {
            assert_eq!(state.category(category).unresolved(), 3);
        }
        assert_eq!(state.unresolved_cards().len(), 9);
    }

    #[test]
    fn rejects_bad_table() {
        assert!(matches!(
            BeliefState::new(small_deck(), 1, id(0)),
            Err(MalformedEvent::PlayerCount { count: 1, .. })
        ));
        assert!(matches!(
            BeliefState::new(small_deck(), 3, id(3)),
            Err(MalformedEvent::PlayerOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn assign_owner_updates_both_sides() {
        let mut state = fresh();
        let re = card(&state, "Re");
        state.assign_owner(re, id(1)).unwrap();

        assert_eq!(state.card(re).owner(), Some(id(1)));
        assert!(state.card(re).possible_owners().is_empty());
        assert!(state.player(id(1)).must_have().contains(re));
        for player in state.players() {
            assert!(!player.may_have().contains(re));
        }
        assert_eq!(state.category(Category::Suspect).unresolved(), 2);
    }

    #[test]
    fn assign_owner_twice_is_a_contradiction() {
        let mut state = fresh();
        let re = card(&state, "Re");
        state.assign_owner(re, id(1)).unwrap();
        let err = state.assign_owner(re, id(2)).unwrap_err();
        assert_eq!(
            err,
            Contradiction::AlreadyOwned {
                card: "Re".to_string(),
                owner: id(1)
            }
        );
    }

    #[test]
    fn assign_owner_to_excluded_player_is_a_contradiction() {
        let mut state = fresh();
        let ba = card(&state, "Ba");
        assert!(state.exclude_owner(ba, id(2)));
        assert!(matches!(
            state.assign_owner(ba, id(2)),
            Err(Contradiction::OwnerExcluded { .. })
        ));
    }

    #[test]
    fn assign_owner_past_hand_size_is_a_contradiction() {
        let mut state = fresh();
        state.assign_owner(card(&state, "Mu"), id(1)).unwrap();
        state.assign_owner(card(&state, "Axe"), id(1)).unwrap();
        assert!(matches!(
            state.assign_owner(card(&state, "Den"), id(1)),
            Err(Contradiction::HandOverflow { hand_size: 2, .. })
        ));
    }

    #[test]
    fn exclude_owner_is_idempotent() {
        let mut state = fresh();
        let kn = card(&state, "Kn");
        assert!(state.exclude_owner(kn, id(1)));
        assert!(!state.exclude_owner(kn, id(1)));
        assert!(!state.card(kn).possible_owners().contains(id(1)));
        assert!(!state.player(id(1)).may_have().contains(kn));
    }

    #[test]
    fn second_solution_is_a_contradiction() {
        let mut state = fresh();
        let pipe = card(&state, "Pipe");
        let hall = card(&state, "Hall");
        assert_eq!(state.assign_solution(pipe), Ok(true));
        assert_eq!(state.assign_solution(pipe), Ok(false));
        assert!(matches!(
            state.assign_solution(hall),
            Err(Contradiction::SecondSolution {
                category: Category::Room,
                ..
            })
        ));
        assert_eq!(state.category(Category::Room).unresolved(), 2);
    }

    #[test]
    fn owned_card_cannot_be_solution() {
        let mut state = fresh();
        let hall = card(&state, "Hall");
        state.assign_owner(hall, id(2)).unwrap();
        assert!(matches!(
            state.assign_solution(hall),
            Err(Contradiction::OwnedSolution { .. })
        ));
    }

    #[test]
    fn last_unresolved_card_becomes_solution() {
        let mut state = fresh();
        state.assign_owner(card(&state, "Mu"), id(0)).unwrap();
        state.assign_owner(card(&state, "Re"), id(1)).unwrap();
        assert!(state.resolve_categories().unwrap());
        let pe = card(&state, "Pe");
        assert_eq!(state.solution(Category::Suspect), Some(pe));
        assert!(state.card(pe).in_solution());
        assert_eq!(state.category(Category::Suspect).unresolved(), 0);
        assert!(!state.resolve_categories().unwrap());
    }

    #[test]
    fn card_nobody_can_hold_becomes_solution() {
        let mut state = fresh();
        let kn = card(&state, "Kn");
        for seat in 0..3 {
            state.exclude_owner(kn, id(seat));
        }
        assert!(state.resolve_categories().unwrap());
        assert_eq!(state.solution(Category::Weapon), Some(kn));
    }

    #[test]
    fn unplaceable_card_in_solved_category_is_a_contradiction() {
        let mut state = fresh();
        let kn = card(&state, "Kn");
        state.assign_solution(card(&state, "Ba")).unwrap();
        for seat in 0..3 {
            state.exclude_owner(kn, id(seat));
        }
        assert!(matches!(
            state.resolve_categories(),
            Err(Contradiction::Unplaceable { .. })
        ));
    }

    #[test]
    fn seat_own_hand_excludes_everything_else() {
        let mut state = fresh();
        let hand: CardMask = [card(&state, "Mu"), card(&state, "Axe")].into_iter().collect();
        state.seat_own_hand(hand).unwrap();
        let me = state.player(id(0));
        assert_eq!(me.must_have(), hand);
        assert!(me.may_have().is_empty());
        assert_eq!(state.own_hand(), hand);
        for other in state.deck().full_mask().difference(hand) {
            assert!(!state.card(other).possible_owners().contains(id(0)));
        }
    }
}
