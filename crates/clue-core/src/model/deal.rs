use crate::model::card::CardId;
use crate::model::category::Category;
use crate::model::deck::Deck;
use crate::model::mask::CardMask;
use crate::model::player::{PlayerId, seats};
use crate::model::triple::Triple;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Cards held by `player` when `dealt` cards go round the table from seat zero.
pub fn hand_size(dealt: usize, player_count: usize, player: PlayerId) -> usize {
    let seats = player_count.max(1);
    dealt / seats + usize::from(player.index() < dealt % seats)
}

/// A complete hidden game: the solution and every hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    solution: Triple,
    hands: Vec<CardMask>,
}

impl Deal {
    pub fn shuffled<R: Rng + ?Sized>(deck: &Deck, player_count: usize, rng: &mut R) -> Self {
        let solution = Triple::from_ordered(Category::ALL.map(|category| {
            let members = deck.members(category);
            members[rng.gen_range(0..members.len())]
        }));

        let mut rest: Vec<CardId> = deck.cards().filter(|card| !solution.contains(*card)).collect();
        rest.shuffle(rng);

        let seats = player_count.max(1);
        let mut hands = vec![CardMask::EMPTY; seats];
        for (position, card) in rest.into_iter().enumerate() {
            hands[position % seats].insert(card);
        }
        Self { solution, hands }
    }

    pub fn shuffled_with_seed(deck: &Deck, player_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(deck, player_count, &mut rng)
    }

    pub fn solution(&self) -> Triple {
        self.solution
    }

    pub fn player_count(&self) -> usize {
        self.hands.len()
    }

    pub fn hand(&self, player: PlayerId) -> CardMask {
        self.hands[player.index()]
    }

    pub fn owner_of(&self, card: CardId) -> Option<PlayerId> {
        seats(self.hands.len()).find(|seat| self.hands[seat.index()].contains(card))
    }

    pub fn hand_names(&self, deck: &Deck, player: PlayerId) -> Vec<String> {
        self.hand(player)
            .iter()
            .map(|card| deck.name(card).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Deal, hand_size};
    use crate::model::deck::Deck;
    use crate::model::mask::CardMask;
    use crate::model::player::{PlayerId, seats};

    #[test]
    fn hand_sizes_favour_low_seats() {
        let sizes: Vec<usize> = seats(4).map(|seat| hand_size(18, 4, seat)).collect();
        assert_eq!(sizes, vec![5, 5, 4, 4]);
        let even: Vec<usize> = seats(3).map(|seat| hand_size(6, 3, seat)).collect();
        assert_eq!(even, vec![2, 2, 2]);
    }

    #[test]
    fn deal_partitions_deck() {
        let deck = Deck::classic();
        let deal = Deal::shuffled_with_seed(&deck, 5, 7);
        let mut seen = deal.solution().mask();
        for seat in seats(5) {
            let hand = deal.hand(seat);
            assert_eq!(hand.len(), hand_size(deck.dealt_count(), 5, seat));
            assert!(hand.is_disjoint(seen));
            seen = seen.union(hand);
        }
        assert_eq!(seen, deck.full_mask());
    }

    #[test]
    fn owner_lookup_matches_hands() {
        let deck = Deck::classic();
        let deal = Deal::shuffled_with_seed(&deck, 3, 11);
        for card in deck.cards() {
            match deal.owner_of(card) {
                Some(owner) => assert!(deal.hand(owner).contains(card)),
                None => assert!(deal.solution().contains(card)),
            }
        }
        assert_eq!(deal.hand(PlayerId::from_index(0).unwrap()).len(), 6);
    }

    #[test]
    fn seeded_deals_are_deterministic() {
        let deck = Deck::classic();
        assert_eq!(
            Deal::shuffled_with_seed(&deck, 4, 99),
            Deal::shuffled_with_seed(&deck, 4, 99)
        );
        let empty = Deal::shuffled_with_seed(&deck, 4, 1).hand(PlayerId::from_index(3).unwrap());
        assert_ne!(empty, CardMask::EMPTY);
    }
}
