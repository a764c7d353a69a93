use clue_bot::DeductionEngine;
use clue_core::belief::BeliefState;
use clue_core::model::category::Category;
use clue_core::model::deal::Deal;
use clue_core::model::deck::Deck;
use clue_core::model::mask::{CardMask, PlayerMask};
use clue_core::model::player::{PlayerId, seats, seats_between};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TURN_LIMIT: usize = 400;

/// Runs a whole game between engines and checks every engine after every event.
struct Referee {
    deck: Deck,
    deal: Deal,
    engines: Vec<DeductionEngine>,
    seen_owners: Vec<Vec<PlayerMask>>,
}

impl Referee {
    fn new(deck: Deck, player_count: usize, seed: u64) -> Self {
        let deal = Deal::shuffled_with_seed(&deck, player_count, seed);
        let mut engines = Vec::new();
        for seat in seats(player_count) {
            let mut engine = DeductionEngine::new(deck.clone());
            engine
                .reset(player_count, seat.index(), &deal.hand_names(&deck, seat))
                .unwrap();
            engines.push(engine);
        }
        let seen_owners = engines
            .iter()
            .map(|_| vec![PlayerMask::all(player_count); deck.len()])
            .collect();
        let mut referee = Self {
            deck,
            deal,
            engines,
            seen_owners,
        };
        referee.check_all();
        referee
    }

    fn player_count(&self) -> usize {
        self.engines.len()
    }

    fn names(&self, cards: &[String]) -> CardMask {
        cards
            .iter()
            .map(|name| self.deck.card(name).unwrap())
            .collect()
    }

    /// Plays until someone accuses. Returns the number of turns taken.
    fn play(&mut self, first: usize) -> usize {
        let count = self.player_count();
        let truth = self.deal.solution().to_names(&self.deck);
        for turn in 0..TURN_LIMIT {
            let seat = (first + turn) % count;
            if let Some(accusation) = self.engines[seat].accuse().unwrap() {
                assert_eq!(accusation, truth, "seat {seat} accused wrongly");
                for engine in &mut self.engines {
                    engine.observe_accusation(seat, &accusation, true).unwrap();
                    engine.done();
                }
                return turn;
            }
            self.suggestion_turn(seat);
        }
        panic!("no accusation after {TURN_LIMIT} turns");
    }

    fn suggestion_turn(&mut self, seat: usize) {
        let count = self.player_count();
        let cards = self.engines[seat].suggest().unwrap();
        let asked = self.names(&cards);
        let suggester = PlayerId::from_index(seat).unwrap();

        let disprover = seats_between(suggester, suggester, count)
            .find(|other| !self.deal.hand(*other).is_disjoint(asked));
        let shown = disprover.map(|other| {
            let shown = self.engines[other.index()].disprove(seat, &cards).unwrap();
            let card = self.deck.card(&shown).unwrap();
            assert!(asked.contains(card));
            assert!(self.deal.hand(other).contains(card));
            shown
        });

        for (index, engine) in self.engines.iter_mut().enumerate() {
            let sees = index == seat || Some(index) == disprover.map(|other| other.index());
            let revealed = if sees { shown.as_deref() } else { None };
            engine
                .observe_suggestion(seat, &cards, disprover.map(|other| other.index()), revealed)
                .unwrap();
        }
        self.check_all();
    }

    fn check_all(&mut self) {
        for index in 0..self.engines.len() {
            let state = self.engines[index].state().unwrap().clone();
            self.check(index, &state);
            let candidates = self.engines[index].candidates().unwrap();
            assert!(
                candidates.contains(&self.deal.solution()),
                "seat {index} lost the true solution"
            );
        }
    }

    fn check(&mut self, index: usize, state: &BeliefState) {
        let count = self.player_count();
        let solution = self.deal.solution();

        let mut claimed = CardMask::EMPTY;
        for seat in seats(count) {
            let belief = state.player(seat);
            assert!(belief.must_have().len() <= belief.hand_size());
            assert!(claimed.is_disjoint(belief.must_have()), "hands overlap");
            assert!(belief.must_have().is_subset(self.deal.hand(seat)));
            claimed = claimed.union(belief.must_have());
        }

        for card in self.deck.cards() {
            let belief = state.card(card);
            let owners = belief.possible_owners();
            let previous = &mut self.seen_owners[index][card.index()];
            assert!(owners.is_subset(*previous), "possible owners grew");
            *previous = owners;

            for seat in seats(count) {
                assert_eq!(
                    owners.contains(seat),
                    state.player(seat).may_have().contains(card),
                    "card and seat disagree"
                );
            }
            if let Some(owner) = belief.owner() {
                assert_eq!(self.deal.owner_of(card), Some(owner));
            }
            if belief.in_solution() {
                assert!(solution.contains(card));
            } else if belief.owner().is_none() {
                if let Some(owner) = self.deal.owner_of(card) {
                    assert!(owners.contains(owner), "true owner ruled out");
                }
            }
        }

        for category in Category::ALL {
            let open = self
                .deck
                .members(category)
                .iter()
                .filter(|card| !state.card(**card).is_resolved())
                .count();
            assert_eq!(state.category(category).unresolved(), open);
        }
    }
}

#[test]
fn engines_stay_sound_through_whole_games() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for (game, player_count) in [3, 4, 5, 3, 4, 6].into_iter().enumerate() {
        let seed = rng.r#gen::<u64>();
        let mut referee = Referee::new(Deck::classic(), player_count, seed);
        let first = rng.gen_range(0..player_count);
        let turns = referee.play(first);
        assert!(turns < TURN_LIMIT, "game {game} did not finish");
    }
}

#[test]
fn small_deck_games_finish() {
    let deck = Deck::new([
        vec!["Mu", "Re", "Pe"],
        vec!["Axe", "Ba", "Kn"],
        vec!["Pipe", "Hall", "Den"],
    ])
    .unwrap();
    for seed in 0..8 {
        let mut referee = Referee::new(deck.clone(), 3, seed);
        referee.play(seed as usize % 3);
    }
}
