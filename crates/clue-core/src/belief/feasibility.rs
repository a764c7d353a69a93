use super::player::PlayerBelief;
use super::state::BeliefState;
use crate::model::mask::CardMask;
use crate::model::triple::Triple;

/// Open-card count at which [`feasibility`] stops enumerating and reports a
/// candidate as possible. Early in a game every candidate is feasible and a
/// full enumeration would be far too slow.
pub const EXHAUSTIVE_SEARCH_THRESHOLD: usize = 10;

/// Counts the deals of the still-open cards that are consistent with every
/// seat's hand size and selection groups, assuming `candidate` is the solution.
///
/// Returns 1 without searching when at least
/// [`EXHAUSTIVE_SEARCH_THRESHOLD`] cards are open. Zero means the candidate
/// cannot be the solution; other values only rank candidates.
pub fn feasibility(state: &BeliefState, candidate: &Triple) -> u64 {
    let available = state.unresolved_cards().difference(candidate.mask());
    if available.len() >= EXHAUSTIVE_SEARCH_THRESHOLD {
        return 1;
    }
    count_worlds(state.players(), available)
}

fn count_worlds(players: &[PlayerBelief], available: CardMask) -> u64 {
    let Some((player, rest)) = players.split_first() else {
        return u64::from(available.is_empty());
    };
    let pool = available.intersection(player.may_have());
    let pending: Vec<CardMask> = player.pending_groups().collect();

    let mut worlds = 0;
    for_each_subset(pool, player.open_slots(), &mut |choice| {
        if pending.iter().all(|group| !group.is_disjoint(choice)) {
            worlds += count_worlds(rest, available.difference(choice));
        }
    });
    worlds
}

/// Calls `visit` once with every `size`-card subset of `pool`.
fn for_each_subset(pool: CardMask, size: usize, visit: &mut dyn FnMut(CardMask)) {
    fn walk(remaining: CardMask, size: usize, chosen: CardMask, visit: &mut dyn FnMut(CardMask)) {
        if size == 0 {
            visit(chosen);
            return;
        }
        if remaining.len() < size {
            return;
        }
        let Some(card) = remaining.first() else {
            return;
        };
        let rest = remaining.without(card);
        walk(rest, size - 1, chosen.with(card), visit);
        walk(rest, size, chosen, visit);
    }
    walk(pool, size, CardMask::EMPTY, visit);
}

#[cfg(test)]
mod tests {
    use super::{feasibility, for_each_subset};
    use crate::belief::BeliefState;
    use crate::model::deck::Deck;
    use crate::model::mask::CardMask;
    use crate::model::player::PlayerId;
    use crate::model::triple::Triple;

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

    fn cards(state: &BeliefState, names: &[&str]) -> CardMask {
        names
            .iter()
            .map(|name| state.deck().card(name).unwrap())
            .collect()
    }

    fn triple(state: &BeliefState, names: [&str; 3]) -> Triple {
        let ids = names.map(|name| state.deck().card(name).unwrap());
        Triple::from_cards(state.deck(), ids).unwrap()
    }

    fn seated() -> BeliefState {
        let mut state = BeliefState::new(small_deck(), 3, id(0)).unwrap();
        let hand = cards(&state, &["Mu", "Axe"]);
        state.seat_own_hand(hand).unwrap();
        state
    }

    #[test]
    fn subsets_are_enumerated_once_each() {
        let pool = CardMask::first_n(5);
        let mut seen = Vec::new();
        for_each_subset(pool, 2, &mut |choice| seen.push(choice));
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|choice| choice.len() == 2 && choice.is_subset(pool)));
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);

        let mut empty = 0;
        for_each_subset(CardMask::EMPTY, 0, &mut |_| empty += 1);
        assert_eq!(empty, 1);

        let mut too_many = 0;
        for_each_subset(pool, 6, &mut |_| too_many += 1);
        assert_eq!(too_many, 0);
    }

    #[test]
    fn many_open_cards_short_circuit() {
        let deck = Deck::classic();
        let state = BeliefState::new(deck.clone(), 4, id(0)).unwrap();
        assert_eq!(feasibility(&state, &Triple::first(&deck)), 1);
    }

    #[test]
    fn counts_every_consistent_deal() {
        let state = seated();
        // Four open cards, two to each opponent.
        assert_eq!(feasibility(&state, &triple(&state, ["Re", "Ba", "Pipe"])), 6);
    }

    #[test]
    fn overcommitted_hand_makes_candidate_infeasible() {
        let mut state = seated();
        state.add_selection_group(id(1), cards(&state, &["Re", "Kn"]));
        state.add_selection_group(id(1), cards(&state, &["Ba", "Kn"]));
        state.add_selection_group(id(1), cards(&state, &["Pe", "Den"]));

        // Without Kn, player 1 would need Re, Ba and Pe or Den: three cards in a hand of two.
        assert_eq!(feasibility(&state, &triple(&state, ["Pe", "Kn", "Pipe"])), 0);
        assert_eq!(feasibility(&state, &triple(&state, ["Re", "Ba", "Pipe"])), 2);
    }
}
