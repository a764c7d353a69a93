use std::fmt::Write as _;

use super::candidates::SolutionCandidates;
use super::state::BeliefState;
use crate::model::category::Category;
use crate::model::player::seats;

impl BeliefState {
    /// Multi-line picture of everything this state knows, for trace logs.
    pub fn render_grid(&self, candidates: &SolutionCandidates) -> String {
        let deck = self.deck();
        let mut out = String::new();

        for belief in self.players() {
            let _ = writeln!(
                out,
                "player {} (hand {}): must [{}] may [{}]",
                belief.id(),
                belief.hand_size(),
                deck.describe(belief.must_have()),
                deck.describe(belief.may_have()),
            );
            for group in belief.selection_groups() {
                let _ = writeln!(out, "  one of [{}]", deck.describe(*group));
            }
        }

        let solution: Vec<String> = Category::ALL
            .iter()
            .map(|category| {
                let name = self.solution(*category).map_or("?", |card| deck.name(card));
                format!("{category}={name}")
            })
            .collect();
        let _ = writeln!(out, "solution: {}", solution.join(" "));

        let _ = write!(out, "candidates: {}", candidates.len());
        for (triple, weight) in candidates.ranked().into_iter().take(8) {
            let [suspect, weapon, room] = triple.names(deck);
            let _ = write!(out, " {suspect}/{weapon}/{room}:{weight}");
        }
        out.push('\n');

        let _ = write!(out, "  id|");
        for category in Category::ALL {
            for card in deck.members(category) {
                let _ = write!(out, "{:>3}", card.index());
            }
            out.push_str(" |");
        }
        out.push('\n');

        for seat in seats(self.player_count()) {
            let belief = self.player(seat);
            let marker = if seat == self.perspective() { '*' } else { ' ' };
            let _ = write!(out, "{marker}{:>3}|", seat.index());
            for category in Category::ALL {
                for card in deck.members(category) {
                    let cell = if belief.could_hold(*card) { 'o' } else { ' ' };
                    let _ = write!(out, "{cell:>3}");
                }
                out.push_str(" |");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::belief::{BeliefState, SolutionCandidates};
    use crate::model::deck::Deck;
    use crate::model::mask::CardMask;
    use crate::model::player::PlayerId;

    #[test]
    fn grid_marks_own_row_and_known_cards() {
        let deck = Deck::new([
            vec!["Mu", "Re", "Pe"],
            vec!["Axe", "Ba", "Kn"],
            vec!["Pipe", "Hall", "Den"],
        ])
        .unwrap();
        let me = PlayerId::from_index(0).unwrap();
        let mut state = BeliefState::new(deck, 3, me).unwrap();
        let hand: CardMask = ["Mu", "Axe"]
            .iter()
            .map(|name| state.deck().card(name).unwrap())
            .collect();
        state.seat_own_hand(hand).unwrap();
        let candidates = SolutionCandidates::all(state.deck());

        let grid = state.render_grid(&candidates);
        assert!(grid.contains("player 0 (hand 2): must [Mu,Axe] may []"));
        assert!(grid.contains("solution: suspect=? weapon=? room=?"));
        assert!(grid.contains("candidates: 27"));

        let own_row = grid.lines().find(|line| line.starts_with("*  0|")).unwrap();
        assert_eq!(own_row.matches('o').count(), 2);
        let other_row = grid.lines().find(|line| line.starts_with("   1|")).unwrap();
        assert_eq!(other_row.matches('o').count(), 7);
    }
}
