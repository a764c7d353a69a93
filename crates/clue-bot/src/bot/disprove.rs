use clue_core::belief::BeliefState;
use clue_core::model::card::CardId;
use clue_core::model::player::PlayerId;

/// Picks which of our cards to show `suggester`.
///
/// A card the suggester has already seen is shown again. Otherwise the card
/// already shown to the most seats wins, the earliest listed on ties.
/// Returns `None` when we hold none of `cards`.
pub fn choose_reveal(state: &BeliefState, suggester: PlayerId, cards: &[CardId]) -> Option<CardId> {
    let me = state.perspective();
    let owned: Vec<CardId> = cards
        .iter()
        .copied()
        .filter(|card| state.card(*card).owner() == Some(me))
        .collect();

    if let Some(seen) = owned
        .iter()
        .copied()
        .find(|card| state.card(*card).revealed_to().contains(suggester))
    {
        return Some(seen);
    }

    owned.into_iter().reduce(|best, card| {
        let shown = |card: CardId| state.card(card).revealed_to().len();
        if shown(card) > shown(best) { card } else { best }
    })
}
