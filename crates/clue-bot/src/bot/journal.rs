use super::suggest::SuggestStats;
use clue_core::error::Contradiction;
use tracing::{Level, event};

/// Hooks the engine calls at fixed points of a game.
///
/// Every method defaults to doing nothing, so an implementation only
/// overrides the moments it cares about.
pub trait Journal: Send {
    fn game_started(&mut self, _player_count: usize, _seat: usize, _hand: &[String]) {}

    fn suggestion_made(&mut self, _cards: &[String; 3], _fallback: bool) {}

    fn card_shown(&mut self, _suggester: usize, _card: &str) {}

    /// A category's solution became known.
    fn solution_found(&mut self, _category: &str, _card: &str) {}

    /// Called after each fixpoint with the number of passes and a rendered grid.
    fn propagated(&mut self, _passes: usize, _candidates: usize, _grid: &dyn Fn() -> String) {}

    fn contradiction(&mut self, _error: &Contradiction) {}

    fn accusing(&mut self, _cards: &[String; 3]) {}

    fn game_finished(&mut self, _stats: SuggestStats) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullJournal;

impl Journal for NullJournal {}

/// Forwards every hook to a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingJournal;

impl Journal for TracingJournal {
    fn game_started(&mut self, player_count: usize, seat: usize, hand: &[String]) {
        event!(
            target: "clue_bot::engine",
            Level::INFO,
            player_count,
            seat,
            hand = %hand.join(","),
            "game started"
        );
    }

    fn suggestion_made(&mut self, cards: &[String; 3], fallback: bool) {
        event!(
            target: "clue_bot::engine",
            Level::DEBUG,
            cards = %cards.join(","),
            fallback,
            "suggestion made"
        );
    }

    fn card_shown(&mut self, suggester: usize, card: &str) {
        event!(target: "clue_bot::engine", Level::DEBUG, suggester, card, "card shown");
    }

    fn solution_found(&mut self, category: &str, card: &str) {
        event!(target: "clue_bot::engine", Level::INFO, category, card, "solution card found");
    }

    fn propagated(&mut self, passes: usize, candidates: usize, grid: &dyn Fn() -> String) {
        event!(
            target: "clue_bot::engine",
            Level::DEBUG,
            passes,
            candidates,
            "belief propagated"
        );
        if tracing::enabled!(target: "clue_bot::engine", Level::TRACE) {
            event!(target: "clue_bot::engine", Level::TRACE, "belief grid\n{}", grid());
        }
    }

    fn contradiction(&mut self, error: &Contradiction) {
        event!(target: "clue_bot::engine", Level::ERROR, error = %error, "belief state is inconsistent");
    }

    fn accusing(&mut self, cards: &[String; 3]) {
        event!(target: "clue_bot::engine", Level::INFO, cards = %cards.join(","), "accusing");
    }

    fn game_finished(&mut self, stats: SuggestStats) {
        event!(
            target: "clue_bot::engine",
            Level::INFO,
            suggestions = stats.suggestions,
            fallbacks = stats.fallbacks,
            fallback_rate = stats.fallback_rate(),
            "game finished"
        );
    }
}
