use crate::bot::DeductionEngine;
use clue_core::error::DeductionError;

/// The questions and notifications a seat receives during a game.
///
/// Card names follow the deck; seats are table indices starting at zero.
pub trait Policy: Send {
    /// Starts a game at `seat` holding `hand`.
    fn reset(&mut self, player_count: usize, seat: usize, hand: &[String]) -> Result<(), DeductionError>;

    fn suggest(&mut self) -> Result<[String; 3], DeductionError>;

    fn observe_suggestion(
        &mut self,
        suggester: usize,
        cards: &[String],
        disprover: Option<usize>,
        revealed: Option<&str>,
    ) -> Result<(), DeductionError>;

    /// Chooses a card to show `suggester`; at least one of `cards` is ours.
    fn disprove(&mut self, suggester: usize, cards: &[String]) -> Result<String, DeductionError>;

    /// `None` abstains.
    fn accuse(&mut self) -> Result<Option<[String; 3]>, DeductionError>;

    fn observe_accusation(&mut self, accuser: usize, cards: &[String], correct: bool) -> Result<(), DeductionError>;

    /// Optional: end of session.
    fn done(&mut self) {}
}

impl Policy for DeductionEngine {
    fn reset(&mut self, player_count: usize, seat: usize, hand: &[String]) -> Result<(), DeductionError> {
        DeductionEngine::reset(self, player_count, seat, hand)
    }

    fn suggest(&mut self) -> Result<[String; 3], DeductionError> {
        DeductionEngine::suggest(self)
    }

    fn observe_suggestion(
        &mut self,
        suggester: usize,
        cards: &[String],
        disprover: Option<usize>,
        revealed: Option<&str>,
    ) -> Result<(), DeductionError> {
        DeductionEngine::observe_suggestion(self, suggester, cards, disprover, revealed)
    }

    fn disprove(&mut self, suggester: usize, cards: &[String]) -> Result<String, DeductionError> {
        DeductionEngine::disprove(self, suggester, cards)
    }

    fn accuse(&mut self) -> Result<Option<[String; 3]>, DeductionError> {
        DeductionEngine::accuse(self)
    }

    fn observe_accusation(&mut self, accuser: usize, cards: &[String], correct: bool) -> Result<(), DeductionError> {
        DeductionEngine::observe_accusation(self, accuser, cards, correct)
    }

    fn done(&mut self) {
        DeductionEngine::done(self)
    }
}
