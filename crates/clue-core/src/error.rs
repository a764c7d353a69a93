use crate::model::category::Category;
use crate::model::player::PlayerId;
use thiserror::Error;

/// Failure of a typed engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeductionError {
    #[error(transparent)]
    Contradiction(#[from] Contradiction),
    #[error(transparent)]
    Malformed(#[from] MalformedEvent),
    #[error("no game in progress: reset has not been called")]
    NotReset,
}

/// The observed events cannot all be true under the game's rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Contradiction {
    #[error("contradiction: {card} is already held by player {owner}")]
    AlreadyOwned { card: String, owner: PlayerId },
    #[error("contradiction: player {player} was already ruled out for {card}")]
    OwnerExcluded { card: String, player: PlayerId },
    #[error("contradiction: {card} is part of the solution and cannot be held")]
    SolutionCard { card: String },
    #[error("contradiction: player {player} cannot hold {card}, all {hand_size} cards are known")]
    HandOverflow {
        card: String,
        player: PlayerId,
        hand_size: usize,
    },
    #[error("contradiction: {card} is held by player {owner} and cannot be the solution")]
    OwnedSolution { card: String, owner: PlayerId },
    #[error("contradiction: {category} solution is {existing}, cannot also be {attempted}")]
    SecondSolution {
        category: Category,
        existing: String,
        attempted: String,
    },
    #[error("contradiction: nobody can hold {card} but the {category} solution is {existing}")]
    Unplaceable {
        card: String,
        category: Category,
        existing: String,
    },
    #[error("contradiction: every {category} card is held by a player")]
    CategoryExhausted { category: Category },
    #[error("contradiction: player {player} must hold one of {{{cards}}} but was ruled out for all")]
    EmptySelectionGroup { player: PlayerId, cards: String },
    #[error("contradiction: no solution candidate survives")]
    NoCandidates,
}

/// An event references something outside the game; rejected before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEvent {
    #[error("unknown card '{0}'")]
    UnknownCard(String),
    #[error("player index {index} is out of range for {player_count} players")]
    PlayerOutOfRange { index: usize, player_count: usize },
    #[error("unsupported player count {count} (expected {min}..={max})")]
    PlayerCount {
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("card '{0}' is listed more than once")]
    DuplicateCard(String),
    #[error("expected {expected} cards but got {actual}")]
    WrongCardCount { expected: usize, actual: usize },
    #[error("cards [{0}] do not name exactly one card per category")]
    NotOnePerCategory(String),
    #[error("player {0} cannot disprove their own suggestion")]
    SelfDisprove(PlayerId),
    #[error("revealed card '{0}' was not part of the suggestion")]
    RevealedNotSuggested(String),
    #[error("a card was revealed but nobody disproved")]
    RevealedWithoutDisprover,
    #[error("none of [{0}] is in this player's hand")]
    NothingToShow(String),
}
