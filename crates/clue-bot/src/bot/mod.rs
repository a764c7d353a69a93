mod disprove;
mod journal;
mod suggest;

pub use disprove::choose_reveal;
pub use journal::{Journal, NullJournal, TracingJournal};
pub use suggest::{SuggestPlanner, SuggestStats};

use clue_core::belief::{BeliefState, SolutionCandidates, propagate};
use clue_core::error::{Contradiction, DeductionError, MalformedEvent};
use clue_core::model::card::CardId;
use clue_core::model::category::Category;
use clue_core::model::deck::Deck;
use clue_core::model::mask::CardMask;
use clue_core::model::player::PlayerId;
use clue_core::model::suggestion::Suggestion;
use clue_core::model::triple::Triple;

/// One seat's deduction engine: tracks what every event implies about the
/// hidden hands and answers the game's questions from that knowledge.
pub struct DeductionEngine {
    deck: Deck,
    game: Option<Game>,
    journal: Box<dyn Journal>,
}

struct Game {
    state: BeliefState,
    candidates: SolutionCandidates,
    planner: SuggestPlanner,
    history: Vec<Suggestion>,
    fault: Option<Contradiction>,
    finished: bool,
}

impl DeductionEngine {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            game: None,
            journal: Box::new(NullJournal),
        }
    }

    pub fn with_journal(mut self, journal: impl Journal + 'static) -> Self {
        self.journal = Box::new(journal);
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Starts a new game at `seat` holding `hand`, discarding any previous one.
    pub fn reset<S: AsRef<str>>(
        &mut self,
        player_count: usize,
        seat: usize,
        hand: &[S],
    ) -> Result<(), DeductionError> {
        let me = PlayerId::from_index(seat).ok_or(MalformedEvent::PlayerOutOfRange {
            index: seat,
            player_count,
        })?;
        let mut state = BeliefState::new(self.deck.clone(), player_count, me)?;

        let expected = state.player(me).hand_size();
        if hand.len() != expected {
            return Err(MalformedEvent::WrongCardCount {
                expected,
                actual: hand.len(),
            }
            .into());
        }
        let mut owned = CardMask::EMPTY;
        for name in hand {
            let card = lookup(&self.deck, name.as_ref())?;
            if !owned.insert(card) {
                return Err(MalformedEvent::DuplicateCard(name.as_ref().to_string()).into());
            }
        }

        let names: Vec<String> = hand.iter().map(|name| name.as_ref().to_string()).collect();
        self.journal.game_started(player_count, seat, &names);

        let candidates = SolutionCandidates::all(&self.deck);
        let game = self.game.insert(Game {
            state,
            candidates,
            planner: SuggestPlanner::new(),
            history: Vec::new(),
            fault: None,
            finished: false,
        });
        let seated = game.state.seat_own_hand(owned);
        settle(game, self.journal.as_mut(), seated)
    }

    /// Proposes the next suggestion as card names in category order.
    pub fn suggest(&mut self) -> Result<[String; 3], DeductionError> {
        let game = self.game.as_mut().ok_or(DeductionError::NotReset)?;
        let (triple, fallback) = game.planner.plan(&game.state);
        let names = triple.to_names(&self.deck);
        self.journal.suggestion_made(&names, fallback);
        Ok(names)
    }

    /// Records a suggestion seen at the table, including our own.
    ///
    /// `revealed` is the card shown, when this seat saw it.
    pub fn observe_suggestion<S: AsRef<str>>(
        &mut self,
        suggester: usize,
        cards: &[S],
        disprover: Option<usize>,
        revealed: Option<&str>,
    ) -> Result<(), DeductionError> {
        let game = active(&mut self.game)?;
        let player_count = game.state.player_count();
        let suggester = seat(suggester, player_count)?;
        let triple = triple_of(&self.deck, cards)?;
        let disprover = disprover.map(|index| seat(index, player_count)).transpose()?;
        if disprover == Some(suggester) {
            return Err(MalformedEvent::SelfDisprove(suggester).into());
        }
        let revealed = match (revealed, disprover) {
            (None, _) => None,
            (Some(_), None) => return Err(MalformedEvent::RevealedWithoutDisprover.into()),
            (Some(name), Some(_)) => {
                let card = lookup(&self.deck, name)?;
                if !triple.contains(card) {
                    return Err(MalformedEvent::RevealedNotSuggested(name.to_string()).into());
                }
                Some(card)
            }
        };

        let suggestion = Suggestion {
            suggester,
            triple,
            disprover,
            revealed,
        };
        let applied = apply_suggestion(game, &suggestion);
        game.history.push(suggestion);
        settle(game, self.journal.as_mut(), applied)
    }

    /// Names the card to show `suggester` out of `cards`.
    pub fn disprove<S: AsRef<str>>(
        &mut self,
        suggester: usize,
        cards: &[S],
    ) -> Result<String, DeductionError> {
        let game = self.game.as_mut().ok_or(DeductionError::NotReset)?;
        let asker = seat(suggester, game.state.player_count())?;
        let asked = cards
            .iter()
            .map(|name| lookup(&self.deck, name.as_ref()))
            .collect::<Result<Vec<CardId>, _>>()?;

        let Some(card) = choose_reveal(&game.state, asker, &asked) else {
            let listed: Vec<&str> = cards.iter().map(|name| name.as_ref()).collect();
            return Err(MalformedEvent::NothingToShow(listed.join(",")).into());
        };
        game.state.mark_revealed(card, asker);
        let name = self.deck.name(card).to_string();
        self.journal.card_shown(suggester, &name);
        Ok(name)
    }

    /// The solution, once it is certain. Never accuses from an inconsistent state.
    pub fn accuse(&mut self) -> Result<Option<[String; 3]>, DeductionError> {
        let game = self.game.as_ref().ok_or(DeductionError::NotReset)?;
        if game.fault.is_some() {
            return Ok(None);
        }
        let Some(triple) = solved_triple(&game.state).or_else(|| game.candidates.single()) else {
            return Ok(None);
        };
        let names = triple.to_names(&self.deck);
        self.journal.accusing(&names);
        Ok(Some(names))
    }

    /// Records another seat's accusation and its outcome.
    pub fn observe_accusation<S: AsRef<str>>(
        &mut self,
        accuser: usize,
        cards: &[S],
        correct: bool,
    ) -> Result<(), DeductionError> {
        let game = active(&mut self.game)?;
        seat(accuser, game.state.player_count())?;
        let triple = triple_of(&self.deck, cards)?;

        if correct {
            finish(game, self.journal.as_mut());
            return Ok(());
        }
        game.candidates.remove(&triple);
        settle(game, self.journal.as_mut(), Ok(()))
    }

    /// Ends the session.
    pub fn done(&mut self) {
        if let Some(game) = self.game.as_mut() {
            finish(game, self.journal.as_mut());
        }
    }

    pub fn state(&self) -> Option<&BeliefState> {
        self.game.as_ref().map(|game| &game.state)
    }

    pub fn candidates(&self) -> Option<&SolutionCandidates> {
        self.game.as_ref().map(|game| &game.candidates)
    }

    pub fn history(&self) -> &[Suggestion] {
        self.game
            .as_ref()
            .map(|game| game.history.as_slice())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> SuggestStats {
        self.game
            .as_ref()
            .map(|game| game.planner.stats())
            .unwrap_or_default()
    }

    /// The contradiction that made the current game inconsistent, if any.
    pub fn fault(&self) -> Option<&Contradiction> {
        self.game.as_ref().and_then(|game| game.fault.as_ref())
    }
}

/// The running game, refusing events once it has become inconsistent.
fn active(game: &mut Option<Game>) -> Result<&mut Game, DeductionError> {
    let game = game.as_mut().ok_or(DeductionError::NotReset)?;
    match &game.fault {
        Some(fault) => Err(fault.clone().into()),
        None => Ok(game),
    }
}

fn apply_suggestion(game: &mut Game, suggestion: &Suggestion) -> Result<(), Contradiction> {
    let state = &mut game.state;
    let me = state.perspective();
    for passed in suggestion.passed(state.player_count()) {
        if passed == me {
            continue;
        }
        for card in suggestion.triple.cards() {
            state.exclude_owner(card, passed);
        }
    }

    let Some(disprover) = suggestion.disprover else {
        return Ok(());
    };
    match suggestion.revealed {
        Some(card) => {
            if state.card(card).owner() != Some(disprover) {
                state.assign_owner(card, disprover)?;
            }
        }
        None if disprover != me => state.add_selection_group(disprover, suggestion.triple.mask()),
        None => {}
    }
    game.candidates.remove(&suggestion.triple);
    Ok(())
}

/// Runs the fixpoint after an event and reports what it learned. A
/// contradiction, from the event itself or from propagation, marks the game
/// inconsistent.
fn settle(
    game: &mut Game,
    journal: &mut dyn Journal,
    applied: Result<(), Contradiction>,
) -> Result<(), DeductionError> {
    let before = Category::ALL.map(|category| game.state.solution(category));
    let outcome = applied.and_then(|()| propagate(&mut game.state, &mut game.candidates));

    match outcome {
        Ok(passes) => {
            for (category, known) in Category::ALL.into_iter().zip(before) {
                if let (None, Some(card)) = (known, game.state.solution(category)) {
                    journal.solution_found(&category.to_string(), game.state.deck().name(card));
                }
            }
            let (state, candidates) = (&game.state, &game.candidates);
            journal.propagated(passes, candidates.len(), &|| state.render_grid(candidates));
            Ok(())
        }
        Err(contradiction) => {
            journal.contradiction(&contradiction);
            game.fault = Some(contradiction.clone());
            Err(contradiction.into())
        }
    }
}

fn finish(game: &mut Game, journal: &mut dyn Journal) {
    if !game.finished {
        game.finished = true;
        journal.game_finished(game.planner.stats());
    }
}

fn solved_triple(state: &BeliefState) -> Option<Triple> {
    let [Some(suspect), Some(weapon), Some(room)] =
        Category::ALL.map(|category| state.solution(category))
    else {
        return None;
    };
    Triple::from_cards(state.deck(), [suspect, weapon, room])
}

fn seat(index: usize, player_count: usize) -> Result<PlayerId, MalformedEvent> {
    let out_of_range = MalformedEvent::PlayerOutOfRange {
        index,
        player_count,
    };
    if index >= player_count {
        return Err(out_of_range);
    }
    PlayerId::from_index(index).ok_or(out_of_range)
}

fn lookup(deck: &Deck, name: &str) -> Result<CardId, MalformedEvent> {
    deck.card(name)
        .ok_or_else(|| MalformedEvent::UnknownCard(name.to_string()))
}

fn triple_of<S: AsRef<str>>(deck: &Deck, cards: &[S]) -> Result<Triple, MalformedEvent> {
    let [first, second, third] = cards else {
        return Err(MalformedEvent::WrongCardCount {
            expected: Category::COUNT,
            actual: cards.len(),
        });
    };
    let ids = [
        lookup(deck, first.as_ref())?,
        lookup(deck, second.as_ref())?,
        lookup(deck, third.as_ref())?,
    ];
    Triple::from_cards(deck, ids).ok_or_else(|| {
        let listed: Vec<&str> = cards.iter().map(|name| name.as_ref()).collect();
        MalformedEvent::NotOnePerCategory(listed.join(","))
    })
}
