use std::collections::BTreeSet;

use clue_core::belief::BeliefState;
use clue_core::model::card::CardId;
use clue_core::model::category::Category;
use clue_core::model::triple::Triple;

/// Running counts of suggestions made in one game.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SuggestStats {
    pub suggestions: usize,
    /// Suggestions where no informative unused triple was left.
    pub fallbacks: usize,
}

impl SuggestStats {
    pub fn fallback_rate(&self) -> f64 {
        if self.suggestions == 0 {
            0.0
        } else {
            self.fallbacks as f64 / self.suggestions as f64
        }
    }
}

/// Picks suggestions that probe the least-placed cards, never repeating one.
#[derive(Debug, Default, Clone)]
pub struct SuggestPlanner {
    made: BTreeSet<Triple>,
    stats: SuggestStats,
}

impl SuggestPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SuggestStats {
        self.stats
    }

    pub fn has_made(&self, triple: &Triple) -> bool {
        self.made.contains(triple)
    }

    /// Chooses the next suggestion and records it. The flag reports a fallback.
    pub fn plan(&mut self, state: &BeliefState) -> (Triple, bool) {
        let preferred = self.preferred(state);
        let fallback = preferred.is_none();
        let triple = preferred
            .or_else(|| Triple::all(state.deck()).find(|triple| !self.made.contains(triple)))
            .unwrap_or_else(|| Triple::first(state.deck()));

        self.made.insert(triple);
        self.stats.suggestions += 1;
        if fallback {
            self.stats.fallbacks += 1;
        }
        (triple, fallback)
    }

    fn preferred(&self, state: &BeliefState) -> Option<Triple> {
        let choices = Category::ALL.map(|category| category_choices(state, category));

        let mut picks: Vec<[usize; Category::COUNT]> = Vec::new();
        for i in 0..choices[0].len() {
            for j in 0..choices[1].len() {
                for k in 0..choices[2].len() {
                    picks.push([i, j, k]);
                }
            }
        }
        picks.sort_by_key(|pick| pick.iter().sum::<usize>());

        picks
            .into_iter()
            .filter_map(|[i, j, k]| {
                Triple::from_cards(state.deck(), [choices[0][i], choices[1][j], choices[2][k]])
            })
            .find(|triple| !self.made.contains(triple))
    }
}

/// Our own cards for a solved category, otherwise the unowned cards with the
/// fewest possible owners first.
fn category_choices(state: &BeliefState, category: Category) -> Vec<CardId> {
    let members = state.deck().members(category);
    if state.solution(category).is_some() {
        let own = state.own_hand();
        return members.iter().copied().filter(|card| own.contains(*card)).collect();
    }
    let mut open: Vec<CardId> = members
        .iter()
        .copied()
        .filter(|card| state.card(*card).owner().is_none())
        .collect();
    open.sort_by_key(|card| state.card(*card).possible_owners().len());
    open
}
