use std::collections::BTreeMap;

use super::feasibility::feasibility;
use super::state::BeliefState;
use crate::error::Contradiction;
use crate::model::category::Category;
use crate::model::deck::Deck;
use crate::model::mask::CardMask;
use crate::model::triple::Triple;

/// Solution triples that are still possible, each with the number of
/// consistent deals found for it at the last refinement.
#[derive(Debug, Clone, Default)]
pub struct SolutionCandidates {
    weights: BTreeMap<Triple, u64>,
}

impl SolutionCandidates {
    /// Every triple of the deck, each with weight 1.
    pub fn all(deck: &Deck) -> Self {
        Self {
            weights: Triple::all(deck).map(|triple| (triple, 1)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.weights.contains_key(triple)
    }

    pub fn weight(&self, triple: &Triple) -> Option<u64> {
        self.weights.get(triple).copied()
    }

    /// Drops `triple`. Returns whether it was still a candidate.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.weights.remove(triple).is_some()
    }

    /// Survivors in deck order.
    pub fn iter(&self) -> impl Iterator<Item = (Triple, u64)> + '_ {
        self.weights.iter().map(|(triple, weight)| (*triple, *weight))
    }

    /// The only survivor, if exactly one is left.
    pub fn single(&self) -> Option<Triple> {
        match self.weights.len() {
            1 => self.weights.keys().next().copied(),
            _ => None,
        }
    }

    /// Survivors by descending weight, deck order among equals.
    pub fn ranked(&self) -> Vec<(Triple, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Re-weighs every survivor against `state`, dropping the impossible ones,
    /// and confirms any card all survivors agree on as that category's solution.
    ///
    /// Returns whether a solution card was newly assigned.
    pub fn refine(&mut self, state: &mut BeliefState) -> Result<bool, Contradiction> {
        let mut agreement = [CardMask::EMPTY; Category::COUNT];
        let mut first = true;

        let view: &BeliefState = state;
        self.weights.retain(|triple, weight| {
            if !is_plausible(view, triple) {
                return false;
            }
            let worlds = feasibility(view, triple);
            if worlds == 0 {
                return false;
            }
            *weight = worlds;
            for category in Category::ALL {
                let card = CardMask::single(triple.card(category));
                let slot = &mut agreement[category.index()];
                *slot = if first { card } else { slot.intersection(card) };
            }
            first = false;
            true
        });

        if self.weights.is_empty() {
            return Err(Contradiction::NoCandidates);
        }

        let mut assigned = false;
        for card in agreement.iter().filter_map(|mask| mask.first()) {
            if state.card(card).in_solution() {
                continue;
            }
            assigned |= state.assign_solution(card)?;
        }
        Ok(assigned)
    }
}

/// Cheap screen before the feasibility search.
fn is_plausible(state: &BeliefState, triple: &Triple) -> bool {
    Category::ALL.into_iter().all(|category| {
        let card = triple.card(category);
        state.card(card).owner().is_none()
            && state.solution(category).is_none_or(|solution| solution == card)
    })
}
