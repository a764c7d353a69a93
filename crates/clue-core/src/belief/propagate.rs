use super::candidates::SolutionCandidates;
use super::state::BeliefState;
use crate::error::Contradiction;
use crate::model::player::{PlayerId, seats};

impl BeliefState {
    /// Runs the per-seat rules for `player` until none of them fires.
    ///
    /// Rules, in the order each pass applies them:
    /// 1. a full hand rules the seat out for every remaining open card;
    /// 2. when the open cards exactly fill the hand, the seat holds all of them;
    /// 3. selection groups drop satisfied or ruled-out members, and a group
    ///    left with one card assigns it;
    /// 4. with one unknown card left, it must lie in every unsatisfied group,
    ///    so open cards outside their intersection are ruled out.
    ///
    /// Returns whether anything changed.
    pub fn update_player(&mut self, player: PlayerId) -> Result<bool, Contradiction> {
        let seat = player.index();
        let mut updated = false;

        loop {
            let mut stable = true;

            let belief = &self.players[seat];
            if belief.is_complete() {
                if belief.may_have.is_empty() {
                    break;
                }
                for card in belief.may_have {
                    self.exclude_owner(card, player);
                }
                stable = false;
                updated = true;
            }

            let belief = &self.players[seat];
            let open = belief.may_have;
            if !open.is_empty() && belief.must_have.len() + open.len() == belief.hand_size {
                for card in open {
                    self.assign_owner(card, player)?;
                }
                stable = false;
                updated = true;
            }

            let groups = std::mem::take(&mut self.players[seat].selection_groups);
            let mut kept = Vec::with_capacity(groups.len());
            for group in groups {
                let belief = &self.players[seat];
                if belief.is_satisfied(group) {
                    continue;
                }
                let remaining = group.intersection(belief.may_have);
                match remaining.len() {
                    0 => {
                        return Err(Contradiction::EmptySelectionGroup {
                            player,
                            cards: self.deck().describe(group),
                        });
                    }
                    1 => {
                        if let Some(card) = remaining.first() {
                            self.assign_owner(card, player)?;
                        }
                        stable = false;
                        updated = true;
                    }
                    _ => kept.push(remaining),
                }
            }
            self.players[seat].selection_groups = kept;

            let belief = &self.players[seat];
            if belief.must_have.len() + 1 == belief.hand_size {
                let last_card = belief
                    .pending_groups()
                    .fold(belief.may_have, |acc, group| acc.intersection(group));
                let ruled_out = belief.may_have.difference(last_card);
                if !ruled_out.is_empty() {
                    for card in ruled_out {
                        self.exclude_owner(card, player);
                    }
                    stable = false;
                    updated = true;
                }
            }

            if stable {
                break;
            }
        }

        Ok(updated)
    }
}

/// Runs card/category resolution, every other seat's rules and candidate
/// refinement until a whole pass changes nothing.
///
/// Our own seat is skipped: its hand is fully known from the deal.
/// Returns the number of passes taken.
pub fn propagate(
    state: &mut BeliefState,
    candidates: &mut SolutionCandidates,
) -> Result<usize, Contradiction> {
    let me = state.perspective();
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = state.resolve_categories()?;
        for seat in seats(state.player_count()) {
            if seat == me {
                continue;
            }
            changed |= state.update_player(seat)?;
        }
        changed |= candidates.refine(state)?;
        if !changed {
            return Ok(passes);
        }
    }
}
