//! Deterministic belief tracking for card ownership and the hidden solution.
//!
//! This module is composed of:
//! - `card`: per-card ownership candidacy and per-category resolution counters.
//! - `player`: per-player knowledge (`must_have`, `may_have`, selection groups).
//! - `state`: flat arrays of the above and the two-sided mutations that keep them in sync.
//! - `propagate`: the per-player rules and the engine-wide fixpoint.
//! - `candidates`: surviving solution triples and their refinement.
//! - `feasibility`: exhaustive world counting behind candidate refinement.
//! - `dump`: human-readable rendering for diagnostics.

mod candidates;
mod card;
mod dump;
mod feasibility;
mod player;
mod propagate;
mod state;

pub use candidates::SolutionCandidates;
pub use card::{CardBelief, CategoryBelief};
pub use feasibility::{EXHAUSTIVE_SEARCH_THRESHOLD, feasibility};
pub use player::PlayerBelief;
pub use propagate::propagate;
pub use state::BeliefState;
