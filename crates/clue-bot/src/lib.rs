pub mod bot;
pub mod policy;

pub use bot::{
    DeductionEngine, Journal, NullJournal, SuggestPlanner, SuggestStats, TracingJournal,
    choose_reveal,
};
pub use policy::Policy;
