pub mod belief;
pub mod error;
pub mod model;

pub use error::{Contradiction, DeductionError, MalformedEvent};
