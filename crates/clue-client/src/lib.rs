pub mod config;
pub mod logging;
pub mod protocol;
pub mod session;
