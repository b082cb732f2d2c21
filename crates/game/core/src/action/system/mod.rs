//! Terminal transitions issued on behalf of external collaborators.
//!
//! Both are idempotent: on a finished game they succeed without changing
//! anything, so a late timer tick never turns into an error.
mod disconnect;
mod time_control;

pub use disconnect::DisconnectAction;
pub use time_control::CheckTimeControlAction;
