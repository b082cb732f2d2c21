//! Developer tooling for driving Cloaks Gambit games from the terminal.
//!
//! - [`script`] describes a game as a JSON list of operations and replays it
//!   through a runtime
//! - [`render`] turns a (masked) record into a readable board and summary

pub mod render;
pub mod script;
