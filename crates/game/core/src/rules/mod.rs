//! Pure rule evaluation shared by the action transitions.
mod legality;
mod verdict;

pub use legality::{is_legal, reachable};
pub use verdict::{WinCheck, evaluate};
