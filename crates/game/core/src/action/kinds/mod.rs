//! Player action implementations.
mod bomb;
mod challenge;
mod draw;
mod movement;
mod on_deck;
mod pass;
mod ready;
mod resign;
mod setup;

pub use bomb::BombAction;
pub use challenge::ChallengeAction;
pub use draw::{DrawAction, DrawResponse};
pub use movement::MoveAction;
pub use on_deck::OnDeckAction;
pub use pass::PassAction;
pub use ready::ReadyAction;
pub use resign::ResignAction;
pub use setup::SetupAction;
