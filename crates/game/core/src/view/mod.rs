//! Read-side projections of the authoritative record.
//!
//! Nothing here mutates a [`GameState`](crate::state::GameState); every
//! function returns a new value suitable for sending to a client.

mod mask;
mod snapshot;

pub use mask::{Viewer, mask};
pub use snapshot::{ClockSnapshot, SpectatorSnapshot, spectator_snapshot};
