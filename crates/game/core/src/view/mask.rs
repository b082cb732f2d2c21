use crate::state::{ActionDetails, ActionRecord, Color, GameState, Identity, Piece};

/// Who a view is prepared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Viewer {
    Player(Color),
    Spectator,
    /// Sees the record unmasked.
    Admin,
}

impl Viewer {
    /// Whether this viewer may see the identity of `owner`'s pieces.
    pub const fn sees(self, owner: Color) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Spectator => false,
            Viewer::Player(color) => color.index() == owner.index(),
        }
    }

    fn hide(self, piece: &mut Piece) {
        if !self.sees(piece.color) {
            *piece = piece.masked();
        }
    }

    fn hide_identity(self, owner: Color, identity: &mut Identity) {
        if !self.sees(owner) {
            *identity = Identity::Unknown;
        }
    }

    fn hide_record(self, record: &mut ActionRecord) {
        let owner = record.player;
        match &mut record.details {
            ActionDetails::Setup {
                placements,
                on_deck,
            } => {
                for placement in placements.iter_mut() {
                    self.hide_identity(owner, &mut placement.identity);
                }
                self.hide_identity(owner, on_deck);
            }
            ActionDetails::OnDeck { identity } => self.hide_identity(owner, identity),
            ActionDetails::Move { .. }
            | ActionDetails::Challenge { .. }
            | ActionDetails::Bomb
            | ActionDetails::Pass
            | ActionDetails::Resign
            | ActionDetails::Ready => {}
        }
    }
}

/// Returns a copy of `state` with every identity `viewer` may not know
/// replaced by [`Identity::Unknown`].
///
/// Board, stashes, on-deck slots, and the identities named in setup and
/// on-deck log entries are masked. Captured pieces stay revealed.
pub fn mask(state: &GameState, viewer: Viewer) -> GameState {
    let mut view = state.clone();
    if viewer == Viewer::Admin {
        return view;
    }

    view.board
        .pieces_mut()
        .for_each(|piece| viewer.hide(piece));
    for (_, stash) in view.stashes.iter_mut() {
        stash.iter_mut().for_each(|piece| viewer.hide(piece));
    }
    for (_, on_deck) in view.on_decks.iter_mut() {
        if let Some(piece) = on_deck {
            viewer.hide(piece);
        }
    }
    view.actions
        .iter_mut()
        .for_each(|record| viewer.hide_record(record));

    view
}
