use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::action::{
    ActionContext, ActionResult, ActionTransition, SetupError, check_invariants, ensure_clock,
};
use crate::config::GameConfig;
use crate::engine::StateReducer;
use crate::state::{ActionDetails, Color, GameState, Identity, Phase, Placement};

/// Deploys a colour's back rank and chooses its first on-deck piece.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupAction {
    pub color: Color,
    pub placements: Vec<Placement>,
    pub on_deck: Identity,
}

impl SetupAction {
    pub fn new(color: Color, placements: Vec<Placement>, on_deck: Identity) -> Self {
        Self {
            color,
            placements,
            on_deck,
        }
    }

    /// Identities requested from the stash, with multiplicity.
    fn requested(&self) -> BTreeMap<Identity, usize> {
        let mut counts = BTreeMap::new();
        let identities = self.placements.iter().map(|p| p.identity);
        for identity in identities.chain(std::iter::once(self.on_deck)) {
            *counts.entry(identity).or_insert(0) += 1;
        }
        counts
    }
}

impl ActionTransition for SetupAction {
    type Error = SetupError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        if !state.is_active {
            return Err(SetupError::GameInactive);
        }
        if state.setup_complete[self.color] {
            return Err(SetupError::AlreadyComplete { color: self.color });
        }
        if ensure_clock(state, ctx.now).is_err() {
            return Err(SetupError::ClockExpired { color: self.color });
        }

        if self.placements.len() != GameConfig::FILES {
            return Err(SetupError::WrongPieceCount {
                expected: GameConfig::FILES,
                actual: self.placements.len(),
            });
        }

        let home_row = self.color.home_row();
        let mut files = [false; GameConfig::FILES];
        for placement in &self.placements {
            let square = placement.square;
            if square.row != home_row || !square.in_bounds() {
                return Err(SetupError::WrongRank {
                    expected_row: home_row,
                    square,
                });
            }
            let file = &mut files[square.col as usize];
            if *file {
                return Err(SetupError::DuplicateSquare { square });
            }
            *file = true;
        }

        let identities = self.placements.iter().map(|p| p.identity);
        if let Some(identity) = identities
            .chain(std::iter::once(self.on_deck))
            .find(|identity| !identity.is_known())
        {
            return Err(SetupError::InvalidIdentity { identity });
        }

        if !self
            .placements
            .iter()
            .any(|p| p.identity == Identity::King)
        {
            return Err(SetupError::MissingKing);
        }

        for (identity, wanted) in self.requested() {
            let available = state.stash_count(self.color, identity);
            if wanted > available {
                return Err(SetupError::NotInStash {
                    identity,
                    wanted,
                    available,
                });
            }
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let missing = |identity| SetupError::NotInStash {
            identity,
            wanted: 1,
            available: 0,
        };

        for placement in &self.placements {
            let piece = state
                .take_from_stash(self.color, placement.identity)
                .ok_or_else(|| missing(placement.identity))?;
            state.board.set(placement.square, Some(piece));
        }
        let on_deck = state
            .take_from_stash(self.color, self.on_deck)
            .ok_or_else(|| missing(self.on_deck))?;
        state.on_decks[self.color] = Some(on_deck);
        state.setup_complete[self.color] = true;

        if state.both_setup() {
            state.player_turn = Some(Color::White);
            state.phase = Phase::AwaitingMove;
        }

        let placements: ArrayVec<Placement, { GameConfig::FILES }> =
            self.placements.iter().copied().collect();
        let mut reducer = StateReducer::new(state);
        reducer.log(
            self.color,
            ctx.now,
            ActionDetails::Setup {
                placements,
                on_deck: self.on_deck,
            },
        );
        reducer.settle(ctx.now);

        Ok(ActionResult::Setup {
            game_started: reducer.state().both_setup(),
        })
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state).map_err(|err| SetupError::InvariantViolated(err.to_string()))
    }
}
