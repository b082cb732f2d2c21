#![allow(dead_code)]

use gambit_core::{
    Action, BombAction, ChallengeAction, CheckTimeControlAction, Color, Declaration,
    DisconnectAction, DrawAction, DrawResponse, ExecuteError, ExecutionOutcome, GameConfig,
    GameEngine, GameId, GameState, Identity, MoveAction, OnDeckAction, PassAction, Phase, Piece,
    Placement, PlayerAction, ReadyAction, ResignAction, SetupAction, Square, SystemActionKind,
    Timestamp,
};

pub const fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

/// Back rank used by `Table::deployed`: Rook, Bishop, King, Knight, Bomb.
pub const LAYOUT: [Identity; 5] = [
    Identity::Rook,
    Identity::Bishop,
    Identity::King,
    Identity::Knight,
    Identity::Bomb,
];

pub fn layout(color: Color) -> Vec<Placement> {
    let row = color.home_row();
    LAYOUT
        .iter()
        .enumerate()
        .map(|(col, &identity)| Placement::new(sq(row, col as u8), identity))
        .collect()
}

/// A game record plus a hand-advanced clock.
pub struct Table {
    pub state: GameState,
    pub now: Timestamp,
}

impl Table {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            state: GameState::new(GameId(1), config, Timestamp::ZERO),
            now: Timestamp::ZERO,
        }
    }

    /// Both colours ready and deployed with [`LAYOUT`], Rook on deck.
    pub fn deployed() -> Self {
        Self::deployed_with(GameConfig::default())
    }

    pub fn deployed_with(config: GameConfig) -> Self {
        let mut table = Self::with_config(config);
        table.ready(Color::White).expect("white ready");
        table.ready(Color::Black).expect("black ready");
        for color in Color::ALL {
            table
                .setup(color, layout(color), Identity::Rook)
                .expect("setup");
        }
        table
    }

    /// A game past setup with exactly `pieces` on the board and White to move.
    ///
    /// The clock is left stopped.
    pub fn custom(pieces: &[(Square, Color, Identity)]) -> Self {
        let mut table = Self::new();
        let state = &mut table.state;
        for &(square, color, identity) in pieces {
            let piece = state
                .take_from_stash(color, identity)
                .unwrap_or(Piece::new(color, identity));
            state.board.set(square, Some(piece));
        }
        for color in Color::ALL {
            state.on_decks[color] = state
                .take_from_stash(color, Identity::Knight)
                .or_else(|| state.take_from_stash(color, Identity::Bishop));
            state.setup_complete[color] = true;
            state.players_ready[color] = true;
        }
        state.player_turn = Some(Color::White);
        state.phase = Phase::AwaitingMove;
        table
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now + ms;
    }

    pub fn execute(&mut self, action: Action) -> Result<ExecutionOutcome, ExecuteError> {
        self.advance(1_000);
        GameEngine::new(&mut self.state).execute(&action, self.now)
    }

    pub fn play(&mut self, action: PlayerAction) -> Result<ExecutionOutcome, ExecuteError> {
        self.execute(Action::Player(action))
    }

    pub fn ready(&mut self, color: Color) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Ready(ReadyAction::new(color)))
    }

    pub fn setup(
        &mut self,
        color: Color,
        placements: Vec<Placement>,
        on_deck: Identity,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Setup(SetupAction::new(
            color, placements, on_deck,
        )))
    }

    pub fn mv(
        &mut self,
        color: Color,
        from: Square,
        to: Square,
        declaration: Declaration,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Move(MoveAction::new(
            color,
            from,
            to,
            declaration,
        )))
    }

    pub fn challenge(&mut self, color: Color) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Challenge(ChallengeAction::new(color)))
    }

    pub fn bomb(&mut self, color: Color) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Bomb(BombAction::new(color)))
    }

    pub fn pass(&mut self, color: Color) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Pass(PassAction::new(color)))
    }

    pub fn on_deck(
        &mut self,
        color: Color,
        identity: Identity,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::OnDeck(OnDeckAction::new(color, identity)))
    }

    pub fn resign(&mut self, color: Color) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Resign(ResignAction::new(color)))
    }

    pub fn draw(
        &mut self,
        color: Color,
        response: DrawResponse,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.play(PlayerAction::Draw(DrawAction::new(color, response)))
    }

    pub fn disconnect(&mut self, color: Color) -> ExecutionOutcome {
        self.advance(1_000);
        let action = Action::system(SystemActionKind::Disconnect(DisconnectAction::new(color)));
        GameEngine::new(&mut self.state)
            .execute(&action, self.now)
            .expect("disconnect never fails")
    }

    /// Runs the time-control check at `self.now` without advancing it.
    pub fn check_time(&mut self) -> ExecutionOutcome {
        let action = Action::system(SystemActionKind::CheckTimeControl(CheckTimeControlAction));
        GameEngine::new(&mut self.state)
            .execute(&action, self.now)
            .expect("time control check never fails")
    }

    pub fn piece(&self, square: Square) -> Option<Piece> {
        self.state.board.get(square).copied()
    }
}
