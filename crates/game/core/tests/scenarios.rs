mod common;

use common::{Table, layout, sq};
use gambit_core::{
    ActionError, ActionResult, ChallengeOutcome, Color, Declaration, DrawResponse, ExecuteError,
    GameConfig, Identity, MoveState, Phase, Piece, Placement, Responses, SetupError, TimeControl,
    Timestamp, TransitionPhaseError, Verdict, WinReason, available_responses,
};

use Color::{Black, White};

fn action_error(err: ExecuteError) -> ActionError {
    match err {
        ExecuteError::Move(TransitionPhaseError { error, .. })
        | ExecuteError::Challenge(TransitionPhaseError { error, .. })
        | ExecuteError::Bomb(TransitionPhaseError { error, .. })
        | ExecuteError::OnDeck(TransitionPhaseError { error, .. })
        | ExecuteError::Pass(TransitionPhaseError { error, .. })
        | ExecuteError::Resign(TransitionPhaseError { error, .. })
        | ExecuteError::Draw(TransitionPhaseError { error, .. })
        | ExecuteError::Ready(TransitionPhaseError { error, .. }) => error,
        other => panic!("unexpected error: {other}"),
    }
}

fn setup_error(err: ExecuteError) -> SetupError {
    match err {
        ExecuteError::Setup(TransitionPhaseError { error, .. }) => error,
        other => panic!("unexpected error: {other}"),
    }
}

fn placements(row: u8, identities: [Identity; 5]) -> Vec<Placement> {
    identities
        .into_iter()
        .enumerate()
        .map(|(col, identity)| Placement::new(sq(row, col as u8), identity))
        .collect()
}

/// White rook facing a Black piece of `identity` on (3, 0).
fn bomb_range(identity: Identity) -> Table {
    Table::custom(&[
        (sq(0, 4), White, Identity::King),
        (sq(5, 4), Black, Identity::King),
        (sq(0, 0), White, Identity::Rook),
        (sq(3, 0), Black, identity),
    ])
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn setup_rejects_malformed_deployments() {
    let mut table = Table::new();
    use Identity::*;

    let short = placements(0, [King, Rook, Rook, Bishop, Bomb])[..4].to_vec();
    let err = table.setup(White, short, Knight).unwrap_err();
    assert_eq!(
        setup_error(err),
        SetupError::WrongPieceCount {
            expected: GameConfig::FILES,
            actual: 4,
        }
    );

    let err = table
        .setup(White, placements(1, [King, Rook, Rook, Bishop, Bomb]), Knight)
        .unwrap_err();
    assert!(matches!(setup_error(err), SetupError::WrongRank { .. }));

    let mut doubled = placements(0, [King, Rook, Rook, Bishop, Bomb]);
    doubled[4].square = sq(0, 0);
    let err = table.setup(White, doubled, Knight).unwrap_err();
    assert_eq!(
        setup_error(err),
        SetupError::DuplicateSquare { square: sq(0, 0) }
    );

    let err = table
        .setup(White, placements(0, [King, Rook, Unknown, Bishop, Bomb]), Knight)
        .unwrap_err();
    assert_eq!(
        setup_error(err),
        SetupError::InvalidIdentity { identity: Unknown }
    );

    let err = table
        .setup(White, placements(0, [Rook, Rook, Bishop, Bishop, Bomb]), Knight)
        .unwrap_err();
    assert_eq!(setup_error(err), SetupError::MissingKing);

    let err = table
        .setup(White, placements(0, [King, Rook, Rook, Knight, Bomb]), Rook)
        .unwrap_err();
    assert_eq!(
        setup_error(err),
        SetupError::NotInStash {
            identity: Rook,
            wanted: 3,
            available: 2,
        }
    );

    assert!(table.state.actions.is_empty());
    assert_eq!(table.state.stashes[White].len(), GameConfig::STASH_SIZE);
}

#[test]
fn setup_deploys_and_starts_play() {
    let mut table = Table::new();

    let outcome = table
        .setup(White, layout(White), Identity::Rook)
        .expect("white setup");
    assert_eq!(
        outcome.action_result,
        ActionResult::Setup {
            game_started: false,
        }
    );
    assert_eq!(table.state.stashes[White].len(), 2);
    assert_eq!(
        table.state.on_decks[White],
        Some(Piece::new(White, Identity::Rook))
    );
    assert_eq!(
        table.piece(sq(0, 2)),
        Some(Piece::new(White, Identity::King))
    );

    let err = table
        .setup(White, layout(White), Identity::Rook)
        .unwrap_err();
    assert_eq!(
        setup_error(err),
        SetupError::AlreadyComplete { color: White }
    );

    let err = table
        .mv(White, sq(0, 0), sq(1, 0), Declaration::Rook)
        .unwrap_err();
    assert_eq!(action_error(err), ActionError::SetupIncomplete);

    let outcome = table
        .setup(Black, layout(Black), Identity::Knight)
        .expect("black setup");
    assert_eq!(
        outcome.action_result,
        ActionResult::Setup { game_started: true }
    );
    assert_eq!(table.state.player_turn, Some(White));
    assert_eq!(table.state.phase, Phase::AwaitingMove);
    assert_eq!(available_responses(&table.state, White), Responses::MOVE);
    assert!(available_responses(&table.state, Black).is_empty());
}

// ============================================================================
// Bombs
// ============================================================================

#[test]
fn passing_on_a_bomb_loses_the_attacker() {
    let mut table = bomb_range(Identity::Bomb);

    table
        .mv(White, sq(0, 0), sq(3, 0), Declaration::Rook)
        .expect("rook attacks");
    assert!(available_responses(&table.state, Black).contains(Responses::BOMB));

    table.bomb(Black).expect("bomb");
    assert_eq!(table.state.phase, Phase::BombPendingResponse);
    assert_eq!(table.state.player_turn, Some(White));
    assert_eq!(
        available_responses(&table.state, White),
        Responses::CHALLENGE | Responses::PASS
    );
    let err = table
        .mv(White, sq(0, 4), sq(1, 4), Declaration::King)
        .unwrap_err();
    assert_eq!(action_error(err), ActionError::BombPending);

    let outcome = table.pass(White).expect("pass");
    assert_eq!(
        outcome.action_result,
        ActionResult::Pass {
            casualty: Piece::new(White, Identity::Rook),
        }
    );

    let state = &table.state;
    assert_eq!(state.captured[Black], vec![Piece::new(White, Identity::Rook)]);
    assert_eq!(table.piece(sq(0, 0)), None);
    assert_eq!(table.piece(sq(3, 0)), Some(Piece::new(Black, Identity::Bomb)));
    assert_eq!(state.last_move().map(|mv| mv.state), Some(MoveState::Completed));
    assert_eq!(state.player_turn, Some(Black));
    assert_eq!(state.phase, Phase::AwaitingMove);
}

#[test]
fn challenging_a_real_bomb_costs_a_dagger_and_the_attacker() {
    let mut table = bomb_range(Identity::Bomb);
    let bombs_before = table.state.stash_count(Black, Identity::Bomb);
    let on_deck = table.state.on_decks[Black].expect("black on deck");

    table
        .mv(White, sq(0, 0), sq(3, 0), Declaration::Rook)
        .expect("rook attacks");
    table.bomb(Black).expect("bomb");
    let outcome = table.challenge(White).expect("challenge");
    assert_eq!(
        outcome.action_result,
        ActionResult::Challenge {
            outcome: ChallengeOutcome::Fail,
            against_bomb: true,
        }
    );

    let state = &table.state;
    assert_eq!(state.daggers[White], 1);
    assert_eq!(state.stash_count(Black, Identity::Bomb), bombs_before + 1);
    assert_eq!(table.piece(sq(3, 0)), Some(on_deck));
    assert_eq!(state.captured[Black], vec![Piece::new(White, Identity::Rook)]);
    assert_eq!(state.on_decking_player, Some(Black));
    assert_eq!(state.player_turn, Some(Black));
    assert_eq!(state.phase, Phase::OnDeckOwed);
    assert_eq!(available_responses(state, Black), Responses::ON_DECK);

    let err = table.on_deck(White, Identity::Rook).unwrap_err();
    assert_eq!(action_error(err), ActionError::NotOnDecking { color: White });

    table.on_deck(Black, Identity::Bishop).expect("on deck");
    assert_eq!(table.state.player_turn, Some(Black));
    assert_eq!(table.state.phase, Phase::AwaitingMove);
}

#[test]
fn challenging_a_fake_bomb_lets_the_attack_through() {
    let mut table = bomb_range(Identity::Knight);

    table
        .mv(White, sq(0, 0), sq(3, 0), Declaration::Rook)
        .expect("rook attacks");
    table.bomb(Black).expect("bluffed bomb");
    let outcome = table.challenge(White).expect("challenge");
    assert_eq!(
        outcome.action_result,
        ActionResult::Challenge {
            outcome: ChallengeOutcome::Success,
            against_bomb: true,
        }
    );

    let state = &table.state;
    assert_eq!(state.daggers[Black], 1);
    assert_eq!(state.daggers[White], 0);
    assert_eq!(state.captured[White], vec![Piece::new(Black, Identity::Knight)]);
    assert_eq!(table.piece(sq(3, 0)), Some(Piece::new(White, Identity::Rook)));
    assert_eq!(state.last_move().map(|mv| mv.state), Some(MoveState::Resolved));
    assert_eq!(state.player_turn, Some(Black));
    assert_eq!(state.on_decking_player, None);
}

#[test]
fn bombs_are_restricted() {
    let mut table = Table::custom(&[
        (sq(0, 4), White, Identity::King),
        (sq(5, 4), Black, Identity::King),
        (sq(1, 4), Black, Identity::Bomb),
        (sq(0, 0), White, Identity::Rook),
    ]);

    table
        .mv(White, sq(0, 4), sq(1, 4), Declaration::King)
        .expect("king attacks");
    assert_eq!(
        available_responses(&table.state, Black),
        Responses::MOVE | Responses::CHALLENGE
    );
    let err = table.bomb(Black).unwrap_err();
    assert_eq!(action_error(err), ActionError::CannotBombKing);

    let mut table = bomb_range(Identity::Bomb);
    table
        .mv(White, sq(0, 0), sq(2, 0), Declaration::Rook)
        .expect("rook to an empty square");
    let err = table.bomb(Black).unwrap_err();
    assert_eq!(
        action_error(err),
        ActionError::NotYourPiece {
            square: sq(2, 0),
            color: Black,
        }
    );
    let err = table.pass(Black).unwrap_err();
    assert_eq!(action_error(err), ActionError::NoBombToAnswer);
}

// ============================================================================
// Draws, resignation, disconnects
// ============================================================================

#[test]
fn draw_negotiation_with_cooldown() {
    let mut table = Table::deployed();

    let err = table.draw(Black, DrawResponse::Accept).unwrap_err();
    assert_eq!(action_error(err), ActionError::NoDrawOffer);

    table.draw(White, DrawResponse::Offer).expect("offer");
    let err = table.draw(White, DrawResponse::Offer).unwrap_err();
    assert_eq!(action_error(err), ActionError::DrawOfferPending { by: White });
    let err = table.draw(White, DrawResponse::Accept).unwrap_err();
    assert_eq!(action_error(err), ActionError::OwnDrawOffer);

    table.draw(Black, DrawResponse::Decline).expect("decline");
    let declined_at = table.now;
    assert_eq!(table.state.draw_offer, None);
    assert_eq!(
        table.state.draw_offer_cooldowns[White],
        Some(declined_at + GameConfig::DEFAULT_DRAW_OFFER_COOLDOWN_MS)
    );

    let err = table.draw(White, DrawResponse::Offer).unwrap_err();
    assert_eq!(
        action_error(err),
        ActionError::DrawCooldown {
            remaining_ms: GameConfig::DEFAULT_DRAW_OFFER_COOLDOWN_MS - 1_000,
        }
    );
    table.draw(Black, DrawResponse::Offer).expect("black is not cooling down");
    table.draw(White, DrawResponse::Decline).expect("decline");

    table.advance(GameConfig::DEFAULT_DRAW_OFFER_COOLDOWN_MS);
    table.draw(White, DrawResponse::Offer).expect("cooldown elapsed");
    let outcome = table.draw(Black, DrawResponse::Accept).expect("accept");

    assert_eq!(outcome.verdict, Some(Verdict::draw(WinReason::Draw)));
    let state = &table.state;
    assert_eq!(state.winner, None);
    assert_eq!(state.draw_offer, None);
    assert_eq!(state.draw_offer_cooldowns[White], None);
    assert_eq!(state.draw_offer_cooldowns[Black], None);
}

#[test]
fn resignation_hands_the_win_to_the_opponent() {
    let mut table = Table::deployed();
    let outcome = table.resign(Black).expect("resign");
    assert_eq!(outcome.verdict, Some(Verdict::win(White, WinReason::Resign)));
    assert_eq!(
        table.state.last_action().map(|record| record.player),
        Some(Black)
    );
    let err = table.resign(White).unwrap_err();
    assert_eq!(action_error(err), ActionError::GameInactive);
}

#[test]
fn disconnect_is_idempotent() {
    let mut table = Table::deployed();
    let outcome = table.disconnect(White);
    assert_eq!(
        outcome.verdict,
        Some(Verdict::win(Black, WinReason::Disconnect))
    );
    let ended_at = table.state.end_time;

    let again = table.disconnect(Black);
    assert_eq!(again.verdict, None);
    assert_eq!(table.state.winner, Some(Black));
    assert_eq!(table.state.end_time, ended_at);
}

// ============================================================================
// Time control
// ============================================================================

fn fast_config() -> GameConfig {
    GameConfig::with_time_control(TimeControl::new(10_000, 1_000))
}

#[test]
fn clock_starts_once_both_players_are_ready() {
    let mut table = Table::with_config(fast_config());
    assert_eq!(table.check_time().action_result, ActionResult::TimeControl { flagged: None });

    let outcome = table.ready(White).expect("ready");
    assert_eq!(
        outcome.action_result,
        ActionResult::Ready {
            clock_started: false,
        }
    );
    let outcome = table.ready(Black).expect("ready");
    assert_eq!(
        outcome.action_result,
        ActionResult::Ready {
            clock_started: true,
        }
    );
    assert_eq!(table.state.start_time, Some(table.now));
    assert!(table.state.clock.is_running());
}

#[test]
fn flag_falls_on_the_side_to_move() {
    // Ready at 1s and 2s, setups at 3s and 4s, White moves at 5s.
    let mut table = Table::deployed_with(fast_config());
    table
        .mv(White, sq(0, 0), sq(1, 0), Declaration::Rook)
        .expect("white move");
    assert_eq!(table.now, Timestamp::from_millis(5_000));
    assert_eq!(table.state.clock.remaining_ms[White], 9_000);
    assert_eq!(table.state.clock.remaining_ms[Black], 8_000);

    table.advance(7_500);
    let before = table.state.clone();
    let err = table.challenge(Black).unwrap_err();
    assert_eq!(action_error(err), ActionError::ClockExpired { color: Black });
    assert_eq!(table.state, before);

    let outcome = table.check_time();
    assert_eq!(
        outcome.action_result,
        ActionResult::TimeControl {
            flagged: Some(Black),
        }
    );
    assert_eq!(
        outcome.verdict,
        Some(Verdict::win(White, WinReason::TimeControl))
    );
    assert_eq!(table.state.end_time, Some(Timestamp::from_millis(13_000)));

    let repeat = table.check_time();
    assert_eq!(repeat.verdict, None);
}

#[test]
fn setup_flag_favours_the_colour_that_deployed() {
    let mut table = Table::with_config(fast_config());
    table.ready(White).expect("ready");
    table.ready(Black).expect("ready");
    table
        .setup(White, layout(White), Identity::Rook)
        .expect("white setup");

    table.advance(9_500);
    let outcome = table.check_time();
    assert_eq!(
        outcome.verdict,
        Some(Verdict::win(White, WinReason::TimeControl))
    );
    assert_eq!(table.state.end_time, Some(Timestamp::from_millis(12_000)));
}

#[test]
fn setup_flag_with_nobody_deployed_is_a_draw() {
    let mut table = Table::with_config(fast_config());
    table.ready(White).expect("ready");
    table.ready(Black).expect("ready");

    table.advance(10_000);
    let outcome = table.check_time();
    assert_eq!(
        outcome.verdict,
        Some(Verdict::draw(WinReason::TimeControl))
    );
}
