use std::sync::Arc;
use std::time::Duration;

use gambit_cli::render;
use gambit_cli::script::{self, Script};
use gambit_core::{ActionResult, Color, Identity, Viewer, WinReason, mask};
use gambit_runtime::{FileGameRepository, GameRepository, ManualClock, Runtime, RuntimeConfig};

const OPENING: &str = r#"{
    "mode": "quickplay",
    "steps": [
        { "op": "ready", "color": "white" },
        { "op": "ready", "color": "black" },
        { "op": "setup", "color": "white", "on_deck": "rook", "placements": [
            { "square": { "row": 0, "col": 0 }, "identity": "rook" },
            { "square": { "row": 0, "col": 1 }, "identity": "bishop" },
            { "square": { "row": 0, "col": 2 }, "identity": "king" },
            { "square": { "row": 0, "col": 3 }, "identity": "knight" },
            { "square": { "row": 0, "col": 4 }, "identity": "bomb" }
        ] },
        { "op": "setup", "color": "black", "on_deck": "rook", "placements": [
            { "square": { "row": 5, "col": 0 }, "identity": "rook" },
            { "square": { "row": 5, "col": 1 }, "identity": "bishop" },
            { "square": { "row": 5, "col": 2 }, "identity": "king" },
            { "square": { "row": 5, "col": 3 }, "identity": "knight" },
            { "square": { "row": 5, "col": 4 }, "identity": "bomb" }
        ] },
        { "op": "move", "advance_ms": 1000, "color": "white",
          "from": { "row": 0, "col": 1 }, "to": { "row": 2, "col": 3 }, "declaration": "king" },
        { "op": "move", "advance_ms": 1000, "color": "white",
          "from": { "row": 0, "col": 0 }, "to": { "row": 1, "col": 0 }, "declaration": "rook" },
        { "op": "challenge", "advance_ms": 1000, "color": "black" }
    ]
}"#;

async fn runtime(clock: &Arc<ManualClock>) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            tick_interval: Duration::ZERO,
            ..RuntimeConfig::default()
        })
        .clock(clock.clone())
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn replay_records_rejections_and_keeps_going() {
    let clock = Arc::new(ManualClock::default());
    let runtime = runtime(&clock).await;
    let handle = runtime.handle();

    let script = Script::from_json(OPENING).unwrap();
    let replay = script::run(&handle, &clock, &script, false).await.unwrap();
    assert_eq!(replay.steps.len(), script.steps.len());

    // A Bishop standing on (0, 1) declared as King two squares away is
    // outside the King's reach, so the engine refuses it.
    let rejected: Vec<_> = replay.rejected().map(|step| step.index).collect();
    assert_eq!(rejected, vec![4]);
    let rejection = replay.steps[4].outcome.as_ref().unwrap_err();
    assert_eq!(rejection.code, "ACTION_ILLEGAL_DECLARATION");

    // The honest rook move survives the challenge.
    let last = replay.steps[6].outcome.as_ref().unwrap();
    assert!(matches!(
        last.action_result,
        ActionResult::Challenge { against_bomb: false, .. }
    ));

    let state = handle.get_view(replay.game_id, Viewer::Admin).await.unwrap();
    assert_eq!(state.daggers[Color::Black], 1);
    assert_eq!(state.on_decking_player, Some(Color::White));

    let spectator = handle
        .get_view(replay.game_id, Viewer::Spectator)
        .await
        .unwrap();
    let board = render::board(&spectator);
    assert!(board.lines().all(|line| !line.contains('K')));
    assert!(board.contains('?'));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn strict_replay_stops_at_first_rejection() {
    let clock = Arc::new(ManualClock::default());
    let runtime = runtime(&clock).await;
    let handle = runtime.handle();

    let script = Script::from_json(OPENING).unwrap();
    let replay = script::run(&handle, &clock, &script, true).await.unwrap();
    assert_eq!(replay.steps.len(), 5);
    assert!(replay.steps[4].outcome.is_err());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn replay_clock_drives_time_control() {
    let clock = Arc::new(ManualClock::default());
    let runtime = runtime(&clock).await;
    let handle = runtime.handle();

    let script = Script::from_json(
        r#"{
            "mode": "ranked",
            "steps": [
                { "op": "ready", "color": "white" },
                { "op": "ready", "color": "black" },
                { "op": "setup", "color": "white", "on_deck": "knight", "placements": [
                    { "square": { "row": 0, "col": 0 }, "identity": "king" },
                    { "square": { "row": 0, "col": 1 }, "identity": "rook" },
                    { "square": { "row": 0, "col": 2 }, "identity": "rook" },
                    { "square": { "row": 0, "col": 3 }, "identity": "bishop" },
                    { "square": { "row": 0, "col": 4 }, "identity": "bishop" }
                ] },
                { "op": "check_time_control", "advance_ms": 120001 }
            ]
        }"#,
    )
    .unwrap();
    let replay = script::run(&handle, &clock, &script, true).await.unwrap();
    assert_eq!(replay.rejected().count(), 0);

    let state = handle.get_view(replay.game_id, Viewer::Admin).await.unwrap();
    assert!(!state.is_active);
    assert_eq!(state.winner, Some(Color::White));
    assert_eq!(state.win_reason, Some(WinReason::TimeControl));
    assert_eq!(state.on_decks[Color::White].map(|p| p.identity), Some(Identity::Knight));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn replayed_game_can_be_inspected_from_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::default());
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            tick_interval: Duration::ZERO,
            data_dir: Some(dir.path().to_path_buf()),
            ..RuntimeConfig::default()
        })
        .clock(clock.clone())
        .build()
        .await
        .unwrap();

    let script = Script::from_json(OPENING).unwrap();
    let replay = script::run(&runtime.handle(), &clock, &script, false)
        .await
        .unwrap();
    runtime.shutdown().await.unwrap();

    assert!(
        dir.path()
            .join(format!("game_{}.bin", replay.game_id.0))
            .exists()
    );

    let repository = FileGameRepository::new(dir.path()).unwrap();
    assert_eq!(repository.list().await.unwrap(), vec![replay.game_id]);
    let state = repository.load(replay.game_id).await.unwrap().unwrap();
    assert_eq!(state.daggers[Color::Black], 1);

    let board = render::board(&mask(&state, Viewer::Spectator));
    assert!(board.contains('?'));
    assert!(board.lines().all(|line| !line.contains('K')));
}
