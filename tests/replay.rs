use haunted_arcade::map::direction::Direction;
use haunted_arcade::replay::{ReplayFrame, ReplayRecorder};
use pretty_assertions::assert_eq;

mod common;

use common::arena_game;

#[test]
fn test_idle_recorder_ignores_input() {
    let mut recorder = ReplayRecorder::new();
    recorder.record_input(10.0, Some(Direction::Up));
    recorder.capture(20.0, arena_game().snapshot());
    assert!(recorder.frames().is_empty());
    assert!(!recorder.is_recording());
}

#[test]
fn test_times_are_relative_to_start() {
    let mut recorder = ReplayRecorder::new();
    recorder.start(1000.0);
    recorder.record_input(1016.0, Some(Direction::Left));
    recorder.record_input(1250.0, None);

    let times: Vec<f64> = recorder.frames().iter().map(ReplayFrame::time).collect();
    assert_eq!(times, vec![16.0, 250.0]);
    assert_eq!(
        recorder.frames()[0],
        ReplayFrame::Input {
            time: 16.0,
            input: Some(Direction::Left)
        }
    );
}

#[test]
fn test_toggle() {
    let mut recorder = ReplayRecorder::new();
    assert!(recorder.toggle(None, 0.0));
    recorder.record_input(5.0, Some(Direction::Down));
    assert!(!recorder.toggle(None, 10.0));
    assert_eq!(recorder.frames().len(), 1);

    // Starting again discards the previous take.
    assert!(recorder.toggle(Some(true), 20.0));
    assert!(recorder.frames().is_empty());
    assert!(!recorder.toggle(Some(false), 30.0));
}

#[test]
fn test_json_frames() {
    let game = arena_game();
    let mut recorder = ReplayRecorder::new();
    recorder.start(0.0);
    recorder.record_input(16.0, Some(Direction::Right));
    recorder.capture(1000.0, game.snapshot());

    let json: serde_json::Value = serde_json::from_str(&recorder.to_json().unwrap()).unwrap();
    assert_eq!(json[0], serde_json::json!({ "time": 16.0, "input": "right" }));
    assert_eq!(json[1]["time"], 1000.0);
    assert_eq!(json[1]["snapshot"]["state"], "ready");
    assert_eq!(json[1]["snapshot"]["pelletsRemaining"], 31);
}
