use haunted_arcade::game::state::{GameState, StateMachine};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

mod common;

fn machine_in(state: GameState) -> StateMachine<GameState> {
    let mut machine = StateMachine::game();
    machine.reset(state);
    machine
}

#[test]
fn test_transition_table() {
    use GameState::*;

    let allowed = |from: GameState, to: GameState| -> bool {
        matches!(
            (from, to),
            (Ready, Playing | Paused | Memory)
                | (Playing, Frightened | Paused | GameOver | Memory)
                | (Frightened, Playing | GameOver | Memory)
                | (Memory, Ready | Playing)
                | (Paused, Playing | Memory)
                | (GameOver, Ready)
        )
    };

    for from in GameState::iter() {
        for to in GameState::iter() {
            if from == to {
                continue;
            }
            let mut machine = machine_in(from);
            assert_eq!(machine.can_transition(to), allowed(from, to), "{from:?} -> {to:?}");
            assert_eq!(machine.transition(to), allowed(from, to), "{from:?} -> {to:?}");
            let expected = if allowed(from, to) { to } else { from };
            assert_eq!(machine.state(), expected);
        }
    }
}

#[test]
fn test_staying_put_always_succeeds() {
    for state in GameState::iter() {
        let mut machine = machine_in(state);
        assert!(machine.transition(state));
        assert_eq!(machine.state(), state);
    }
}

#[test]
fn test_frightened_cannot_pause() {
    let mut machine = machine_in(GameState::Frightened);
    assert!(!machine.transition(GameState::Paused));
    assert_eq!(machine.state(), GameState::Frightened);
}

#[test]
fn test_halted_states() {
    let halted: Vec<GameState> = GameState::iter().filter(|state| state.is_halted()).collect();
    assert_eq!(halted, vec![GameState::Paused, GameState::GameOver]);
}

#[test]
fn test_serialized_names() {
    let names: Vec<String> = GameState::iter()
        .map(|state| serde_json::to_value(state).unwrap().as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["ready", "playing", "frightened", "memory", "paused", "gameOver"]);
}
