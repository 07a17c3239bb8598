use bevy::prelude::*;

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Load,
    Paused,
    Running,
}

/// Whether generations should advance this frame. A transition queued this frame wins
/// over the current state, so a pause takes effect before the next tick.
pub fn is_running(state: &State<GameState>, next_state: &NextState<GameState>) -> bool {
    match next_state {
        NextState::Pending(next) => matches!(next, GameState::Running),
        NextState::Unchanged => matches!(state.get(), GameState::Running),
    }
}

/// run condition form of [`is_running`]
pub fn simulation_running(
    state: Res<State<GameState>>,
    next_state: Res<NextState<GameState>>,
) -> bool {
    is_running(&state, &next_state)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pending_transition_wins() {
        let running = State::new(GameState::Running);
        let paused = State::new(GameState::Paused);

        assert!(is_running(&running, &NextState::Unchanged));
        assert!(!is_running(&paused, &NextState::Unchanged));
        assert!(!is_running(&running, &NextState::Pending(GameState::Paused)));
        assert!(is_running(&paused, &NextState::Pending(GameState::Running)));
    }
}
