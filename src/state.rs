//! Game phase state machine
//!
//! A closed set of phases with a pure transition function, plus the phase
//! stack a game loop uses to overlay phases (e.g. a pause menu on top of
//! play) and return to them.

use serde::{Deserialize, Serialize};

/// Current phase of a demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the player to start
    #[default]
    MainMenu,
    /// Active gameplay
    Playing,
    /// Gameplay suspended
    Paused,
    /// Run ended
    GameOver,
}

/// Things that can happen to a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    Start,
    Pause,
    Resume,
    TogglePause,
    Lose,
    Quit,
}

/// Next phase after `event`. Events that do not apply leave the phase as is.
pub fn transition(phase: GamePhase, event: PhaseEvent) -> GamePhase {
    use GamePhase::*;
    use PhaseEvent::*;

    match (phase, event) {
        (MainMenu | GameOver, Start) => Playing,
        (Playing, Pause | TogglePause) => Paused,
        (Paused, Resume | TogglePause) => Playing,
        (Playing, Lose) => GameOver,
        (Playing | Paused | GameOver, Quit) => MainMenu,
        (phase, _) => phase,
    }
}

/// Stack of phases; the top one receives events and drives the loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseStack {
    phases: Vec<GamePhase>,
    running: bool,
}

impl Default for PhaseStack {
    fn default() -> Self {
        Self::new(GamePhase::MainMenu)
    }
}

impl PhaseStack {
    pub fn new(initial: GamePhase) -> Self {
        Self {
            phases: vec![initial],
            running: true,
        }
    }

    /// Active phase, `None` once the stack has been emptied
    pub fn current(&self) -> Option<GamePhase> {
        self.phases.last().copied()
    }

    /// Replace the active phase
    pub fn change(&mut self, phase: GamePhase) {
        match self.phases.last_mut() {
            Some(top) => *top = phase,
            None => {
                self.phases.push(phase);
                self.running = true;
            }
        }
        log::debug!("Phase changed to {:?}", phase);
    }

    /// Suspend the active phase under `phase`
    pub fn push(&mut self, phase: GamePhase) {
        self.phases.push(phase);
        self.running = true;
        log::debug!("Phase pushed {:?} (depth {})", phase, self.phases.len());
    }

    /// Return to the phase underneath. Popping the last phase stops the loop.
    pub fn pop(&mut self) -> Option<GamePhase> {
        let popped = self.phases.pop();
        if self.phases.is_empty() {
            self.running = false;
        }
        popped
    }

    /// Run `event` through [`transition`] on the active phase
    pub fn apply(&mut self, event: PhaseEvent) -> Option<GamePhase> {
        let top = self.phases.last_mut()?;
        let next = transition(*top, event);
        if next != *top {
            log::debug!("{:?} --{:?}--> {:?}", *top, event, next);
            *top = next;
        }
        Some(next)
    }

    pub fn depth(&self) -> usize {
        self.phases.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; phases are kept for inspection
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use GamePhase::*;

        const EVENTS: [PhaseEvent; 6] = [
            PhaseEvent::Start,
            PhaseEvent::Pause,
            PhaseEvent::Resume,
            PhaseEvent::TogglePause,
            PhaseEvent::Lose,
            PhaseEvent::Quit,
        ];
        const PHASES: [GamePhase; 4] = [MainMenu, Playing, Paused, GameOver];
        // Next phase for each (PHASES row, EVENTS column)
        let table = [
            [Playing, MainMenu, MainMenu, MainMenu, MainMenu, MainMenu],
            [Playing, Paused, Playing, Paused, GameOver, MainMenu],
            [Paused, Paused, Playing, Playing, Paused, MainMenu],
            [Playing, GameOver, GameOver, GameOver, GameOver, MainMenu],
        ];

        for (phase, row) in PHASES.into_iter().zip(table) {
            for (event, next) in EVENTS.into_iter().zip(row) {
                let got = transition(phase, event);
                assert_eq!(got, next, "{phase:?} + {event:?}");
            }
        }
    }

    #[test]
    fn test_pause_toggle_round_trip() {
        let paused = transition(GamePhase::Playing, PhaseEvent::TogglePause);
        assert_eq!(paused, GamePhase::Paused);
        let resumed = transition(paused, PhaseEvent::TogglePause);
        assert_eq!(resumed, GamePhase::Playing);
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = PhaseStack::new(GamePhase::Playing);
        stack.push(GamePhase::Paused);
        assert_eq!(stack.current(), Some(GamePhase::Paused));
        assert_eq!(stack.depth(), 2);

        assert_eq!(stack.pop(), Some(GamePhase::Paused));
        assert_eq!(stack.current(), Some(GamePhase::Playing));
        assert!(stack.is_running());

        stack.pop();
        assert_eq!(stack.current(), None);
        assert!(!stack.is_running());
    }

    #[test]
    fn test_stack_apply_and_change() {
        let mut stack = PhaseStack::default();
        assert_eq!(stack.apply(PhaseEvent::Start), Some(GamePhase::Playing));
        assert_eq!(stack.apply(PhaseEvent::Lose), Some(GamePhase::GameOver));
        stack.change(GamePhase::MainMenu);
        assert_eq!(stack.current(), Some(GamePhase::MainMenu));

        stack.quit();
        assert!(!stack.is_running());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_apply_on_empty_stack() {
        let mut stack = PhaseStack::default();
        stack.pop();
        assert_eq!(stack.apply(PhaseEvent::Start), None);
        stack.change(GamePhase::Playing);
        assert!(stack.is_running());
    }
}
