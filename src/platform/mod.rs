//! Platform abstraction layer
//!
//! Maps host keyboard codes (`KeyboardEvent.code` on the web) to simulation
//! actions. Unmapped keys are ignored by the caller.

use crate::sim::{Action, TickInput};

/// Action bound to a key code, if any
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Action::RotateLeft),
        "ArrowRight" | "KeyD" => Some(Action::RotateRight),
        "ArrowUp" | "KeyW" => Some(Action::Thrust),
        "Space" => Some(Action::Fire),
        "KeyX" | "ArrowDown" => Some(Action::Stop),
        _ => None,
    }
}

/// Latches key state so auto-repeat keydowns reach the simulation only once.
///
/// Tracked per key code: with two keys bound to one action, the action is
/// pressed by the first key down and released by the last key up.
#[derive(Debug, Clone, Default)]
pub struct KeyLatch {
    /// (code, action) in press order
    held: Vec<(String, Action)>,
}

impl KeyLatch {
    /// Returns the action to forward, or `None` for repeats, unmapped keys and
    /// presses/releases hidden by another key bound to the same action
    pub fn key_event(&mut self, code: &str, pressed: bool) -> Option<(Action, bool)> {
        let action = action_for_key(code)?;
        let code_held = self.held.iter().any(|(c, _)| c == code);
        match (pressed, code_held) {
            (true, false) => {
                let action_held = self.is_held(action);
                self.held.push((code.to_string(), action));
                (!action_held).then_some((action, true))
            }
            (false, true) => {
                self.held.retain(|(c, _)| c != code);
                (!self.is_held(action)).then_some((action, false))
            }
            _ => None,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|(_, a)| *a == action)
    }

    /// Re-press held movement keys, e.g. after a respawn dropped the ship's
    /// intent. Fire stays edge-triggered and is never replayed.
    pub fn replay_into(&self, input: &mut TickInput) {
        let mut seen: Vec<Action> = Vec::new();
        for &(_, action) in &self.held {
            if action != Action::Fire && !seen.contains(&action) {
                seen.push(action);
                input.push(action, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_and_space() {
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::RotateLeft));
        assert_eq!(action_for_key("ArrowRight"), Some(Action::RotateRight));
        assert_eq!(action_for_key("ArrowUp"), Some(Action::Thrust));
        assert_eq!(action_for_key("Space"), Some(Action::Fire));
        assert_eq!(action_for_key("KeyX"), Some(Action::Stop));
        assert_eq!(action_for_key("Escape"), None);
    }

    #[test]
    fn test_latch_swallows_auto_repeat() {
        let mut latch = KeyLatch::default();
        assert_eq!(latch.key_event("Space", true), Some((Action::Fire, true)));
        assert_eq!(latch.key_event("Space", true), None);
        assert!(latch.is_held(Action::Fire));
        assert_eq!(latch.key_event("Space", false), Some((Action::Fire, false)));
        assert_eq!(latch.key_event("Space", false), None);
        assert_eq!(latch.key_event("Tab", true), None);
    }

    #[test]
    fn test_two_keys_for_one_action() {
        let mut latch = KeyLatch::default();
        assert_eq!(latch.key_event("ArrowLeft", true), Some((Action::RotateLeft, true)));
        assert_eq!(latch.key_event("KeyA", true), None);
        // ArrowLeft is still down
        assert_eq!(latch.key_event("KeyA", false), None);
        assert!(latch.is_held(Action::RotateLeft));
        assert_eq!(latch.key_event("ArrowLeft", false), Some((Action::RotateLeft, false)));
        assert!(!latch.is_held(Action::RotateLeft));
    }

    #[test]
    fn test_held_thrust_resumes_after_respawn() {
        use crate::persistence::MemoryStore;
        use crate::sim::{Invulnerability, Simulation, tick};
        use crate::tuning::Tuning;

        let mut sim = Simulation::new(Tuning::default(), 4, MemoryStore::default());
        let mut latch = KeyLatch::default();
        let mut input = TickInput::default();
        sim.ship.invulnerability = Invulnerability::default();
        sim.ship.explode(&sim.tuning);

        // Pressed mid-explosion: forwarded once, ignored by the exploding ship
        for code in ["ArrowUp", "Space", "ArrowUp"] {
            if let Some((action, pressed)) = latch.key_event(code, true) {
                input.push(action, pressed);
            }
        }
        assert_eq!(input.actions.len(), 2);
        for _ in 0..sim.tuning.explosion_ticks() {
            let was_alive = sim.ship.is_alive();
            tick(&mut sim, &input);
            input.clear();
            if !was_alive && sim.ship.is_alive() {
                latch.replay_into(&mut input);
            }
        }
        assert!(sim.ship.is_alive());
        assert!(!sim.ship.thrusting);
        assert_eq!(input.actions, vec![(Action::Thrust, true)]);

        tick(&mut sim, &input);
        assert!(sim.ship.thrusting);
        assert!(sim.lasers.is_empty());
    }
}
