// Input handling with per-key behaviors
//
// Terminals deliver a held key as a stream of presses. Activation keys
// (Enter, Space, copy) must fire once per physical press so a held Enter
// cannot tap a trigger twice and proceed by accident. Scroll keys repeat.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum spacing between two triggers of a state-change key when the
/// terminal never reports releases
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBehavior {
    /// Trigger once per press
    StateChange,

    /// Trigger on press, then repeat after an initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Arrow keys and line scrolling
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(50),
        }
    }

    /// PageUp/PageDown
    pub fn fast_navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(300),
            repeat_interval: Duration::from_millis(30),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn is_pressed(&self) -> bool {
        self.press_started.is_some()
    }
}

/// Tracks pressed keys and decides whether each press should act
#[derive(Debug)]
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.key_behaviors.insert(*key, behavior);
        }
    }

    /// Returns true if the press should trigger its action
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.handle_key_press_at(key, Instant::now())
    }

    pub fn handle_key_press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);
        let state = self.key_states.entry(key).or_default();

        if !state.is_pressed() {
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        let (Some(started), Some(last)) = (state.press_started, state.last_triggered) else {
            return false;
        };
        let fire = match behavior {
            KeyBehavior::StateChange => now.duration_since(last) >= STATE_CHANGE_DEBOUNCE,
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => {
                now.duration_since(started) >= initial_delay
                    && now.duration_since(last) >= repeat_interval
            }
        };
        if fire {
            state.last_triggered = Some(now);
        }
        fire
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            *state = KeyState::default();
        }
    }

    /// Forget every pressed key (modal opened or closed mid-press)
    pub fn reset(&mut self) {
        self.key_states.clear();
    }

    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Char('j'),
                KeyCode::Char('k'),
            ],
            KeyBehavior::navigation(),
        );
        handler.configure_keys(
            &[
                KeyCode::PageUp,
                KeyCode::PageDown,
                KeyCode::Home,
                KeyCode::End,
            ],
            KeyBehavior::fast_navigation(),
        );

        // Everything else defaults to StateChange; listed for readability
        handler.configure_keys(
            &[
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Esc,
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::Delete,
                KeyCode::Char('c'),
                KeyCode::Char('a'),
                KeyCode::Char('t'),
                KeyCode::Char('q'),
                KeyCode::Char('?'),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_held_enter_fires_once_within_debounce() {
        let mut handler = InputHandler::with_default_config();
        let t0 = Instant::now();

        assert!(handler.handle_key_press_at(KeyCode::Enter, t0));
        assert!(!handler.handle_key_press_at(KeyCode::Enter, t0 + ms(30)));
        assert!(!handler.handle_key_press_at(KeyCode::Enter, t0 + ms(100)));

        handler.handle_key_release(KeyCode::Enter);
        assert!(handler.handle_key_press_at(KeyCode::Enter, t0 + ms(110)));
    }

    #[test]
    fn test_state_change_without_release_after_debounce() {
        let mut handler = InputHandler::with_default_config();
        let t0 = Instant::now();

        assert!(handler.handle_key_press_at(KeyCode::Char('c'), t0));
        assert!(handler.handle_key_press_at(KeyCode::Char('c'), t0 + ms(200)));
    }

    #[test]
    fn test_repeatable_waits_for_initial_delay() {
        let mut handler = InputHandler::with_default_config();
        let t0 = Instant::now();

        assert!(handler.handle_key_press_at(KeyCode::Down, t0));
        assert!(!handler.handle_key_press_at(KeyCode::Down, t0 + ms(200)));
        assert!(handler.handle_key_press_at(KeyCode::Down, t0 + ms(400)));
        assert!(!handler.handle_key_press_at(KeyCode::Down, t0 + ms(420)));
        assert!(handler.handle_key_press_at(KeyCode::Down, t0 + ms(450)));
    }

    #[test]
    fn test_reset_forgets_held_keys() {
        let mut handler = InputHandler::with_default_config();
        let t0 = Instant::now();

        handler.handle_key_press_at(KeyCode::Enter, t0);
        handler.reset();
        assert!(handler.handle_key_press_at(KeyCode::Enter, t0 + ms(1)));
    }
}
