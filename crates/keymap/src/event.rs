//! Key press events as seen by the dispatcher.
//!
//! Responsibilities:
//! - Carry modifier flags, key names, phase and activation scope of one key event.
//! - Build the pressed combination string used for matching.
//! - Convert crossterm key events.
//!
//! Does NOT handle:
//! - Matching against bindings (see `dispatcher`).
//!
//! Invariants:
//! - Key names are lower-case.
//! - The pressed string lists modifiers as meta, control, alt, shift, then keys.
//! - Shifted symbols arrive the way `KeyNotation::normalize` writes them: `#`
//!   as `shift+3`, and other punctuation as the bare symbol.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use mailkeys_config::{Scope, unshifted_symbol};

/// Pseudo-key some hosts report for pointer clicks.
pub const CLICK_KEY: &str = "click";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPhase {
    #[default]
    Down,
    Up,
}

/// One physical key event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub meta: bool,
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    /// Non-modifier key names, lower-case
    pub keys: Vec<String>,
    pub phase: KeyPhase,
    /// Activation scope the event was raised in; `None` is accepted by any dispatcher
    pub scope: Option<Scope>,
    default_prevented: bool,
}

impl KeyPress {
    /// A key-down event for a single key.
    pub fn down(key: &str) -> Self {
        Self {
            keys: vec![key.to_lowercase()],
            ..Self::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_control(mut self) -> Self {
        self.control = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn released(mut self) -> Self {
        self.phase = KeyPhase::Up;
        self
    }

    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The combination string this event matches against.
    pub fn combination(&self) -> String {
        let mut pressed = String::new();
        for (held, name) in [
            (self.meta, "meta"),
            (self.control, "control"),
            (self.alt, "alt"),
            (self.shift, "shift"),
        ] {
            if held {
                pressed.push_str(name);
                pressed.push('+');
            }
        }
        pressed.push_str(&self.keys.join("+"));
        pressed
    }

    pub fn is_click(&self) -> bool {
        self.keys.iter().any(|k| k == CLICK_KEY)
    }

    /// Ask the host to skip its default handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        let key = match event.code {
            KeyCode::Char(' ') => Some("space".to_string()),
            KeyCode::Char(c) if c.is_ascii_punctuation() => {
                let symbol = c.to_string();
                match unshifted_symbol(&symbol) {
                    Some(base) => {
                        modifiers |= KeyModifiers::SHIFT;
                        Some(base.to_string())
                    }
                    None => {
                        // The symbol already reflects shift
                        modifiers.remove(KeyModifiers::SHIFT);
                        Some(symbol)
                    }
                }
            }
            KeyCode::Char(c) => Some(c.to_lowercase().collect()),
            KeyCode::Enter => Some("enter".to_string()),
            KeyCode::Esc => Some("escape".to_string()),
            KeyCode::Backspace => Some("backspace".to_string()),
            KeyCode::Delete => Some("delete".to_string()),
            KeyCode::Insert => Some("insert".to_string()),
            KeyCode::Tab => Some("tab".to_string()),
            KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                Some("tab".to_string())
            }
            KeyCode::Home => Some("home".to_string()),
            KeyCode::End => Some("end".to_string()),
            KeyCode::PageUp => Some("pageup".to_string()),
            KeyCode::PageDown => Some("pagedown".to_string()),
            KeyCode::Up => Some("up".to_string()),
            KeyCode::Down => Some("down".to_string()),
            KeyCode::Left => Some("left".to_string()),
            KeyCode::Right => Some("right".to_string()),
            KeyCode::F(n) => Some(format!("f{n}")),
            _ => None,
        };

        Self {
            meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            control: modifiers.contains(KeyModifiers::CONTROL),
            alt: modifiers.contains(KeyModifiers::ALT),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            keys: key.into_iter().collect(),
            phase: match event.kind {
                KeyEventKind::Release => KeyPhase::Up,
                KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Down,
            },
            scope: None,
            default_prevented: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn combination_orders_modifiers() {
        let press = KeyPress::down("K").with_shift().with_meta().with_alt().with_control();
        assert_eq!(press.combination(), "meta+control+alt+shift+k");
        assert_eq!(KeyPress::down("escape").combination(), "escape");
    }

    #[test]
    fn detects_click() {
        assert!(KeyPress::down("click").is_click());
        assert!(!KeyPress::down("c").is_click());
    }

    #[test]
    fn prevent_default_is_sticky() {
        let mut press = KeyPress::down("k");
        assert!(!press.is_default_prevented());
        press.prevent_default();
        assert!(press.is_default_prevented());
    }

    #[test]
    fn from_crossterm_char_with_modifiers() {
        let event = KeyEvent::new(
            KeyCode::Char('I'),
            KeyModifiers::ALT | KeyModifiers::SHIFT,
        );
        let press = KeyPress::from(event);
        assert_eq!(press.combination(), "alt+shift+i");
        assert_eq!(press.phase, KeyPhase::Down);
    }

    #[test]
    fn from_crossterm_super_is_meta() {
        let press = KeyPress::from(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER));
        assert_eq!(press.combination(), "meta+k");
    }

    #[test]
    fn from_crossterm_named_keys() {
        let cases = [
            (KeyCode::Esc, "escape"),
            (KeyCode::Enter, "enter"),
            (KeyCode::Char(' '), "space"),
            (KeyCode::F(5), "f5"),
            (KeyCode::PageDown, "pagedown"),
        ];
        for (code, expected) in cases {
            let press = KeyPress::from(KeyEvent::new(code, KeyModifiers::NONE));
            assert_eq!(press.combination(), expected);
        }

        let press = KeyPress::from(KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE));
        assert_eq!(press.combination(), "shift+tab");
    }

    #[test]
    fn from_crossterm_shifted_symbols() {
        for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
            let hash = KeyPress::from(KeyEvent::new(KeyCode::Char('#'), modifiers));
            assert_eq!(hash.combination(), "shift+3");

            let bang = KeyPress::from(KeyEvent::new(KeyCode::Char('!'), modifiers));
            assert_eq!(bang.combination(), "shift+1");

            let question = KeyPress::from(KeyEvent::new(KeyCode::Char('?'), modifiers));
            assert_eq!(question.combination(), "?");
        }

        let slash = KeyPress::from(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::CONTROL));
        assert_eq!(slash.combination(), "control+/");
    }

    #[test]
    fn from_crossterm_release_is_up() {
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(KeyPress::from(event).phase, KeyPhase::Up);
    }
}
