//! Key token notation: canonical combination strings and display glyphs.
//!
//! Responsibilities:
//! - Normalize a token sequence (`["mod", "k"]`) into the combination string used
//!   for equality matching (`"meta+k"` / `"control+k"`).
//! - Render a token sequence as human-readable labels (`["⌘", "K"]`).
//! - Parse human-typed combinations (`"Ctrl+Shift+k"`) into stored tokens.
//!
//! Does NOT handle:
//! - Host detection (see `host`).
//! - Runtime key event matching (see the keymap crate).
//!
//! Invariants:
//! - Tokens are authored as standard-layout key positions; the layout remap is applied
//!   in that one direction by both `normalize` and `display_form`.
//! - `normalize` of an empty sequence is the empty string.

use std::fmt;

use thiserror::Error;

use crate::host::{Host, HostPlatform, KeyboardLayout};

/// Errors that can occur when parsing a human-typed key combination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeybindError {
    /// Nothing to parse
    #[error("Key combination is empty")]
    Empty,

    /// Invalid key syntax
    #[error("Invalid key syntax: '{key}'. Expected format like 'k', 'Mod+k', 'Shift+Escape', 'F1'")]
    InvalidSyntax {
        /// The invalid key string
        key: String,
    },

    /// Unknown key name
    #[error("Unknown key name: '{name}'")]
    UnknownKey {
        /// The unknown key name
        name: String,
    },

    /// The same modifier appears twice
    #[error("Modifier '{name}' appears more than once in '{key}'")]
    DuplicateModifier {
        /// The repeated modifier
        name: String,
        /// The full combination string
        key: String,
    },
}

/// Modifier tokens in the order the dispatcher reports them.
const MODIFIER_ORDER: &[&str] = &["meta", "mod", "control", "alt", "shift"];

/// Shifted symbols that normalize as `shift+<base key>`.
const SHIFTED_SYMBOLS: &[(&str, &str)] = &[("#", "3"), ("!", "1")];

/// The base key of a symbol that normalizes as `shift+<base>`, e.g. `#` to `3`.
pub fn unshifted_symbol(symbol: &str) -> Option<&'static str> {
    SHIFTED_SYMBOLS
        .iter()
        .find(|(shifted, _)| *shifted == symbol)
        .map(|(_, base)| *base)
}

/// Named (multi-character) keys accepted by the parser.
const NAMED_KEYS: &[&str] = &[
    "escape",
    "enter",
    "space",
    "tab",
    "backspace",
    "delete",
    "insert",
    "home",
    "end",
    "pageup",
    "pagedown",
    "up",
    "down",
    "left",
    "right",
    "click",
];

/// Translates key tokens for a specific host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyNotation {
    host: Host,
}

impl KeyNotation {
    pub fn new(host: Host) -> Self {
        Self { host }
    }

    /// Notation for the process-wide detected host.
    pub fn current() -> Self {
        Self::new(Host::current())
    }

    pub fn host(&self) -> Host {
        self.host
    }

    /// Normalize a token sequence into its canonical combination string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailkeys_config::host::{Host, HostPlatform, KeyboardLayout};
    /// use mailkeys_config::notation::KeyNotation;
    ///
    /// let mac = KeyNotation::new(Host::new(HostPlatform::Apple, KeyboardLayout::Standard));
    /// assert_eq!(mac.normalize(&["mod", "k"]), "meta+k");
    ///
    /// let pc = KeyNotation::new(Host::new(HostPlatform::Other, KeyboardLayout::Standard));
    /// assert_eq!(pc.normalize(&["mod", "k"]), "control+k");
    /// assert_eq!(pc.normalize(&["#"]), "shift+3");
    /// ```
    pub fn normalize<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        match tokens {
            [] => String::new(),
            [single] => self.normalize_token(single.as_ref()),
            many => many
                .iter()
                .map(|t| self.normalize_token(t.as_ref()))
                .collect::<Vec<_>>()
                .join("+"),
        }
    }

    fn normalize_token(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        let mapped = self.remap(&lower);

        if let Some(base) = unshifted_symbol(mapped) {
            return format!("shift+{base}");
        }
        match mapped {
            "mod" => self.mod_name().to_string(),
            "⌘" => "meta".to_string(),
            other => other.to_string(),
        }
    }

    /// Render each token as a human-readable label.
    pub fn display_form<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| self.display_token(t.as_ref()))
            .collect()
    }

    fn display_token(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        let mapped = self.remap(&lower);
        let apple = self.host.platform.is_apple();

        let label = match mapped {
            "mod" if apple => "⌘",
            "mod" => "Ctrl",
            "meta" => "⌘",
            "control" => "Ctrl",
            "shift" => "⇧",
            "alt" if apple => "⌥",
            "alt" => "Alt",
            "enter" => "↵",
            "escape" => "Esc",
            "backspace" => "⌫",
            "delete" => "⌦",
            "space" => "Space",
            "click" => "Click",
            other if other.chars().count() == 1 => return other.to_uppercase(),
            _ => return token.to_string(),
        };
        label.to_string()
    }

    /// Render a token sequence as a single string (`⌘+K`).
    pub fn display_string<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        self.display_form(tokens).join("+")
    }

    /// Map a key typed on this host's layout back to its standard position.
    ///
    /// Used when recording a pressed key into stored tokens.
    pub fn to_standard_token(&self, typed: &str) -> String {
        let lower = typed.to_lowercase();
        self.host
            .layout
            .to_standard(&lower)
            .map(str::to_string)
            .unwrap_or(lower)
    }

    fn remap<'a>(&self, token: &'a str) -> &'a str {
        match self.host.layout {
            KeyboardLayout::Standard => token,
            layout => layout.to_layout(token).unwrap_or(token),
        }
    }

    fn mod_name(&self) -> &'static str {
        match self.host.platform {
            HostPlatform::Apple => "meta",
            HostPlatform::Other => "control",
        }
    }
}

/// A parsed key combination, held as stored tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    tokens: Vec<String>,
}

impl KeyCombination {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join("+"))
    }
}

/// Parse a combination string like `"Mod+k"`, `"Shift+Escape"` or `"#"` into stored tokens.
///
/// Modifiers are emitted in dispatch order (meta, mod, control, alt, shift) followed by
/// exactly one key.
///
/// # Examples
///
/// ```
/// use mailkeys_config::notation::parse_combination;
///
/// let combo = parse_combination("Ctrl+Shift+K").unwrap();
/// assert_eq!(combo.tokens(), ["control", "shift", "k"]);
///
/// let combo = parse_combination("cmd+/").unwrap();
/// assert_eq!(combo.tokens(), ["meta", "/"]);
/// ```
pub fn parse_combination(input: &str) -> Result<KeyCombination, KeybindError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(KeybindError::Empty);
    }

    let parts = split_combination(input);
    let mut modifiers: Vec<&'static str> = Vec::new();
    let mut key: Option<String> = None;

    for part in parts {
        if let Some(modifier) = modifier_token(part) {
            if modifiers.contains(&modifier) {
                return Err(KeybindError::DuplicateModifier {
                    name: modifier.to_string(),
                    key: input.to_string(),
                });
            }
            modifiers.push(modifier);
            continue;
        }

        if key.is_some() {
            // Multiple non-modifier parts is invalid
            return Err(KeybindError::InvalidSyntax {
                key: input.to_string(),
            });
        }
        key = Some(key_token(part)?);
    }

    let Some(key) = key else {
        return Err(KeybindError::InvalidSyntax {
            key: input.to_string(),
        });
    };

    modifiers.sort_by_key(|m| MODIFIER_ORDER.iter().position(|o| o == m));
    let mut tokens: Vec<String> = modifiers.into_iter().map(str::to_string).collect();
    tokens.push(key);

    Ok(KeyCombination { tokens })
}

/// Split on `+`, treating a trailing `+` (as in `"shift++"`) as the plus key.
fn split_combination(input: &str) -> Vec<&str> {
    if input == "+" {
        return vec!["+"];
    }
    let mut parts: Vec<&str> = input.split('+').map(str::trim).collect();
    if input.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("+");
    }
    parts
}

fn modifier_token(part: &str) -> Option<&'static str> {
    match part.to_lowercase().as_str() {
        "mod" => Some("mod"),
        "meta" | "cmd" | "command" | "super" | "⌘" => Some("meta"),
        "ctrl" | "control" | "ctl" => Some("control"),
        "alt" | "opt" | "option" | "⌥" => Some("alt"),
        "shift" | "⇧" => Some("shift"),
        _ => None,
    }
}

fn key_token(part: &str) -> Result<String, KeybindError> {
    if part.is_empty() {
        return Err(KeybindError::InvalidSyntax {
            key: part.to_string(),
        });
    }

    let lower = part.to_lowercase();
    let canonical = match lower.as_str() {
        "esc" => "escape",
        "return" => "enter",
        "del" => "delete",
        "ins" => "insert",
        "pgup" | "page_up" => "pageup",
        "pgdn" | "page_down" => "pagedown",
        "↵" => "enter",
        other => other,
    };

    if canonical.chars().count() == 1 || NAMED_KEYS.contains(&canonical) {
        return Ok(canonical.to_string());
    }

    // Function keys F1-F20
    if let Some(num) = canonical.strip_prefix('f')
        && let Ok(n) = num.parse::<u8>()
        && (1..=20).contains(&n)
    {
        return Ok(canonical.to_string());
    }

    Err(KeybindError::UnknownKey {
        name: part.to_string(),
    })
}
