//! Host platform and keyboard layout detection.
//!
//! Responsibilities:
//! - Collect the signals that identify the host (user agent, navigator platform,
//!   touch points, language tags) from configuration or the process locale.
//! - Decide whether the host is an Apple platform and whether it types on a
//!   Dvorak layout.
//! - Own the standard-position to Dvorak substitution table and its inverse.
//!
//! Does NOT handle:
//! - Turning key tokens into combination strings (see `notation`).
//! - Live re-detection; the process-wide host is detected once.
//!
//! Invariants:
//! - Explicit overrides (`MAILKEYS_PLATFORM`, `MAILKEYS_LAYOUT`) always win over signals.
//! - `DVORAK_POSITIONS` is a bijection, so `to_standard(to_layout(k)) == k` for every mapped key.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::constants::{DVORAK_LANGUAGE_TAG, MAC_INTEL_PLATFORM};
use crate::loader::env_var_or_none;

/// Platform family of the host, as far as shortcut rendering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostPlatform {
    /// macOS, iPadOS and friends: `mod` means Command.
    Apple,
    /// Everything else: `mod` means Control.
    #[default]
    Other,
}

impl HostPlatform {
    /// Detect the platform from raw host signals.
    pub fn detect(signals: &HostSignals) -> Self {
        if let Some(platform) = signals.platform_override {
            return platform;
        }

        let has_browser_signals =
            signals.user_agent.is_some() || signals.navigator_platform.is_some();
        if !has_browser_signals {
            return if matches!(signals.target_os.as_str(), "macos" | "ios") {
                Self::Apple
            } else {
                Self::Other
            };
        }

        let ua_is_mac = signals.user_agent.as_deref().is_some_and(|ua| {
            let ua = ua.to_ascii_lowercase();
            ua.contains("macintosh") || ua.contains("mac os x")
        });
        let touch_mac = signals.navigator_platform.as_deref() == Some(MAC_INTEL_PLATFORM)
            && signals.max_touch_points > 1;

        if ua_is_mac || touch_mac {
            Self::Apple
        } else {
            Self::Other
        }
    }

    pub fn is_apple(self) -> bool {
        matches!(self, Self::Apple)
    }
}

impl FromStr for HostPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" | "mac" | "macos" | "darwin" => Ok(Self::Apple),
            "other" | "linux" | "windows" | "pc" => Ok(Self::Other),
            other => Err(format!(
                "unknown platform '{other}' (expected 'apple' or 'other')"
            )),
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apple => write!(f, "apple"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Standard (QWERTY) key position paired with the character US Dvorak produces there.
const DVORAK_POSITIONS: &[(&str, &str)] = &[
    ("q", "'"),
    ("w", ","),
    ("e", "."),
    ("r", "p"),
    ("t", "y"),
    ("y", "f"),
    ("u", "g"),
    ("i", "c"),
    ("o", "r"),
    ("p", "l"),
    ("[", "/"),
    ("]", "="),
    ("a", "a"),
    ("s", "o"),
    ("d", "e"),
    ("f", "u"),
    ("g", "i"),
    ("h", "d"),
    ("j", "h"),
    ("k", "t"),
    ("l", "n"),
    (";", "s"),
    ("'", "-"),
    ("z", ";"),
    ("x", "q"),
    ("c", "j"),
    ("v", "k"),
    ("b", "x"),
    ("n", "b"),
    ("m", "m"),
    (",", "w"),
    (".", "v"),
    ("/", "z"),
    ("-", "["),
    ("=", "]"),
];

/// Keyboard layout the host types with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardLayout {
    /// QWERTY; tokens are used as authored.
    #[default]
    Standard,
    /// US Dvorak; standard key positions are remapped.
    Dvorak,
}

impl KeyboardLayout {
    /// Detect the layout from raw host signals.
    pub fn detect(signals: &HostSignals) -> Self {
        if let Some(layout) = signals.layout_override {
            return layout;
        }
        if signals
            .languages
            .iter()
            .any(|lang| lang.eq_ignore_ascii_case(DVORAK_LANGUAGE_TAG))
        {
            Self::Dvorak
        } else {
            Self::Standard
        }
    }

    /// Map a standard-layout key position to the character this layout produces there.
    ///
    /// Returns `None` for keys the layout leaves in place (or does not know).
    pub fn to_layout(self, standard: &str) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Dvorak => DVORAK_POSITIONS
                .iter()
                .find(|(std_key, _)| *std_key == standard)
                .map(|(_, dvorak)| *dvorak),
        }
    }

    /// Inverse of [`KeyboardLayout::to_layout`]: recover the standard key position
    /// for a character typed on this layout.
    pub fn to_standard(self, typed: &str) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Dvorak => DVORAK_POSITIONS
                .iter()
                .find(|(_, dvorak)| *dvorak == typed)
                .map(|(std_key, _)| *std_key),
        }
    }
}

impl FromStr for KeyboardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "qwerty" => Ok(Self::Standard),
            "dvorak" | "en-dv" => Ok(Self::Dvorak),
            other => Err(format!(
                "unknown keyboard layout '{other}' (expected 'standard' or 'dvorak')"
            )),
        }
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Dvorak => write!(f, "dvorak"),
        }
    }
}

/// Raw signals used to detect the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSignals {
    /// Browser-style user agent string, if known.
    pub user_agent: Option<String>,
    /// Navigator platform string (e.g. `MacIntel`), if known.
    pub navigator_platform: Option<String>,
    /// Number of simultaneous touch points the host supports.
    pub max_touch_points: u32,
    /// Language tags in BCP-47 form (`en-DV`, `en-US`).
    pub languages: Vec<String>,
    /// Compile-time target OS, used when no browser signals are present.
    pub target_os: String,
    /// Explicit platform, bypassing detection.
    pub platform_override: Option<HostPlatform>,
    /// Explicit layout, bypassing detection.
    pub layout_override: Option<KeyboardLayout>,
}

impl Default for HostSignals {
    fn default() -> Self {
        Self {
            user_agent: None,
            navigator_platform: None,
            max_touch_points: 0,
            languages: Vec::new(),
            target_os: std::env::consts::OS.to_string(),
            platform_override: None,
            layout_override: None,
        }
    }
}

impl HostSignals {
    /// Collect signals from `MAILKEYS_*` variables and the process locale.
    ///
    /// Unparseable overrides are logged and ignored so a typo never blocks startup.
    pub fn from_env() -> Self {
        let languages = match env_var_or_none("MAILKEYS_LANGUAGES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(locale_to_language_tag)
                .collect(),
            None => locale_languages(),
        };

        let max_touch_points = env_var_or_none("MAILKEYS_MAX_TOUCH_POINTS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let platform_override = env_var_or_none("MAILKEYS_PLATFORM").and_then(|v| {
            v.parse()
                .map_err(|e| tracing::warn!("Ignoring MAILKEYS_PLATFORM: {}", e))
                .ok()
        });
        let layout_override = env_var_or_none("MAILKEYS_LAYOUT").and_then(|v| {
            v.parse()
                .map_err(|e| tracing::warn!("Ignoring MAILKEYS_LAYOUT: {}", e))
                .ok()
        });

        Self {
            user_agent: env_var_or_none("MAILKEYS_USER_AGENT"),
            navigator_platform: env_var_or_none("MAILKEYS_NAVIGATOR_PLATFORM"),
            max_touch_points,
            languages,
            platform_override,
            layout_override,
            ..Self::default()
        }
    }
}

/// Language tags from the POSIX locale variables, most specific first.
fn locale_languages() -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(language) = env_var_or_none("LANGUAGE") {
        tags.extend(
            language
                .split(':')
                .filter(|s| !s.is_empty())
                .map(locale_to_language_tag),
        );
    }
    for key in ["LC_ALL", "LANG"] {
        if let Some(value) = env_var_or_none(key) {
            tags.push(locale_to_language_tag(&value));
        }
    }
    tags
}

/// `en_DV.UTF-8` -> `en-DV`.
fn locale_to_language_tag(locale: &str) -> String {
    let base = locale.split(['.', '@']).next().unwrap_or(locale);
    base.replace('_', "-")
}

/// Resolved host: what the notation layer actually needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Host {
    pub platform: HostPlatform,
    pub layout: KeyboardLayout,
}

impl Host {
    pub fn new(platform: HostPlatform, layout: KeyboardLayout) -> Self {
        Self { platform, layout }
    }

    /// Resolve a host from raw signals.
    pub fn from_signals(signals: &HostSignals) -> Self {
        Self {
            platform: HostPlatform::detect(signals),
            layout: KeyboardLayout::detect(signals),
        }
    }

    /// The process-wide host, detected from the environment on first use.
    pub fn current() -> Self {
        static HOST: OnceLock<Host> = OnceLock::new();
        *HOST.get_or_init(|| {
            let host = Host::from_signals(&HostSignals::from_env());
            tracing::debug!(
                platform = %host.platform,
                layout = %host.layout,
                "Detected shortcut host"
            );
            host
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser(user_agent: &str) -> HostSignals {
        HostSignals {
            user_agent: Some(user_agent.to_string()),
            target_os: "linux".to_string(),
            ..HostSignals::default()
        }
    }

    #[test]
    fn test_detects_mac_user_agent() {
        let signals = browser(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 Safari/605.1.15",
        );
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Apple);
    }

    #[test]
    fn test_detects_windows_user_agent() {
        let signals = browser("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/124.0");
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Other);
    }

    #[test]
    fn test_detects_touch_mac_intel() {
        let mut signals = browser("Mozilla/5.0 (X11; Linux x86_64)");
        signals.navigator_platform = Some("MacIntel".to_string());
        signals.max_touch_points = 5;
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Apple);

        signals.max_touch_points = 1;
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Other);
    }

    #[test]
    fn test_falls_back_to_target_os() {
        let signals = HostSignals {
            target_os: "macos".to_string(),
            ..HostSignals::default()
        };
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Apple);

        let signals = HostSignals {
            target_os: "linux".to_string(),
            ..HostSignals::default()
        };
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Other);
    }

    #[test]
    fn test_platform_override_wins() {
        let mut signals = browser("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4)");
        signals.platform_override = Some(HostPlatform::Other);
        assert_eq!(HostPlatform::detect(&signals), HostPlatform::Other);
    }

    #[test]
    fn test_detects_dvorak_language() {
        let signals = HostSignals {
            languages: vec!["en-US".to_string(), "en-DV".to_string()],
            ..HostSignals::default()
        };
        assert_eq!(KeyboardLayout::detect(&signals), KeyboardLayout::Dvorak);

        let signals = HostSignals {
            languages: vec!["en-US".to_string()],
            ..HostSignals::default()
        };
        assert_eq!(KeyboardLayout::detect(&signals), KeyboardLayout::Standard);
    }

    #[test]
    fn test_locale_to_language_tag() {
        assert_eq!(locale_to_language_tag("en_DV.UTF-8"), "en-DV");
        assert_eq!(locale_to_language_tag("de_DE@euro"), "de-DE");
        assert_eq!(locale_to_language_tag("en-US"), "en-US");
    }

    #[test]
    fn test_dvorak_table_is_bijection() {
        let layout = KeyboardLayout::Dvorak;
        for (standard, dvorak) in DVORAK_POSITIONS {
            assert_eq!(layout.to_layout(standard), Some(*dvorak));
            assert_eq!(layout.to_standard(dvorak), Some(*standard));
        }

        let mut typed: Vec<&str> = DVORAK_POSITIONS.iter().map(|(_, d)| *d).collect();
        typed.sort_unstable();
        typed.dedup();
        assert_eq!(typed.len(), DVORAK_POSITIONS.len());
    }

    #[test]
    fn test_standard_layout_maps_nothing() {
        assert_eq!(KeyboardLayout::Standard.to_layout("k"), None);
        assert_eq!(KeyboardLayout::Standard.to_standard("t"), None);
    }

    #[test]
    fn test_parse_overrides() {
        assert_eq!("macos".parse::<HostPlatform>(), Ok(HostPlatform::Apple));
        assert_eq!("Linux".parse::<HostPlatform>(), Ok(HostPlatform::Other));
        assert!("amiga".parse::<HostPlatform>().is_err());
        assert_eq!("Dvorak".parse::<KeyboardLayout>(), Ok(KeyboardLayout::Dvorak));
        assert!("colemak".parse::<KeyboardLayout>().is_err());
    }
}
