//! Shortcut scopes and the closed action set of each scope.
//!
//! Responsibilities:
//! - Define the activation scopes (`Scope`).
//! - Define one action enum per scope and the `ShortcutAction` union over them.
//! - Convert between typed actions and their wire names.
//!
//! Does NOT handle:
//! - Default key bindings (see the keymap crate's catalog).
//! - Handler invocation (see the keymap crate's dispatcher).
//!
//! Invariants:
//! - Wire names are camelCase and unique within a scope.
//! - Declaration order is the dispatch order when several handlers share a combination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named activation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Always-on application shortcuts
    Global,
    /// Shortcuts live while the composer is open
    Compose,
    /// Mailbox navigation shortcuts
    Navigation,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Global, Scope::Compose, Scope::Navigation];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Compose => "compose",
            Self::Navigation => "navigation",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("unknown scope '{s}'"))
    }
}

/// An action enum bound to exactly one scope.
pub trait ScopedAction:
    Copy + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The scope every variant belongs to.
    const SCOPE: Scope;

    /// All variants, in declaration order.
    fn all() -> &'static [Self];

    /// Wire name of the action.
    fn name(self) -> &'static str;

    /// Look up an action by wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|a| a.name() == name)
    }
}

/// Actions available in every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlobalAction {
    /// Open the composer
    NewEmail,
    /// Open the command palette
    CommandPalette,
    /// Clear every active mailbox filter
    ClearAllFilters,
    /// Undo the last optimistic mail action
    UndoLastAction,
}

impl ScopedAction for GlobalAction {
    const SCOPE: Scope = Scope::Global;

    fn all() -> &'static [Self] {
        &[
            Self::NewEmail,
            Self::CommandPalette,
            Self::ClearAllFilters,
            Self::UndoLastAction,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            Self::NewEmail => "newEmail",
            Self::CommandPalette => "commandPalette",
            Self::ClearAllFilters => "clearAllFilters",
            Self::UndoLastAction => "undoLastAction",
        }
    }
}

/// Actions available while composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComposeAction {
    /// Close the composer
    CloseCompose,
}

impl ScopedAction for ComposeAction {
    const SCOPE: Scope = Scope::Compose;

    fn all() -> &'static [Self] {
        &[Self::CloseCompose]
    }

    fn name(self) -> &'static str {
        match self {
            Self::CloseCompose => "closeCompose",
        }
    }
}

/// Actions that move between mailboxes and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationAction {
    GoToDrafts,
    Inbox,
    SentMail,
    GoToArchive,
    GoToBin,
    GoToSettings,
    HelpWithShortcuts,
}

impl NavigationAction {
    /// Route the host navigates to for this action.
    pub fn route(self) -> &'static str {
        match self {
            Self::GoToDrafts => "/mail/draft",
            Self::Inbox => "/mail/inbox",
            Self::SentMail => "/mail/sent",
            Self::GoToArchive => "/mail/archive",
            Self::GoToBin => "/mail/bin",
            Self::GoToSettings => "/settings",
            Self::HelpWithShortcuts => "/settings/shortcuts",
        }
    }
}

impl ScopedAction for NavigationAction {
    const SCOPE: Scope = Scope::Navigation;

    fn all() -> &'static [Self] {
        &[
            Self::GoToDrafts,
            Self::Inbox,
            Self::SentMail,
            Self::GoToArchive,
            Self::GoToBin,
            Self::GoToSettings,
            Self::HelpWithShortcuts,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            Self::GoToDrafts => "goToDrafts",
            Self::Inbox => "inbox",
            Self::SentMail => "sentMail",
            Self::GoToArchive => "goToArchive",
            Self::GoToBin => "goToBin",
            Self::GoToSettings => "goToSettings",
            Self::HelpWithShortcuts => "helpWithShortcuts",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.name())
                }
            }
        )+
    };
}

display_by_name!(GlobalAction, ComposeAction, NavigationAction);

/// Any known action, tagged with its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShortcutAction {
    Global(GlobalAction),
    Compose(ComposeAction),
    Navigation(NavigationAction),
}

impl ShortcutAction {
    /// Parse a wire name within a scope.
    pub fn parse(scope: Scope, name: &str) -> Option<Self> {
        match scope {
            Scope::Global => GlobalAction::from_name(name).map(Self::Global),
            Scope::Compose => ComposeAction::from_name(name).map(Self::Compose),
            Scope::Navigation => NavigationAction::from_name(name).map(Self::Navigation),
        }
    }

    /// Find an action by wire name in any scope.
    pub fn find(name: &str) -> Option<Self> {
        Scope::ALL
            .into_iter()
            .find_map(|scope| Self::parse(scope, name))
    }

    pub fn scope(self) -> Scope {
        match self {
            Self::Global(_) => Scope::Global,
            Self::Compose(_) => Scope::Compose,
            Self::Navigation(_) => Scope::Navigation,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Global(a) => a.name(),
            Self::Compose(a) => a.name(),
            Self::Navigation(a) => a.name(),
        }
    }

    /// Every known action across all scopes.
    pub fn all() -> impl Iterator<Item = ShortcutAction> {
        GlobalAction::all()
            .iter()
            .copied()
            .map(Self::from)
            .chain(ComposeAction::all().iter().copied().map(Self::from))
            .chain(NavigationAction::all().iter().copied().map(Self::from))
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<GlobalAction> for ShortcutAction {
    fn from(action: GlobalAction) -> Self {
        Self::Global(action)
    }
}

impl From<ComposeAction> for ShortcutAction {
    fn from(action: ComposeAction) -> Self {
        Self::Compose(action)
    }
}

impl From<NavigationAction> for ShortcutAction {
    fn from(action: NavigationAction) -> Self {
        Self::Navigation(action)
    }
}
