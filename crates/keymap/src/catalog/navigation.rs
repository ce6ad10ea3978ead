//! Navigation scope defaults.
//!
//! Folder jumps share the `alt+shift` prefix so they never collide with
//! single-key global shortcuts.

use mailkeys_config::NavigationAction;

use super::DefaultBinding;

pub(super) fn bindings() -> Vec<DefaultBinding> {
    use NavigationAction::*;

    vec![
        DefaultBinding {
            action: GoToDrafts.into(),
            keys: &["alt", "shift", "d"],
            description: "Go to drafts",
            prevent_default: false,
        },
        DefaultBinding {
            action: Inbox.into(),
            keys: &["alt", "shift", "i"],
            description: "Go to inbox",
            prevent_default: false,
        },
        DefaultBinding {
            action: SentMail.into(),
            keys: &["alt", "shift", "t"],
            description: "Go to sent mail",
            prevent_default: false,
        },
        DefaultBinding {
            action: GoToArchive.into(),
            keys: &["alt", "shift", "a"],
            description: "Go to archive",
            prevent_default: false,
        },
        DefaultBinding {
            action: GoToBin.into(),
            keys: &["alt", "shift", "b"],
            description: "Go to bin",
            prevent_default: false,
        },
        DefaultBinding {
            action: GoToSettings.into(),
            keys: &["alt", "shift", "s"],
            description: "Go to settings",
            prevent_default: false,
        },
        DefaultBinding {
            action: HelpWithShortcuts.into(),
            keys: &["mod", "/"],
            description: "Show keyboard shortcuts",
            prevent_default: true,
        },
    ]
}
