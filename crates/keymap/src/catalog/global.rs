//! Global scope defaults.

use mailkeys_config::GlobalAction;

use super::DefaultBinding;

pub(super) fn bindings() -> Vec<DefaultBinding> {
    use GlobalAction::*;

    vec![
        DefaultBinding {
            action: NewEmail.into(),
            keys: &["c"],
            description: "Compose a new email",
            prevent_default: false,
        },
        DefaultBinding {
            action: CommandPalette.into(),
            keys: &["mod", "k"],
            description: "Open the command palette",
            prevent_default: true,
        },
        DefaultBinding {
            action: ClearAllFilters.into(),
            keys: &["mod", "shift", "f"],
            description: "Clear all filters",
            prevent_default: true,
        },
        DefaultBinding {
            action: UndoLastAction.into(),
            keys: &["mod", "z"],
            description: "Undo the last action",
            prevent_default: true,
        },
    ]
}
