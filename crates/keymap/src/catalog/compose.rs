//! Compose scope defaults.

use mailkeys_config::ComposeAction;

use super::DefaultBinding;

pub(super) fn bindings() -> Vec<DefaultBinding> {
    vec![DefaultBinding {
        action: ComposeAction::CloseCompose.into(),
        keys: &["escape"],
        description: "Close the composer",
        prevent_default: false,
    }]
}
