//! Watch command implementation.
//!
//! Responsibilities:
//! - Put the terminal in raw mode and turn key events into `KeyPress` values.
//! - Route each press through a `ScopeRouter` and report the action it fired.
//!
//! Does NOT handle:
//! - Logging setup; `main()` sends logs to a file for this command.
//!
//! Invariants:
//! - Raw mode is always disabled on exit, including on error and panic.
//! - `q` and Ctrl+C stop watching; neither is bound by the catalog.
//! - Ctrl+R re-reads overrides from the server and rebinds every scope.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use tracing::{debug, info, warn};

use mailkeys_client::{SettingsGateway, ShortcutClient};
use mailkeys_config::{
    ComposeAction, GlobalAction, KeyNotation, NavigationAction, Scope, ScopedAction, Shortcut,
    ShortcutAction,
};
use mailkeys_keymap::{
    DispatchOptions, Handler, KeyPhase, KeyPress, ScopeRouter, ScopeSet, ShortcutDispatcher,
    catalog, filter_by_scope,
};

use crate::cancellation::{CancellationToken, run_cancellable};
use crate::config_context::ConfigCommandContext;

/// Restores cooked mode when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored since we're in drop and must not panic
        let _ = disable_raw_mode();
    }
}

pub async fn run(
    config: ConfigCommandContext,
    scope: Scope,
    cancel: &CancellationToken,
) -> Result<()> {
    let notation = super::notation_for(config.host_signals());

    let gateway = match config {
        ConfigCommandContext::Real(config) => Some(super::build_gateway(&config)?),
        ConfigCommandContext::Placeholder(_) => {
            info!("No credentials configured, watching default bindings");
            None
        }
    };
    let effective = load_effective(gateway.as_ref(), cancel).await?;

    let mut router = build_router(&effective, notation)?;
    router.push_scope(scope);

    println!(
        "Watching scope '{}'. Press q or Ctrl+C to stop, Ctrl+R to reload overrides.",
        scope
    );
    for shortcut in filter_by_scope(&effective, scope) {
        println!(
            "  {:<16} {}",
            notation.display_string(&shortcut.keys),
            shortcut.action
        );
    }

    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut reader = EventStream::new();

    loop {
        let event = tokio::select! {
            event = reader.next() => event,
            _ = cancel.cancelled() => break,
        };

        match event {
            Some(Ok(Event::Key(key))) => {
                if is_quit(&key) {
                    break;
                }
                if is_reload(&key) {
                    let Some(gateway) = gateway.as_ref() else {
                        print!("No credentials configured, nothing to reload\r\n");
                        continue;
                    };
                    gateway.invalidate().await;
                    match load_effective(Some(gateway), cancel).await {
                        Ok(effective) => {
                            router.rebind_all(&effective);
                            print!("Reloaded shortcut overrides\r\n");
                        }
                        Err(e) => {
                            warn!("Reload failed: {:#}", e);
                            print!("Reload failed: {:#}\r\n", e);
                        }
                    }
                    continue;
                }
                let mut press = KeyPress::from(key);
                if press.phase == KeyPhase::Up || press.keys.is_empty() {
                    continue;
                }
                let combination = press.combination();
                match router.route(&mut press) {
                    Some(action) => print!("{}\r\n", describe_match(&combination, action, &press)),
                    None => print!("{:<24} (no shortcut)\r\n", combination),
                }
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
            None => break,
        }
    }

    debug!("Stopped watching key presses");
    Ok(())
}

/// Effective bindings from the server, or the defaults without a gateway.
async fn load_effective(
    gateway: Option<&SettingsGateway<ShortcutClient>>,
    cancel: &CancellationToken,
) -> Result<Vec<Shortcut>> {
    let Some(gateway) = gateway else {
        return Ok(catalog::defaults().to_vec());
    };
    run_cancellable(cancel, async {
        gateway
            .effective_bindings(catalog::defaults())
            .await
            .context("Failed to load shortcut overrides")
    })
    .await
}

/// One dispatcher per scope, each bound to its share of the effective set.
fn build_router(effective: &[Shortcut], notation: KeyNotation) -> Result<ScopeRouter> {
    let scopes = ScopeSet::partition(effective);
    for name in scopes
        .scope_names()
        .filter(|name| name.parse::<Scope>().is_err())
    {
        debug!(scope = name, "Ignoring shortcuts for unknown scope");
    }

    let mut router = ScopeRouter::new();
    router.register(ShortcutDispatcher::new(
        scopes.get(Scope::Global),
        logging_handlers::<GlobalAction>(),
        DispatchOptions::new(Scope::Global),
        notation,
    )?);
    router.register(ShortcutDispatcher::new(
        scopes.get(Scope::Compose),
        logging_handlers::<ComposeAction>(),
        DispatchOptions::new(Scope::Compose),
        notation,
    )?);
    router.register(ShortcutDispatcher::new(
        scopes.get(Scope::Navigation),
        logging_handlers::<NavigationAction>(),
        DispatchOptions::new(Scope::Navigation),
        notation,
    )?);
    Ok(router)
}

fn logging_handlers<A: ScopedAction>() -> BTreeMap<A, Handler> {
    A::all()
        .iter()
        .map(|action| {
            let name = action.name();
            let handler: Handler = Box::new(move || info!(action = name, "Shortcut fired"));
            (*action, handler)
        })
        .collect()
}

fn describe_match(combination: &str, action: ShortcutAction, press: &KeyPress) -> String {
    let mut line = format!("{:<24} -> {}", combination, action);
    if let ShortcutAction::Navigation(nav) = action {
        line.push_str(&format!(" ({})", nav.route()));
    }
    if press.is_default_prevented() {
        line.push_str(" [default prevented]");
    }
    line
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => key.modifiers.is_empty(),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn is_reload(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailkeys_config::{Host, HostPlatform, KeyboardLayout};

    fn notation() -> KeyNotation {
        KeyNotation::new(Host::new(HostPlatform::Apple, KeyboardLayout::Standard))
    }

    #[test]
    fn test_router_fires_navigation_default() {
        let mut router = build_router(catalog::defaults(), notation()).unwrap();
        router.push_scope(Scope::Navigation);

        let mut press = KeyPress::down("i").with_alt().with_shift();
        let action = router.route(&mut press);
        assert_eq!(action, Some(NavigationAction::Inbox.into()));
        assert_eq!(
            describe_match("alt+shift+i", NavigationAction::Inbox.into(), &press),
            format!("{:<24} -> inbox (/mail/inbox)", "alt+shift+i")
        );
    }

    #[test]
    fn test_router_ignores_other_scopes() {
        let mut router = build_router(catalog::defaults(), notation()).unwrap();
        router.push_scope(Scope::Compose);

        let mut press = KeyPress::down("c");
        assert_eq!(router.route(&mut press), None);
    }

    #[test]
    fn test_is_quit() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT)));
    }

    #[test]
    fn test_is_reload() {
        assert!(is_reload(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!is_reload(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_rebind_follows_reloaded_overrides() {
        let mut router = build_router(catalog::defaults(), notation()).unwrap();
        router.push_scope(Scope::Navigation);

        let overrides = mailkeys_config::OverrideSet::new(vec![Shortcut::new(
            NavigationAction::Inbox,
            &["mod", "i"],
        )]);
        router.rebind_all(&mailkeys_keymap::resolve(catalog::defaults(), &overrides));

        assert_eq!(
            router.route(&mut KeyPress::down("i").with_meta()),
            Some(NavigationAction::Inbox.into())
        );
        assert_eq!(router.route(&mut KeyPress::down("i").with_alt().with_shift()), None);
    }
}
