//! mailkeys - command-line tool for web-mail keyboard shortcuts.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - List, edit and reset shortcut overrides via the shared client library.
//! - Show host-specific key notation and watch live key presses.
//!
//! Does NOT handle:
//! - Catalog, resolution or dispatch logic (see `crates/keymap`).
//! - Remote protocol details (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - `watch` logs to a file; every other command logs to stderr.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;

use args::{Cli, Commands};
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use mailkeys_config::{ConfigError, ConfigLoader, HostSignals};
use tracing_appender::non_blocking;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    // Raw mode garbles stderr output, so `watch` logs to a daily file instead.
    // The guard must live for the entire main() duration to flush logs.
    let log_guard = if matches!(cli.command, Commands::Watch { .. }) {
        let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "mailkeys.log");
        let (writer, guard) = non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    };

    let mut signals = HostSignals::from_env();
    if let Some(platform) = cli.platform {
        signals.platform_override = Some(platform);
    }
    if let Some(layout) = cli.layout {
        signals.layout_override = Some(layout);
    }

    // `watch` uses credentials when present and falls back to the defaults otherwise
    let needs_real_config = matches!(
        cli.command,
        Commands::List {
            defaults: false,
            ..
        } | Commands::Set { .. }
            | Commands::Reset
    );
    let wants_real_config = needs_real_config || matches!(cli.command, Commands::Watch { .. });

    let config_context = if wants_real_config {
        match build_config(&cli, signals.clone()) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(ConfigError::MissingAuth) if !needs_real_config => {
                ConfigCommandContext::Placeholder(signals)
            }
            Err(e) => {
                eprintln!("Failed to build configuration: {:#}", e);
                let exit_code = anyhow::Error::new(e).exit_code();
                std::process::exit(exit_code.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Placeholder(signals)
    };

    // Create cancellation token and set up signal handling
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    // Flush buffered log lines before exiting; process::exit skips destructors
    drop(log_guard);

    std::process::exit(exit_code.as_i32());
}

/// Environment first, then CLI flags (highest priority).
fn build_config(cli: &Cli, signals: HostSignals) -> Result<mailkeys_config::Config, ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref token) = cli.api_token {
        loader = loader.with_api_token(token.clone());
    }
    if let Some(ref cookie) = cli.session_cookie {
        loader = loader.with_session_cookie(cookie.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(ttl_secs) = cli.cache_ttl {
        loader = loader.with_cache_ttl(std::time::Duration::from_secs(ttl_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader.with_host_signals(signals).build()
}
