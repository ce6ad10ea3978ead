//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not handle config loading (see `main()` and `config_context`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mailkeys_config::constants::DEFAULT_LOG_DIR;
use mailkeys_config::{HostPlatform, KeyboardLayout, Scope};

#[derive(Parser)]
#[command(name = "mailkeys")]
#[command(about = "Inspect and edit web-mail keyboard shortcuts", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  mailkeys list --scope navigation\n  mailkeys set inbox mod+i\n  mailkeys set commandPalette mod+p --prevent-default\n  mailkeys normalize mod shift f --display\n  mailkeys watch --scope global\n  mailkeys reset\n"
)]
pub struct Cli {
    /// Base URL of the mail server (e.g., https://mail.example.com)
    #[arg(short, long, global = true, env = "MAILKEYS_BASE_URL")]
    pub base_url: Option<String>,

    /// API token for bearer authentication (preferred over a session cookie)
    #[arg(short, long, global = true, env = "MAILKEYS_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Browser session cookie value
    #[arg(long, global = true, env = "MAILKEYS_SESSION_COOKIE", hide_env_values = true)]
    pub session_cookie: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MAILKEYS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for throttled or unavailable responses
    #[arg(long, global = true, env = "MAILKEYS_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Seconds a fetched override set stays cached
    #[arg(long, global = true, env = "MAILKEYS_CACHE_TTL_SECONDS", value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "MAILKEYS_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Treat the host as this platform instead of detecting it (apple, other)
    #[arg(long, global = true, env = "MAILKEYS_PLATFORM")]
    pub platform: Option<HostPlatform>,

    /// Treat the keyboard as this layout instead of detecting it (standard, dvorak)
    #[arg(long, global = true, env = "MAILKEYS_LAYOUT")]
    pub layout: Option<KeyboardLayout>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Directory for log files written by `watch`
    #[arg(long, global = true, default_value = DEFAULT_LOG_DIR, value_name = "DIR")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List effective shortcuts (defaults merged with your overrides)
    List {
        /// Only show shortcuts in this scope (global, compose, navigation)
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Show the compiled-in defaults without contacting the server
        #[arg(long)]
        defaults: bool,
    },

    /// Bind an action to a new key combination
    Set {
        /// Action name (e.g., inbox, commandPalette)
        #[arg(value_name = "ACTION")]
        action: String,

        /// Key combination (e.g., mod+i, shift+3, escape)
        #[arg(value_name = "COMBINATION")]
        combination: String,

        /// Suppress the host's default handling when the shortcut fires
        #[arg(long)]
        prevent_default: bool,
    },

    /// Remove all overrides and return to the defaults
    Reset,

    /// Show the canonical combination string for a key token sequence
    Normalize {
        /// Key tokens as stored (e.g., mod shift f)
        #[arg(value_name = "TOKENS", required = true, num_args = 1..)]
        tokens: Vec<String>,

        /// Print the display form (⌘, ⇧, ...) instead of the match string
        #[arg(long)]
        display: bool,
    },

    /// Read key presses and report which shortcut each one fires
    Watch {
        /// Activation scope to listen in
        #[arg(short, long, default_value = "global")]
        scope: Scope,
    },
}
