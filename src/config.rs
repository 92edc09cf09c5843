//! Server configuration.

use clap::Parser;
use std::path::PathBuf;

/// Default email for the bootstrap administrator account.
pub const DEFAULT_ADMIN_EMAIL: &str = "studio@localhost";

/// Default access key for the bootstrap administrator account.
pub const DEFAULT_ADMIN_KEY: &str = "c3R1ZGlvLWRldi1hZG1pbi1rZXk=";

/// Default secret used to sign session tokens. Development only.
pub const DEFAULT_SESSION_SECRET: &str = "studio-dev-session-secret-do-not-use-in-production";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8620;

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound callers may request via `per_page`.
pub const MAX_PAGE_SIZE: u64 = 50;

/// Maximum accepted image upload size in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Session token lifetime in hours.
pub const SESSION_TTL_HOURS: i64 = 12;

/// Invitation lifetime in days.
pub const INVITE_TTL_DAYS: i64 = 7;

/// Command-line arguments for the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "studio-rs")]
#[command(about = "Booking and administration server for a yoga and wellness studio")]
#[command(version)]
pub struct Args {
    /// Host address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Location for uploaded image data (in-memory when omitted).
    #[arg(long, short = 'l')]
    pub location: Option<PathBuf>,

    /// Items per listing page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Email of the bootstrap administrator account.
    #[arg(long, default_value = DEFAULT_ADMIN_EMAIL)]
    pub admin_email: String,

    /// Access key of the bootstrap administrator account.
    #[arg(long, default_value = DEFAULT_ADMIN_KEY)]
    pub admin_key: String,

    /// Secret used to sign session tokens.
    #[arg(long, default_value = DEFAULT_SESSION_SECRET)]
    pub session_secret: String,

    /// In-memory mode (no persistence).
    #[arg(long)]
    pub in_memory: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Enable silent mode (minimal logging).
    #[arg(long, short = 's')]
    pub silent: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            location: None,
            page_size: DEFAULT_PAGE_SIZE,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            in_memory: true,
            debug: false,
            silent: false,
        }
    }
}

/// Server configuration derived from command-line arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Location for uploaded image data.
    pub location: Option<PathBuf>,
    /// Items per listing page.
    pub page_size: u64,
    /// Secret used to sign session tokens.
    pub session_secret: String,
    /// In-memory mode (no persistence).
    pub in_memory: bool,
    /// Enable debug logging.
    pub debug: bool,
    /// Bootstrap administrator accounts.
    pub accounts: Vec<AccountConfig>,
}

/// Administrator account configuration.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub email: String,
    pub key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            location: None,
            page_size: DEFAULT_PAGE_SIZE,
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            in_memory: true,
            debug: false,
            accounts: vec![AccountConfig {
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                key: DEFAULT_ADMIN_KEY.to_string(),
            }],
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let in_memory = args.in_memory || args.location.is_none();
        Self {
            host: args.host,
            port: args.port,
            location: args.location,
            page_size: args.page_size.max(1),
            session_secret: args.session_secret,
            in_memory,
            debug: args.debug,
            accounts: vec![AccountConfig {
                email: args.admin_email,
                key: args.admin_key,
            }],
        }
    }
}

impl Config {
    /// Returns the access key for the given account email.
    pub fn get_account_key(&self, email: &str) -> Option<&str> {
        self.accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.key.as_str())
    }

    /// Returns the bind address for the server.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
