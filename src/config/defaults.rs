//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default upstream timeout in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = crate::constants::api::UPSTREAM_TIMEOUT_SECS;

/// Environment variable that overrides the configured Google API key
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "locmatch";
