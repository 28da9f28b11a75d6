//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Mood analysis constants
pub mod analysis {
    /// Mood score substituted whenever analysis fails
    pub const FALLBACK_MOOD_SCORE: i32 = 5;

    /// Summary substituted whenever analysis fails
    pub const FALLBACK_SUMMARY: &str = "AI is taking a nap, but your entry is saved.";

    /// Lowest mood score the model may return
    pub const MIN_MOOD_SCORE: i32 = 1;

    /// Highest mood score the model may return
    pub const MAX_MOOD_SCORE: i32 = 10;

    /// Characters of raw model output kept in debug logs and error messages
    pub const RESPONSE_PREVIEW_CHARS: usize = 200;
}

/// HTTP/Network constants
pub mod network {
    /// Default analysis request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Upper bound accepted for the analysis timeout (seconds)
    pub const MAX_TIMEOUT_SECS: u64 = 120;

    /// Default bind address for `moodecho serve`
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default port for `moodecho serve`
    pub const DEFAULT_PORT: u16 = 8080;
}

/// Storage constants
pub mod storage {
    /// Project data directory
    pub const DATA_DIR: &str = ".moodecho";

    /// Database file, relative to the data directory
    pub const DATABASE_FILE: &str = "moodecho.db";

    /// Config file, relative to the data directory
    pub const CONFIG_FILE: &str = "config.toml";
}
