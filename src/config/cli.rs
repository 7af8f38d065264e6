use std::path::PathBuf;

use clap::{Args, builder::BoolishValueParser};

/// Configuration flags shared by every rentbook binary.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "RENTBOOK_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the API base URL.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override where the session cookie is persisted.
    #[arg(long = "session-store-path", value_name = "PATH", global = true)]
    pub session_store_path: Option<PathBuf>,

    /// Override the query cache capacity.
    #[arg(long = "cache-capacity", value_name = "COUNT", global = true)]
    pub cache_capacity: Option<u64>,

    /// Override how long fetched data counts as fresh, in milliseconds.
    #[arg(long = "cache-stale-time-ms", value_name = "MILLIS", global = true)]
    pub cache_stale_time_ms: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the message catalog file.
    #[arg(long = "locale-catalog", value_name = "PATH", global = true)]
    pub locale_catalog: Option<PathBuf>,
}
