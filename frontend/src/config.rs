use tracing::level_filters::LevelFilter;

pub struct Config {
    pub api_base_url: &'static str,
    /// How often the proposal list is refetched.
    pub refresh_interval_ms: u32,
    pub trending_limit: usize,
    pub log_level: LevelFilter,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            api_base_url: "/api",
            refresh_interval_ms: 5_000,
            trending_limit: 5,
            log_level: if cfg!(debug_assertions) { LevelFilter::DEBUG } else { LevelFilter::INFO },
        }
    }
}

pub const CONFIG: Config = Config::new();
