use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub suppliers_path: PathBuf,
    pub log_level: String,
    pub user_agent: String,
    /// Total navigation attempts per URL, including the first.
    pub nav_max_attempts: u32,
    /// Upper bound on a single navigation attempt.
    pub nav_timeout_secs: u64,
    /// Base delay for exponential backoff between navigation attempts.
    pub nav_backoff_base_ms: u64,
    pub readiness_timeout_ms: u64,
    pub readiness_poll_ms: u64,
    pub scroll_max_iterations: u32,
    pub scroll_pause_ms: u64,
    /// Fixed pause between successive page visits within one supplier run.
    pub politeness_delay_ms: u64,
    /// How many suppliers the CLI scrapes at once for `--all` runs.
    pub max_concurrent_suppliers: usize,
}
