//! Engine configuration
//!
//! All values are environment-driven with sane defaults so the binary can
//! be started with no configuration at all for local development.

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP gateway binds to.
    pub bind_addr: String,
    /// Duplicate-read suppression window, in seconds.
    pub dedup_window_sec: i64,
    /// Presence TTL: how long an EPC's last read keeps it "present", in seconds.
    pub presence_ttl_sec: i64,
    /// Interval an external scheduler should use to trigger forced zone
    /// sweeps. The engine does not self-schedule sweeps; it only exposes
    /// this constant for that external caller.
    pub auto_sweep_interval_sec: i64,
    /// Log level passed to the tracing subscriber (e.g. `info`, `debug`).
    pub log_level: String,
    /// Whether to emit logs as JSON rather than the pretty console format.
    pub log_json: bool,
    /// Environment label: development | staging | production.
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8088".into()),
            dedup_window_sec: std::env::var("DEDUP_WINDOW_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            presence_ttl_sec: std::env::var("PRESENCE_TTL_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            auto_sweep_interval_sec: std::env::var("AUTO_SWEEP_INTERVAL_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn dedup_window_ms(&self) -> i64 {
        self.dedup_window_sec * 1000
    }

    pub fn presence_ttl_ms(&self) -> i64 {
        self.presence_ttl_sec * 1000
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
