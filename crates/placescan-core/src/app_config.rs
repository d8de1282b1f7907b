use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Google Maps Platform key. Optional here; the CLI also accepts
    /// `--api_key` and the web form has a key field.
    pub google_api_key: Option<String>,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Wait before requesting a continuation page.
    pub page_delay_ms: u64,
    /// Upper bound on nearby-search pages per keyword.
    pub max_pages: usize,
    /// Number of finished workbooks the server keeps for download.
    pub export_cache_size: usize,
}

/// The subset of [`AppConfig`] a single search run needs.
///
/// The CLI loads only this, so server-only variables such as
/// `PLACESCAN_BIND_ADDR` cannot break it.
#[derive(Clone)]
pub struct SearchConfig {
    pub log_level: String,
    pub google_api_key: Option<String>,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_delay_ms: u64,
    pub max_pages: usize,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("log_level", &self.log_level)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("max_pages", &self.max_pages)
            .field("export_cache_size", &self.export_cache_size)
            .finish()
    }
}
