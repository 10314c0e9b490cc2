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
    /// Amazon Associates tag appended to outbound links. Empty disables tagging.
    pub affiliate_tag: String,
    /// Marketplace origin used to build canonical `/dp/{asin}` links.
    pub amazon_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_max_attempts: u32,
    pub scraper_backoff_base_secs: u64,
    pub scraper_jitter_min_ms: u64,
    pub scraper_jitter_max_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn tagging_enabled(&self) -> bool {
        !self.affiliate_tag.is_empty()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "affiliate_tag",
                &if self.tagging_enabled() {
                    "[redacted]"
                } else {
                    "[unset]"
                },
            )
            .field("amazon_base_url", &self.amazon_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_max_attempts", &self.scraper_max_attempts)
            .field("scraper_backoff_base_secs", &self.scraper_backoff_base_secs)
            .field("scraper_jitter_min_ms", &self.scraper_jitter_min_ms)
            .field("scraper_jitter_max_ms", &self.scraper_jitter_max_ms)
            .finish()
    }
}
