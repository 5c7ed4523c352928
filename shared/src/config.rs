use std::time::Duration;

/// Default server origin for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Default delay between two status polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Rows per admin listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Settings shared by every host of the client core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash, e.g. `https://api.example.com`.
    pub api_base: String,
    /// Delay between two status polls while a submission is pending.
    pub poll_interval: Duration,
    /// Rows per admin listing page. Never zero.
    pub page_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `api_base`, other fields defaulted.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::default().with_api_base(api_base)
    }

    /// Replaces the server origin; a trailing slash is dropped.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Replaces the page size; zero is bumped to one.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Parses an optional millisecond string, keeping the default on bad
    /// input.
    pub fn with_poll_interval_ms(self, raw: Option<&str>) -> Self {
        match raw.and_then(|value| value.trim().parse::<u64>().ok()) {
            Some(ms) if ms > 0 => self.with_poll_interval(Duration::from_millis(ms)),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn bad_interval_keeps_default() {
        let config = ClientConfig::default().with_poll_interval_ms(Some("abc"));
        assert_eq!(config.poll_interval, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
        let config = ClientConfig::default().with_poll_interval_ms(Some("500"));
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(ClientConfig::default().with_page_size(0).page_size, 1);
    }
}
