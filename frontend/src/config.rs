use reviewflow_shared::config::{ClientConfig, DEFAULT_API_BASE};

// API base URL - 编译时从环境变量读取，默认本地开发地址
pub const API_BASE: &str = match option_env!("REVIEWFLOW_API_BASE") {
    Some(url) => url,
    None => DEFAULT_API_BASE,
};

/// Poll interval override in milliseconds, read at compile time.
pub const POLL_INTERVAL_MS: Option<&str> = option_env!("REVIEWFLOW_POLL_INTERVAL_MS");

pub fn client_config() -> ClientConfig {
    ClientConfig::new(API_BASE).with_poll_interval_ms(POLL_INTERVAL_MS)
}
