use super::Config;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub const CLIENT_VERSION: &str = "2.20240613.01.00";
pub const TIMEOUT_SECS: u64 = 15;
pub const MAX_PAGES: u32 = 3;

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}
