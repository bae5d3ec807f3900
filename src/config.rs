//! API location.
//!
//! Precedence: `--api-url`, then `LOANS_API_URL`, then `DEFAULT_API_URL`.
//! clap reads the variable into the flag's value (after `app::run` has seeded
//! the process environment from `.env` via dotenvy), so by the time
//! `ApiConfig::resolve` runs only "given or not" is left to decide.

use tracing::debug;

use crate::data::api::DEFAULT_API_URL;

/// Read by clap as the fallback for `--api-url`.
pub const API_URL_ENV: &str = "LOANS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn resolve(configured: Option<&str>) -> Self {
        let (base_url, source) = match configured.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => (url, "configured"),
            None => (DEFAULT_API_URL, "default"),
        };
        debug!(base_url, source, "resolved loan API location");
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_url_beats_default() {
        assert_eq!(
            ApiConfig::resolve(Some("http://flag/api/Loans")).base_url,
            "http://flag/api/Loans"
        );
        assert_eq!(ApiConfig::resolve(None).base_url, DEFAULT_API_URL);
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(ApiConfig::resolve(Some("  ")).base_url, DEFAULT_API_URL);
        assert_eq!(
            ApiConfig::resolve(Some(" http://env/api/Loans ")).base_url,
            "http://env/api/Loans"
        );
    }
}
