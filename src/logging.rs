//! Tracing subscriber setup.
//!
//! The configured level seeds the default filter directive; a non-empty
//! `RUST_LOG` overrides it entirely.

use tracing_subscriber::fmt;

use crate::config::AppConfig;

/// Installs the global subscriber per the loaded configuration.
pub fn init(config: &AppConfig) {
    init_with(config.log_level(), config.log_json);
}

/// Initializes tracing using the provided log level as the default filter.
pub fn init_with(level: &str, json: bool) {
    let default_directive = format!("costura_core={}", level);
    let filter_directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_with("debug", false);
        init_with("info", true);
    }
}
