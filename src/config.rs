use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_SETTINGS_FILE: &str = "quick-translate.settings";

/// Process configuration, read from `QUICK_TRANSLATE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_dir: PathBuf,
    pub settings_file: PathBuf,
    /// Run a single translation through the client and exit.
    pub debug_mode: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host: IpAddr = match var("QUICK_TRANSLATE_HOST") {
            Some(v) => v
                .parse()
                .with_context(|| format!("QUICK_TRANSLATE_HOST is not an IP address: {}", v))?,
            None => DEFAULT_HOST.parse().context("Invalid default host")?,
        };

        let port: u16 = match var("QUICK_TRANSLATE_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("QUICK_TRANSLATE_PORT is not a valid port: {}", v))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            log_dir: var("QUICK_TRANSLATE_LOG_DIR")
                .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
                .into(),
            settings_file: var("QUICK_TRANSLATE_SETTINGS_FILE")
                .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string())
                .into(),
            debug_mode: var("QUICK_TRANSLATE_DEBUG_MODE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]).unwrap();

        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
        assert_eq!(cfg.settings_file, PathBuf::from(DEFAULT_SETTINGS_FILE));
        assert!(!cfg.debug_mode);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("QUICK_TRANSLATE_HOST", "127.0.0.1"),
            ("QUICK_TRANSLATE_PORT", "8080"),
            ("QUICK_TRANSLATE_LOG_DIR", "/var/log/qt"),
            ("QUICK_TRANSLATE_DEBUG_MODE", "TRUE"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.log_dir, PathBuf::from("/var/log/qt"));
        assert!(cfg.debug_mode);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("QUICK_TRANSLATE_PORT", "70000")]).unwrap_err();
        assert!(err.to_string().contains("QUICK_TRANSLATE_PORT"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("QUICK_TRANSLATE_PORT", "  ")]).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
