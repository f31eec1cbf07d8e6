// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Connection and sampling settings with the capture server's defaults.
/// A `config.json` in the working directory overrides any subset of fields.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StreamConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single read, in bytes.
    pub read_cap: usize,
    /// Sampling period while streaming, in milliseconds.
    pub tick_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            read_cap: 100,
            tick_ms: 25,
        }
    }
}

impl StreamConfig {
    fn config_path() -> PathBuf {
        PathBuf::from("config.json")
    }

    /// Loads overrides from disk, falling back to defaults when the file is
    /// missing or unparseable. A bad file is logged, never fatal.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring malformed {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_capture_server() {
        let cfg = StreamConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.read_cap, 100);
        assert_eq!(cfg.tick_ms, 25);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg: StreamConfig = serde_json::from_str(r#"{"port": 6010}"#).unwrap();
        assert_eq!(cfg.port, 6010);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.tick_ms, 25);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let cfg: StreamConfig =
            serde_json::from_str(r#"{"host": "10.0.0.2", "theme": "dark"}"#).unwrap();
        assert_eq!(cfg.host, "10.0.0.2");
    }

    // each load_from test uses its own file name so they can run in parallel

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("rgb_stream_viewer_absent_config.json");
        let _ = fs::remove_file(&path);
        assert_eq!(StreamConfig::load_from(&path), StreamConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("rgb_stream_viewer_malformed_config.json");
        fs::write(&path, "{ this is not json").unwrap();
        assert_eq!(StreamConfig::load_from(&path), StreamConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn valid_file_overrides_defaults() {
        let path = std::env::temp_dir().join("rgb_stream_viewer_valid_config.json");
        fs::write(&path, r#"{"port": 6010, "tick_ms": 40}"#).unwrap();
        let cfg = StreamConfig::load_from(&path);
        assert_eq!(cfg.port, 6010);
        assert_eq!(cfg.tick_ms, 40);
        assert_eq!(cfg.host, "127.0.0.1");
        let _ = fs::remove_file(&path);
    }
}
