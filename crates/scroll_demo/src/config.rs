use std::fs;
use std::path::Path;
use std::time::Duration;

use scroll_core::{PullMode, ScrollConfig};
use scroll_logging::{scroll_info, scroll_warn};
use serde::Deserialize;

/// Demo settings; every field may be omitted from the RON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Message list: history loads at the top, opens at the newest message.
    pub chat: ScrollConfig,
    /// Feed: loads more at the bottom, pull-to-refresh at the top.
    pub feed: ScrollConfig,
    pub history_pages: usize,
    pub page_size: usize,
    pub initial_items: usize,
    pub row_height: f64,
    pub viewport: f64,
    pub load_latency_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            chat: ScrollConfig::message_list(),
            feed: ScrollConfig {
                pull_mode: PullMode::Refresh,
                ..ScrollConfig::default()
            },
            history_pages: 3,
            page_size: 20,
            initial_items: 60,
            row_height: 44.0,
            viewport: 600.0,
            load_latency_ms: 250,
        }
    }
}

impl DemoConfig {
    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }
}

/// Reads a RON config, falling back to defaults when it is missing or invalid.
pub fn load_config(path: &Path) -> DemoConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            scroll_info!("No config at {:?}, using defaults", path);
            return DemoConfig::default();
        }
        Err(err) => {
            scroll_warn!("Failed to read config from {:?}: {}", path, err);
            return DemoConfig::default();
        }
    };

    let config: DemoConfig = match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            scroll_warn!("Failed to parse config from {:?}: {}", path, err);
            return DemoConfig::default();
        }
    };

    for (name, surface) in [("chat", &config.chat), ("feed", &config.feed)] {
        if let Err(err) = surface.validate() {
            scroll_warn!("Invalid {} config in {:?}: {}", name, path, err);
            return DemoConfig::default();
        }
    }

    scroll_info!("Loaded config from {:?}", path);
    config
}

#[cfg(test)]
mod tests {
    use std::fs;

    use scroll_core::InitialAnchor;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron"));
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("demo.ron");
        fs::write(
            &path,
            "(chat: (start_loading: true, end_loading: false, initial_anchor: End), page_size: 5)",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.history_pages, 3);
        assert!(config.chat.start_loading);
        assert_eq!(config.chat.initial_anchor, InitialAnchor::End);
        assert_eq!(config.chat.pull_threshold, 80.0);
        assert_eq!(config.feed, DemoConfig::default().feed);
    }

    #[test]
    fn malformed_or_invalid_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(page_size: ").unwrap();
        assert_eq!(load_config(&path), DemoConfig::default());

        fs::write(&path, "(feed: (pull_threshold: -3.0))").unwrap();
        assert_eq!(load_config(&path), DemoConfig::default());
    }

    #[test]
    fn shipped_demo_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo.ron");
        let config = load_config(&path);
        assert_eq!(config.chat.initial_anchor, InitialAnchor::End);
        assert_eq!(config.feed.pull_mode, PullMode::Refresh);
    }
}
