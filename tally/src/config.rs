//! Tally configuration
//!
//! Loaded from `tally.toml`. Every section is optional; a missing file
//! yields the demo page.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_ui::app::{demo_configs, DEFAULT_HEADING, DEFAULT_TITLE};
use tally_ui::{CounterConfig, Page};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete configuration from tally.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub page: PageConfig,
    pub dev: DevConfig,
    /// `[[counter]]` tables, mounted in file order
    #[serde(rename = "counter")]
    pub counters: Vec<CounterConfig>,
}

/// [page] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    pub footer: Option<String>,
}

/// [dev] section - development server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    pub port: u16,
    /// Client patch polling interval in milliseconds
    pub poll_interval: u64,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            dev: DevConfig::default(),
            counters: demo_configs(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            heading: DEFAULT_HEADING.to_string(),
            footer: None,
        }
    }
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            poll_interval: 250,
        }
    }
}

impl TallyConfig {
    /// Load from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), counters = config.counters.len(), "config loaded");
        Ok(config)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build a page with every configured counter mounted
    pub fn build_page(&self) -> Page {
        let mut page = Page::new(self.page.title.as_str()).with_heading(self.page.heading.as_str());
        if let Some(footer) = &self.page.footer {
            page = page.with_footer(footer.as_str());
        }
        for counter in &self.counters {
            page.mount(counter.clone());
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_ui::core::Theme;
    use tally_ui::MAX_SAFE_INTEGER;

    #[test]
    fn test_parse_config() {
        let toml = "[page]\ntitle = \"Counters\"\n\n[dev]\nport = 4000\n\n[[counter]]\ninitial = 3\nmin = 0\nmax = 9\nstep = 3\ntheme = \"purple\"\n\n[[counter]]\ninitial = -2\n";

        let config = TallyConfig::parse(toml).unwrap();

        assert_eq!(config.page.title, "Counters");
        assert_eq!(config.page.heading, DEFAULT_HEADING);
        assert_eq!(config.dev.port, 4000);
        assert_eq!(config.dev.poll_interval, 250);
        assert_eq!(config.counters.len(), 2);
        assert_eq!(config.counters[0], CounterConfig::new(3).range(0, 9).step(3).theme(Theme::Purple));
        assert_eq!(config.counters[1].initial, -2);
        assert_eq!(config.counters[1].max, MAX_SAFE_INTEGER);
        assert_eq!(config.counters[1].theme, Theme::Blue);
    }

    #[test]
    fn test_footer() {
        let config = TallyConfig::parse("[page]\nfooter = \"made with care\"\n").unwrap();
        assert_eq!(config.page.footer.as_deref(), Some("made with care"));
        assert!(config.build_page().to_html().contains("<footer>made with care</footer>"));
    }

    #[test]
    fn test_empty_config_is_demo() {
        let config = TallyConfig::parse("").unwrap();
        assert_eq!(config, TallyConfig::default());
        assert_eq!(config.counters.len(), 3);
    }

    #[test]
    fn test_rejects_unknown_keys_and_themes() {
        assert!(TallyConfig::parse("[[counter]]\nstart = 1\n").is_err());
        assert!(TallyConfig::parse("[[counter]]\ntheme = \"orange\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TallyConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, TallyConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[dev]\npoll_interval = 100\n\n[[counter]]\ninitial = 7\n").unwrap();

        let config = TallyConfig::load(&path).unwrap();
        assert_eq!(config.dev.poll_interval, 100);
        assert_eq!(config.counters, vec![CounterConfig::new(7)]);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[page\ntitle = ").unwrap();

        let err = TallyConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_build_page_mounts_inconsistent_counters() {
        let config = TallyConfig::parse("[page]\nheading = \"Odd\"\n\n[[counter]]\ninitial = 50\nmin = 10\nmax = 0\n").unwrap();
        let page = config.build_page();

        assert_eq!(page.heading(), "Odd");
        assert_eq!(page.render().len(), 3);
        assert_eq!(page.counters().len(), 1);
        assert_eq!(page.counters()[0].count(), 50);
    }
}
