use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_popular_card_width")]
    pub popular_card_width: u16,
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
}

const MIN_TICK_RATE_MS: u64 = 10;
const MAX_POPULAR_CARD_WIDTH: u16 = 200;

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_popular_card_width() -> u16 {
    30
}

fn default_show_hints() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tick_rate_ms: default_tick_rate_ms(),
            popular_card_width: default_popular_card_width(),
            show_hints: default_show_hints(),
        }
    }
}

impl AppConfig {
    /// Read `path`, or the default location when none is given. A missing
    /// file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.clamped())
    }

    /// Pull values that would spin the input loop or overflow layout back
    /// into range.
    fn clamped(self) -> Self {
        AppConfig {
            tick_rate_ms: self.tick_rate_ms.max(MIN_TICK_RATE_MS),
            popular_card_width: self.popular_card_width.min(MAX_POPULAR_CARD_WIDTH),
            ..self
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

fn config_path() -> PathBuf {
    dirs_path().join("config.toml")
}

fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("jetnews")
}
