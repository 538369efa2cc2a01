use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_TITLE: &str = "Linux Command File Explorer";

/// Window and session settings, read from `EXPLORER_*` variables. A `.env`
/// file is loaded into the environment first by `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub start_dir: Option<PathBuf>,
    pub font_size: f32,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 800.0,
            height: 800.0,
            start_dir: None,
            font_size: 15.0,
            history_limit: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            title: lookup("EXPLORER_TITLE").unwrap_or(defaults.title),
            width: parse_or(&lookup, "EXPLORER_WIDTH", defaults.width)?,
            height: parse_or(&lookup, "EXPLORER_HEIGHT", defaults.height)?,
            start_dir: lookup("EXPLORER_START_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            font_size: parse_or(&lookup, "EXPLORER_FONT_SIZE", defaults.font_size)?,
            history_limit: parse_or(&lookup, "EXPLORER_HISTORY_LIMIT", defaults.history_limit)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has invalid value {value:?}")),
        None => Ok(default),
    }
}
