use anyhow::{Context, Result};
use checkers_agents::{EvalWeights, SearchLimits};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_DEPTH: u8 = 3;
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 7;

/// Optional settings file.
///
/// ```toml
/// [search]
/// depth = 5
/// move_time_ms = 2000
///
/// [eval]
/// king = 5.5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub eval: EvalWeights,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub depth: Option<u8>,
    pub move_time_ms: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line values win over the file. Depth is clamped to 1..=7.
    pub fn limits(&self, depth: Option<u8>, move_time_ms: Option<u64>) -> SearchLimits {
        let depth = depth
            .or(self.search.depth)
            .unwrap_or(DEFAULT_DEPTH)
            .clamp(MIN_DEPTH, MAX_DEPTH);

        let limits = SearchLimits::depth(depth);
        match move_time_ms.or(self.search.move_time_ms) {
            Some(ms) => limits.with_move_time(ms),
            None => limits,
        }
    }
}
