use crate::pagerank::PageRankConfig;
use crate::tokenizer::TokenizerOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tunables for one analysis run. Every field falls back to its default
/// when missing from the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pagerank: PageRankConfig,
    pub tokenizer: TokenizerOptions,
}

impl EngineConfig {
    /// Load a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.pagerank.validate()?;
        Ok(())
    }
}
