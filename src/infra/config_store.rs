// ============================================================
// Infrastructure — Config Store
// ============================================================
// Saves and restores a CorpusConfig as pretty-printed JSON:
//
//   <dir>/corpus_config.json
//
// Keeping the seed in this file is what makes shuffled runs
// repeatable across processes.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::corpus_config::CorpusConfig;

pub const CONFIG_FILE: &str = "corpus_config.json";

/// Reads and writes corpus_config.json in one directory.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Write the config, creating the directory if needed.
    pub fn save(&self, cfg: &CorpusConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved corpus config to '{}'", path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<CorpusConfig> {
        let path = self.path();
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. Run 'init-config' first.",
                path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dialog-loader-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_then_load() {
        let dir   = scratch_dir("config");
        let store = ConfigStore::new(&dir);
        let cfg   = CorpusConfig { seed: Some(99), min_vocab_times: 3, ..CorpusConfig::default() };

        store.save(&cfg).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), cfg);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_config_mentions_init() {
        let err = ConfigStore::new(scratch_dir("missing")).load().unwrap_err();
        assert!(format!("{err:#}").contains("init-config"));
    }
}
