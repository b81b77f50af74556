use anyhow::{Context, Result};
use resin_core::AlertState;
use std::path::PathBuf;
use tracing::warn;

const STATE_FILE: &str = "state.json";

/// Durable home of [`AlertState`]: one JSON document under the data dir.
///
/// Loads never fail; a missing or unreadable file is an empty state, since
/// losing dedup history only risks a duplicate alert, never a missed one.
/// Saves go through a sibling temp file and a rename, so a crash mid-write
/// leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn load(&self) -> AlertState {
        let path = self.path();
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(_) => return AlertState::default(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                warn!("discarding unreadable state file {}: {e}", path.display());
                AlertState::default()
            }
        }
    }

    pub fn save(&self, state: &AlertState) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create state dir {}", self.dir.display()))?;
        let path = self.path();
        let tmp = self.dir.join(format!("{STATE_FILE}.tmp"));
        let bytes = serde_json::to_vec_pretty(state)?;
        std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path).with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }
}
