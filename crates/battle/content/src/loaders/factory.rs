//! Content factory for assembling battles from data files.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::catalog::AttackCatalog;
use crate::loaders::{AttackLoader, ConfigLoader, LoadResult, RosterLoader};
use crate::roster::Roster;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── attacks.ron
/// └── fighters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data set shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Self::bundled_dir())
    }

    /// Location of the data set shipped with this crate.
    pub fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load balance parameters from `battle.toml`.
    ///
    /// A missing file yields [`BattleConfig::default`].
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no battle config, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the attack catalog from `attacks.ron`.
    pub fn load_attacks(&self) -> LoadResult<AttackCatalog> {
        let path = self.data_dir.join("attacks.ron");
        AttackLoader::load(&path)
    }

    /// Load the fighter roster from `fighters.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        let path = self.data_dir.join("fighters.ron");
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
