//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

use battle_content::ContentFactory;

/// Which fighters meet and where their data lives.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub content_dir: PathBuf,
    pub me: String,
    pub foe: String,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: ContentFactory::bundled_dir(),
            me: "goku".to_owned(),
            foe: "frieza".to_owned(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Data directory (default: bundled content)
    /// - `BATTLE_ME` - Roster id of the first fighter (default: goku)
    /// - `BATTLE_FOE` - Roster id of the second fighter (default: frieza)
    /// - `BATTLE_SEED` - AI seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = dir.into();
        }
        if let Ok(me) = env::var("BATTLE_ME") {
            config.me = me;
        }
        if let Ok(foe) = env::var("BATTLE_FOE") {
            config.foe = foe;
        }
        config.seed = read_env::<u64>("BATTLE_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
