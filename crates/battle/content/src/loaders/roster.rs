//! Fighter roster loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::roster::Roster;

/// Loader for the fighter roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file.
    ///
    /// RON format: `(fighters: [FighterTemplate, ...])`. Fighter ids must be
    /// unique (case-insensitive). Attack names are resolved later, when a
    /// combatant is built.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from RON text.
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for (index, template) in roster.fighters.iter().enumerate() {
            let duplicate = roster.fighters[..index]
                .iter()
                .any(|earlier| earlier.id.eq_ignore_ascii_case(&template.id));
            if duplicate {
                anyhow::bail!("Duplicate fighter id '{}' in roster", template.id);
            }
        }
        tracing::debug!(fighters = roster.fighters.len(), "roster loaded");

        Ok(roster)
    }
}
