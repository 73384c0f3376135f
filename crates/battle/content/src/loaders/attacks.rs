//! Attack catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{AttackCatalog, AttackSpec};
use crate::loaders::{LoadResult, read_file};

/// Attack catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackCatalogFile {
    pub attacks: Vec<AttackSpec>,
}

/// Loader for the attack catalog from RON files.
pub struct AttackLoader;

impl AttackLoader {
    /// Load the attack catalog from a RON file.
    ///
    /// RON format: `(attacks: [AttackSpec, ...])`. Attack names must be
    /// unique.
    pub fn load(path: &Path) -> LoadResult<AttackCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an attack catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<AttackCatalog> {
        let file: AttackCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attack catalog RON: {}", e))?;

        let catalog = AttackCatalog::from_specs(&file.attacks)
            .map_err(|name| anyhow::anyhow!("Duplicate attack '{}' in catalog", name))?;
        tracing::debug!(attacks = catalog.len(), "attack catalog loaded");

        Ok(catalog)
    }
}
