//! Data-driven fighter and attack content.
//!
//! This crate holds the static content a battle is assembled from:
//! - Attack catalogs (data-driven via RON)
//! - Fighter rosters (data-driven via RON)
//! - Battle balance parameters (data-driven via TOML)
//!
//! Content is resolved into `battle-core` types before a battle starts and
//! never appears in battle state by itself.

pub mod catalog;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{AttackCatalog, AttackSpec};
pub use roster::{FighterTemplate, Roster, RosterError};

#[cfg(feature = "loaders")]
pub use loaders::{AttackLoader, ConfigLoader, ContentFactory, LoadResult, RosterLoader};
