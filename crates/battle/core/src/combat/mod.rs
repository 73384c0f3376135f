//! Attack resolution.
//!
//! Pure functions that validate an attack, deduct its cost and apply its
//! effect. Nothing here knows about turns or events; [`crate::Battle`] calls
//! into this module and handles sequencing.
//!
//! # Core Functions
//!
//! - `check_attack`: eligibility (resources, transformation preconditions)
//! - `resolve_attack`: check + cost + effect, all-or-nothing
//! - `calculate_damage`: base damage scaled by the attacker's stats
//! - `mitigate`: block reduction per attack category
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;
pub mod resolve;

pub use damage::{apply_damage, calculate_damage, mitigate};
pub use resolve::{AttackReport, check_attack, effective_cost, resolve_attack};
