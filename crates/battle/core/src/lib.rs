//! Deterministic turn-based battle rules shared across clients.
//!
//! `battle-core` defines the canonical rules (combatants, attacks, resolution,
//! turn sequencing) and exposes pure, synchronous APIs that the runtime and
//! offline tools reuse. All battle state mutation flows through [`Battle`], and
//! supporting crates depend on the types re-exported here.
pub mod ai;
pub mod attack;
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod error;
pub mod event;
pub mod inventory;
pub mod rng;

pub use ai::{AiPolicy, Decision, DecisionContext, RandomPolicy};
pub use attack::{Attack, AttackCategory, AttackEffect, ResourceCost};
pub use battle::{Battle, BattlePhase};
pub use combat::{AttackReport, check_attack, resolve_attack};
pub use combatant::{Combatant, FighterStats, Side, Transformation, TurnRole};
pub use config::{BattleConfig, MitigationTable};
pub use error::{BattleError, BattleFault, BattleResult, ErrorSeverity, InvalidAttackReason};
pub use event::{BattleEvent, BattleEventKind, BattleId, BattleObserver, EventRecorder};
pub use inventory::{Collectible, Inventory, Player};
pub use rng::{BattleRng, PcgRng, compute_seed};
