//! Common error infrastructure for battle-core.
//!
//! Every battle operation reports failures through [`BattleError`]. Errors are
//! classified by [`ErrorSeverity`] so callers (UI prompts, AI retries, the
//! session driver) can decide whether to ask for another choice or abort.
//!
//! # Design Principles
//!
//! - **No partial mutation**: an operation that returns an error leaves every
//!   combatant and the turn pointer untouched and emits no event
//! - **Severity Classification**: expected rejections are recoverable, calls
//!   against the wrong phase are internal bugs

use crate::inventory::Collectible;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller should pick a different action
/// - **Validation**: the request can never succeed as issued
/// - **Internal**: the caller violated the battle lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with an alternative action.
    ///
    /// Examples: not enough energy, no senzu beans left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: attack not in the move set, item with no battle use
    Validation,

    /// Internal error - the battle lifecycle was not respected.
    ///
    /// Examples: acting before `start()`, acting after the battle ended.
    /// These indicate bugs in the calling layer.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the caller.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// Provides a uniform interface for error classification across error types.
pub trait BattleFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics, logs and tests. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Why an attack was rejected by its eligibility check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidAttackReason {
    /// The acting fighter has not learned this attack.
    #[error("'{0}' is not in the fighter's move set")]
    NotLearned(String),

    #[error("not enough stamina (have {have}, need {need})")]
    InsufficientStamina { have: u32, need: u32 },

    #[error("not enough ki (have {have}, need {need})")]
    InsufficientEnergy { have: u32, need: u32 },

    /// Transformation requested while already transformed.
    #[error("fighter is already transformed")]
    AlreadyTransformed,

    /// Transformation requested by a fighter without that capability.
    #[error("fighter cannot transform")]
    CannotTransform,
}

impl BattleFault for InvalidAttackReason {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotLearned(_) | Self::CannotTransform => ErrorSeverity::Validation,
            Self::InsufficientStamina { .. }
            | Self::InsufficientEnergy { .. }
            | Self::AlreadyTransformed => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotLearned(_) => "ATTACK_NOT_LEARNED",
            Self::InsufficientStamina { .. } => "ATTACK_INSUFFICIENT_STAMINA",
            Self::InsufficientEnergy { .. } => "ATTACK_INSUFFICIENT_ENERGY",
            Self::AlreadyTransformed => "ATTACK_ALREADY_TRANSFORMED",
            Self::CannotTransform => "ATTACK_CANNOT_TRANSFORM",
        }
    }
}

/// Errors surfaced by [`crate::Battle`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("invalid attack: {0}")]
    InvalidAttack(#[from] InvalidAttackReason),

    #[error("not enough {item} left")]
    NotEnoughCollectibles { item: Collectible },

    #[error("{item} cannot be used during a battle")]
    ItemNotUsable { item: Collectible },

    #[error("battle has not started")]
    NotStarted,

    #[error("battle has already started")]
    AlreadyStarted,

    #[error("battle has already ended")]
    BattleEnded,
}

impl BattleError {
    /// Returns true when the calling layer should simply ask for another action.
    pub fn is_retryable(&self) -> bool {
        !self.severity().is_internal()
    }
}

impl BattleFault for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAttack(reason) => reason.severity(),
            Self::NotEnoughCollectibles { .. } => ErrorSeverity::Recoverable,
            Self::ItemNotUsable { .. } => ErrorSeverity::Validation,
            Self::NotStarted | Self::AlreadyStarted | Self::BattleEnded => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAttack(reason) => reason.error_code(),
            Self::NotEnoughCollectibles { .. } => "BATTLE_NOT_ENOUGH_COLLECTIBLES",
            Self::ItemNotUsable { .. } => "BATTLE_ITEM_NOT_USABLE",
            Self::NotStarted => "BATTLE_NOT_STARTED",
            Self::AlreadyStarted => "BATTLE_ALREADY_STARTED",
            Self::BattleEnded => "BATTLE_ENDED",
        }
    }
}

/// Result type alias for battle operations.
pub type BattleResult<T> = Result<T, BattleError>;
