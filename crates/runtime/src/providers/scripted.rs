//! Replays a fixed queue of actions.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use battle_core::{Battle, Side};

use crate::api::{ActionProvider, BattleAction, Result, RuntimeError};

/// Provider that hands out queued actions in order.
///
/// Fails with [`RuntimeError::ProviderExhausted`] once the queue is empty.
/// Rejected actions are not retried; the next queued action is used instead.
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    actions: Mutex<VecDeque<BattleAction>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = BattleAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub fn push(&self, action: BattleAction) {
        self.queue().push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<BattleAction>> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, side: Side, _battle: &Battle) -> Result<BattleAction> {
        let action = self.queue().pop_front();
        action.ok_or(RuntimeError::ProviderExhausted { side })
    }
}
