//! Actions fed from outside the session, e.g. a UI reading player input.

use async_trait::async_trait;
use battle_core::{Battle, Side};
use tokio::sync::{Mutex, mpsc};

use crate::api::{ActionProvider, BattleAction, Result, RuntimeError};

/// Action provider that waits for actions sent over an mpsc channel.
///
/// Fails with [`RuntimeError::ActionProviderChannelClosed`] once every
/// sender is dropped and the buffer is drained.
pub struct ChannelActionProvider {
    rx_action: Mutex<mpsc::Receiver<BattleAction>>,
}

impl ChannelActionProvider {
    pub fn new(rx_action: mpsc::Receiver<BattleAction>) -> Self {
        Self {
            rx_action: Mutex::new(rx_action),
        }
    }

    /// Creates a provider together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<BattleAction>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl ActionProvider for ChannelActionProvider {
    async fn provide_action(&self, side: Side, battle: &Battle) -> Result<BattleAction> {
        let mut rx = self.rx_action.lock().await;

        match rx.recv().await {
            Some(action) => {
                tracing::trace!(%side, turn = battle.turn(), ?action, "action received");
                Ok(action)
            }
            None => Err(RuntimeError::ActionProviderChannelClosed),
        }
    }
}
