//! Background sweep of expired invitations.

use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, warn};

use super::StudioStore;

/// Periodically removes unredeemed invitations past their expiry.
pub struct InviteSweeper {
    store: Arc<dyn StudioStore>,
    interval: Duration,
}

impl InviteSweeper {
    pub fn new(store: Arc<dyn StudioStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Starts the sweep loop.
    pub async fn run(&self) {
        let mut interval = time::interval(self.interval);

        loop {
            interval.tick().await;
            if let Err(e) = self.sweep().await {
                warn!("Invite sweep failed: {}", e);
            }
        }
    }

    /// Performs a single sweep pass.
    pub async fn sweep(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let removed = self
            .store
            .purge_expired_invites(chrono::Utc::now())
            .await?;
        if removed > 0 {
            debug!("Removed {} expired invitation(s)", removed);
        }
        Ok(())
    }
}
