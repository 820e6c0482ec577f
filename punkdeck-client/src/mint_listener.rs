// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A background listener for the connected account's mint events.
//!
//! The listener polls the chain for `Minted` events and forwards the ones
//! credited to the subscribed account. Events from before the subscription
//! started are never reported. Dropping the [`MintSubscription`] aborts the
//! polling task.

use std::time::Duration;

use alloy::primitives::Address;
use punkdeck_ethereum::{
    client::CollectionQueries,
    common::{EthereumClientError, MintRecord},
};
use tokio::{
    sync::mpsc,
    task::AbortHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

/// Aborts the task it is attached to when dropped.
pub struct AbortOnDrop(pub AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A live subscription to the connected account's `Minted` events.
pub struct MintSubscription {
    events: mpsc::UnboundedReceiver<MintRecord>,
    _abort: AbortOnDrop,
}

impl MintSubscription {
    /// Waits for the next mint credited to the subscribed account.
    pub async fn next_minted(&mut self) -> Option<MintRecord> {
        self.events.recv().await
    }
}

/// Starts polling `chain` every `poll_interval` for `Minted` events credited
/// to `owner`, beginning with the block after the current one.
pub async fn subscribe_minted<C>(
    chain: C,
    owner: Address,
    poll_interval: Duration,
) -> Result<MintSubscription, EthereumClientError>
where
    C: CollectionQueries + Send + Sync + 'static,
{
    let start_block = chain.block_number().await?.saturating_add(1);
    let (sender, events) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut ticker = time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut next_block = start_block;
        loop {
            ticker.tick().await;
            match chain.minted_since(next_block).await {
                Ok(records) => {
                    for record in records {
                        let after = record.block_number.saturating_add(1);
                        next_block = next_block.max(after);
                        if record.owner != owner {
                            continue;
                        }
                        debug!(
                            token_id = %record.token_id,
                            block_number = record.block_number,
                            "observed a mint for the subscribed account"
                        );
                        if sender.send(record).is_err() {
                            return;
                        }
                    }
                }
                Err(error) => warn!(%error, "failed to poll for minted events"),
            }
        }
    });
    Ok(MintSubscription {
        events,
        _abort: AbortOnDrop(handle.abort_handle()),
    })
}
