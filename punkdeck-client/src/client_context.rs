// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The state a running client operates on.

use std::time::Instant;

use alloy::primitives::{Address, U256};
use tracing::{debug, info, warn};

use punkdeck_ethereum::{
    client::{CollectionMutations, CollectionQueries},
    common::{TransferRecord, TxConfirmation},
};

use crate::{
    collection::{self, CollectionState, FetchError},
    config::ChainConfig,
    metadata::MetadataFetcher,
    mutation::{self, MintError, TransferError},
    session::{AccountSession, ConnectionError},
    transfer_log,
};

/// Ties together the chain client, the metadata fetcher, the wallet session
/// and the holdings view of one running client.
pub struct ClientContext<C, M> {
    pub config: ChainConfig,
    pub chain: C,
    pub metadata: M,
    pub session: AccountSession,
    pub collection: CollectionState,
}

impl<C, M> ClientContext<C, M>
where
    C: CollectionQueries + CollectionMutations + Send + Sync,
    M: MetadataFetcher + Send + Sync,
{
    /// Creates a context whose holdings view starts out loading.
    pub fn new(config: ChainConfig, chain: C, metadata: M, session: AccountSession) -> Self {
        Self {
            config,
            chain,
            metadata,
            session,
            collection: CollectionState::Loading,
        }
    }

    /// The address of the connected wallet.
    pub fn connected_address(&self) -> Result<Address, ConnectionError> {
        self.session.address().ok_or(ConnectionError::MissingWallet)
    }

    /// Re-reads the connected account's holdings from the chain. Fetch
    /// failures land in the holdings view rather than propagating.
    pub async fn refresh(&mut self) -> Result<&CollectionState, ConnectionError> {
        let account = self.connected_address()?;
        self.collection = CollectionState::Loading;
        self.collection =
            match collection::fetch_owned_tokens(&self.chain, &self.metadata, account).await {
                Ok(tokens) => {
                    debug!(count = tokens.len(), "holdings refreshed");
                    CollectionState::Ready { tokens }
                }
                Err(error) => CollectionState::Failed {
                    message: error.to_string(),
                },
            };
        Ok(&self.collection)
    }

    /// Mints the next token at the collection price, then refreshes the
    /// holdings view.
    pub async fn mint(&mut self) -> Result<TxConfirmation, MintError> {
        let price = self.config.mint_price;
        info!(%price, "submitting mint transaction");
        let start = Instant::now();
        let confirmation = mutation::mint(&self.chain, price).await?;
        info!(
            "mint confirmed in block {} after {} ms",
            confirmation.block_number,
            start.elapsed().as_millis()
        );
        self.refresh_after_mutation().await;
        Ok(confirmation)
    }

    /// Transfers `token_id` to `recipient`, then refreshes the holdings view.
    pub async fn transfer(
        &mut self,
        token_id: U256,
        recipient: &str,
    ) -> Result<TxConfirmation, TransferError> {
        info!(%token_id, recipient, "submitting transfer transaction");
        let start = Instant::now();
        let confirmation = mutation::transfer(&self.chain, token_id, recipient).await?;
        info!(
            "transfer confirmed in block {} after {} ms",
            confirmation.block_number,
            start.elapsed().as_millis()
        );
        self.refresh_after_mutation().await;
        Ok(confirmation)
    }

    /// The full transfer history of the collection, oldest first.
    pub async fn transfer_history(&self) -> Result<Vec<TransferRecord>, FetchError> {
        transfer_log::list_transfers(&self.chain).await
    }

    async fn refresh_after_mutation(&mut self) {
        if self.refresh().await.is_err() {
            warn!("holdings not refreshed: the wallet disconnected mid-operation");
        }
    }
}
