// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read and write access to the Punks collection contract.
//!
//! [`CollectionQueries`] covers everything needed to display holdings and the
//! transfer log; [`CollectionMutations`] covers the two state-changing calls,
//! `mint` and `transfer`. [`PunksClient`] implements both against a JSON-RPC
//! node over HTTP.

use alloy::{
    eips::BlockNumberOrTag,
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::eth::TransactionReceipt,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use url::Url;

use crate::{
    common::{EthereumClientError, MintRecord, TransferRecord, TxConfirmation},
    contract::IPunks,
};

/// Read-only queries against the collection contract.
#[async_trait]
pub trait CollectionQueries {
    /// Returns the number of tokens held by `owner`.
    async fn balance_of(&self, owner: Address) -> Result<U256, EthereumClientError>;

    /// Returns the id of the token at position `index` in the contract's
    /// enumeration of `owner`'s holdings.
    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, EthereumClientError>;

    /// Returns the metadata URI recorded on-chain for `token_id`.
    async fn token_uri(&self, token_id: U256) -> Result<String, EthereumClientError>;

    /// Returns every `Transferred` event since the contract was deployed, in
    /// chain order.
    async fn transfer_log(&self) -> Result<Vec<TransferRecord>, EthereumClientError>;

    /// Returns the `Minted` events from `from_block` onwards, in chain order.
    async fn minted_since(&self, from_block: u64) -> Result<Vec<MintRecord>, EthereumClientError>;

    /// Returns the current block number of the connected chain.
    async fn block_number(&self) -> Result<u64, EthereumClientError>;
}

/// State-changing calls against the collection contract. These require the
/// client to have been connected with a signer.
#[async_trait]
pub trait CollectionMutations {
    /// Mints the next token to the signer, paying `value` wei, and waits for
    /// the transaction to be confirmed.
    async fn mint(&self, value: U256) -> Result<TxConfirmation, EthereumClientError>;

    /// Transfers `token_id` from the signer to `to` and waits for the
    /// transaction to be confirmed.
    async fn transfer(
        &self,
        token_id: U256,
        to: Address,
    ) -> Result<TxConfirmation, EthereumClientError>;
}

/// A client for the Punks collection contract behind an HTTP JSON-RPC
/// endpoint.
#[derive(Clone)]
pub struct PunksClient {
    provider: DynProvider,
    contract_address: Address,
    signer_address: Option<Address>,
}

impl PunksClient {
    /// Connects to the node at `url` for read-only access to the contract at
    /// `contract_address`.
    pub fn connect(url: Url, contract_address: Address) -> Self {
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Self {
            provider,
            contract_address,
            signer_address: None,
        }
    }

    /// Connects to the node at `url` with `signer` attached, so that mint and
    /// transfer transactions can be submitted.
    pub fn connect_with_signer(
        url: Url,
        contract_address: Address,
        signer: PrivateKeySigner,
    ) -> Self {
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();
        Self {
            provider,
            contract_address,
            signer_address: Some(signer_address),
        }
    }

    /// The address of the attached signer, if any.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    fn contract(&self) -> IPunks::IPunksInstance<DynProvider> {
        IPunks::new(self.contract_address, self.provider.clone())
    }

    fn ensure_signer(&self) -> Result<(), EthereumClientError> {
        if self.signer_address.is_none() {
            return Err(EthereumClientError::NoActiveSigner);
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionQueries for PunksClient {
    async fn balance_of(&self, owner: Address) -> Result<U256, EthereumClientError> {
        Ok(self.contract().balanceOf(owner).call().await?)
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, EthereumClientError> {
        Ok(self
            .contract()
            .tokenOfOwnerByIndex(owner, index)
            .call()
            .await?)
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, EthereumClientError> {
        Ok(self.contract().tokenURI(token_id).call().await?)
    }

    async fn transfer_log(&self) -> Result<Vec<TransferRecord>, EthereumClientError> {
        let events = self
            .contract()
            .Transferred_filter()
            .from_block(0u64)
            .to_block(BlockNumberOrTag::Latest)
            .query()
            .await?;
        Ok(events
            .into_iter()
            .map(|(event, log)| TransferRecord {
                token_id: event.tokenId,
                from: event.from,
                to: event.to,
                block_number: log.block_number.unwrap_or_default(),
            })
            .collect())
    }

    async fn minted_since(&self, from_block: u64) -> Result<Vec<MintRecord>, EthereumClientError> {
        let events = self
            .contract()
            .Minted_filter()
            .from_block(from_block)
            .to_block(BlockNumberOrTag::Latest)
            .query()
            .await?;
        Ok(events
            .into_iter()
            .map(|(event, log)| MintRecord {
                owner: event.owner,
                token_id: event.tokenId,
                block_number: log.block_number.unwrap_or_default(),
            })
            .collect())
    }

    async fn block_number(&self) -> Result<u64, EthereumClientError> {
        Ok(self.provider.get_block_number().await?)
    }
}

#[async_trait]
impl CollectionMutations for PunksClient {
    async fn mint(&self, value: U256) -> Result<TxConfirmation, EthereumClientError> {
        self.ensure_signer()?;
        let receipt = self
            .contract()
            .mint()
            .value(value)
            .send()
            .await?
            .get_receipt()
            .await?;
        confirmation(receipt)
    }

    async fn transfer(
        &self,
        token_id: U256,
        to: Address,
    ) -> Result<TxConfirmation, EthereumClientError> {
        self.ensure_signer()?;
        let receipt = self
            .contract()
            .transfer(token_id, to)
            .send()
            .await?
            .get_receipt()
            .await?;
        confirmation(receipt)
    }
}

fn confirmation(receipt: TransactionReceipt) -> Result<TxConfirmation, EthereumClientError> {
    if !receipt.status() {
        return Err(EthereumClientError::TransactionFailed(
            receipt.transaction_hash,
        ));
    }
    Ok(TxConfirmation {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number.unwrap_or_default(),
    })
}
