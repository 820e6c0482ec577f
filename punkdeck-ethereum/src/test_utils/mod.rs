// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! An in-memory stand-in for the collection contract.
//!
//! [`MemoryCollection`] keeps ownership, token URIs and the event log in
//! process memory and implements the same traits as the HTTP client, so the
//! layers above it can be exercised without a node.

use std::{collections::BTreeMap, sync::Arc};

use alloy::primitives::{Address, B256, U256};
use async_lock::Mutex;
use async_trait::async_trait;

use crate::{
    client::{CollectionMutations, CollectionQueries},
    common::{EthereumClientError, MintRecord, TransferRecord, TxConfirmation},
};

#[derive(Default)]
struct Ledger {
    base_uri: String,
    price: U256,
    holdings: BTreeMap<Address, Vec<U256>>,
    token_uris: BTreeMap<U256, String>,
    next_token_id: u64,
    block_number: u64,
    transfers: Vec<TransferRecord>,
    mints: Vec<MintRecord>,
    submissions: u64,
    minted_polls: u64,
}

impl Ledger {
    fn record_token(&mut self, owner: Address, token_id: U256) {
        let uri = format!("{}{}", self.base_uri, token_id);
        self.holdings.entry(owner).or_default().push(token_id);
        self.token_uris.insert(token_id, uri);
        let next = u64::try_from(token_id).unwrap_or(u64::MAX).saturating_add(1);
        self.next_token_id = self.next_token_id.max(next);
    }

    fn confirmation(&self) -> TxConfirmation {
        TxConfirmation {
            transaction_hash: B256::from(U256::from(self.submissions)),
            block_number: self.block_number,
        }
    }
}

/// An in-memory collection contract. Clones share the same underlying ledger,
/// so one test can hold read-only and signing handles side by side.
#[derive(Clone)]
pub struct MemoryCollection {
    ledger: Arc<Mutex<Ledger>>,
    signer: Option<Address>,
}

impl MemoryCollection {
    /// Creates an empty collection whose token URIs are `base_uri` followed by
    /// the decimal token id, and whose mint price is `price` wei.
    pub fn new(base_uri: impl Into<String>, price: U256) -> Self {
        let ledger = Ledger {
            base_uri: base_uri.into(),
            price,
            ..Ledger::default()
        };
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            signer: None,
        }
    }

    /// Returns a handle on the same collection that signs as `signer`.
    pub fn with_signer(&self, signer: Address) -> Self {
        Self {
            ledger: self.ledger.clone(),
            signer: Some(signer),
        }
    }

    /// Inserts `token_id` into `owner`'s holdings without emitting any event,
    /// as if it had been acquired before the observation window.
    pub async fn seed_token(&self, owner: Address, token_id: U256) {
        self.ledger.lock().await.record_token(owner, token_id);
    }

    /// The number of transactions submitted through this collection, counting
    /// reverted ones.
    pub async fn submissions(&self) -> u64 {
        self.ledger.lock().await.submissions
    }

    /// How many times `minted_since` was queried.
    pub async fn minted_polls(&self) -> u64 {
        self.ledger.lock().await.minted_polls
    }
}

#[async_trait]
impl CollectionQueries for MemoryCollection {
    async fn balance_of(&self, owner: Address) -> Result<U256, EthereumClientError> {
        let ledger = self.ledger.lock().await;
        let count = ledger.holdings.get(&owner).map_or(0, Vec::len);
        Ok(U256::from(count))
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, EthereumClientError> {
        let ledger = self.ledger.lock().await;
        usize::try_from(index)
            .ok()
            .and_then(|index| ledger.holdings.get(&owner)?.get(index))
            .copied()
            .ok_or_else(|| {
                EthereumClientError::Reverted(
                    "ERC721Enumerable: owner index out of bounds".to_string(),
                )
            })
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, EthereumClientError> {
        let ledger = self.ledger.lock().await;
        ledger.token_uris.get(&token_id).cloned().ok_or_else(|| {
            EthereumClientError::Reverted(
                "ERC721Metadata: URI query for nonexistent token".to_string(),
            )
        })
    }

    async fn transfer_log(&self) -> Result<Vec<TransferRecord>, EthereumClientError> {
        Ok(self.ledger.lock().await.transfers.clone())
    }

    async fn minted_since(&self, from_block: u64) -> Result<Vec<MintRecord>, EthereumClientError> {
        let mut ledger = self.ledger.lock().await;
        ledger.minted_polls += 1;
        Ok(ledger
            .mints
            .iter()
            .filter(|record| record.block_number >= from_block)
            .cloned()
            .collect())
    }

    async fn block_number(&self) -> Result<u64, EthereumClientError> {
        Ok(self.ledger.lock().await.block_number)
    }
}

#[async_trait]
impl CollectionMutations for MemoryCollection {
    async fn mint(&self, value: U256) -> Result<TxConfirmation, EthereumClientError> {
        let signer = self.signer.ok_or(EthereumClientError::NoActiveSigner)?;
        let mut ledger = self.ledger.lock().await;
        ledger.submissions += 1;
        if value != ledger.price {
            return Err(EthereumClientError::Reverted(
                "mint price not paid".to_string(),
            ));
        }
        ledger.block_number += 1;
        let token_id = U256::from(ledger.next_token_id);
        ledger.record_token(signer, token_id);
        let block_number = ledger.block_number;
        ledger.mints.push(MintRecord {
            owner: signer,
            token_id,
            block_number,
        });
        Ok(ledger.confirmation())
    }

    async fn transfer(
        &self,
        token_id: U256,
        to: Address,
    ) -> Result<TxConfirmation, EthereumClientError> {
        let signer = self.signer.ok_or(EthereumClientError::NoActiveSigner)?;
        let mut ledger = self.ledger.lock().await;
        ledger.submissions += 1;
        let holdings = ledger.holdings.entry(signer).or_default();
        let Some(position) = holdings.iter().position(|id| *id == token_id) else {
            return Err(EthereumClientError::Reverted(
                "ERC721: transfer of token that is not own".to_string(),
            ));
        };
        holdings.remove(position);
        ledger.holdings.entry(to).or_default().push(token_id);
        ledger.block_number += 1;
        let block_number = ledger.block_number;
        ledger.transfers.push(TransferRecord {
            token_id,
            from: signer,
            to,
            block_number,
        });
        Ok(ledger.confirmation())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn price() -> U256 {
        U256::from(10_000_000_000_000_000u64)
    }

    #[tokio::test]
    async fn test_mutations_require_signer() {
        let collection = MemoryCollection::new("ipfs://base/", price());
        assert_matches!(
            collection.mint(price()).await,
            Err(EthereumClientError::NoActiveSigner)
        );
        assert_matches!(
            collection
                .transfer(U256::from(0), Address::repeat_byte(0x11))
                .await,
            Err(EthereumClientError::NoActiveSigner)
        );
        assert_eq!(collection.submissions().await, 0);
    }

    #[tokio::test]
    async fn test_enumeration_follows_acquisition_order() {
        let owner = Address::repeat_byte(0xAA);
        let collection = MemoryCollection::new("ipfs://base/", price());
        collection.seed_token(owner, U256::from(3)).await;
        collection.seed_token(owner, U256::from(7)).await;

        assert_eq!(collection.balance_of(owner).await.unwrap(), U256::from(2));
        assert_eq!(
            collection
                .token_of_owner_by_index(owner, U256::from(0))
                .await
                .unwrap(),
            U256::from(3)
        );
        assert_eq!(
            collection
                .token_of_owner_by_index(owner, U256::from(1))
                .await
                .unwrap(),
            U256::from(7)
        );
        assert_matches!(
            collection
                .token_of_owner_by_index(owner, U256::from(2))
                .await,
            Err(EthereumClientError::Reverted(_))
        );
    }

    #[tokio::test]
    async fn test_mint_continues_after_seeded_ids() {
        let owner = Address::repeat_byte(0xAA);
        let collection = MemoryCollection::new("ipfs://base/", price());
        collection.seed_token(owner, U256::from(7)).await;

        let signing = collection.with_signer(owner);
        let confirmation = signing.mint(price()).await.unwrap();
        assert_eq!(confirmation.block_number, 1);

        let minted = collection.minted_since(0).await.unwrap();
        assert_eq!(minted.len(), 1);
        assert_eq!(minted[0].token_id, U256::from(8));
        assert_eq!(minted[0].owner, owner);
        assert_eq!(
            collection.token_uri(U256::from(8)).await.unwrap(),
            "ipfs://base/8"
        );
    }

    #[tokio::test]
    async fn test_underpaid_mint_reverts_but_counts_as_submission() {
        let owner = Address::repeat_byte(0xAA);
        let collection = MemoryCollection::new("ipfs://base/", price());
        let signing = collection.with_signer(owner);

        assert_matches!(
            signing.mint(U256::from(1)).await,
            Err(EthereumClientError::Reverted(message)) if message.contains("price")
        );
        assert_eq!(collection.submissions().await, 1);
        assert_eq!(collection.balance_of(owner).await.unwrap(), U256::ZERO);
    }

    #[tokio::test]
    async fn test_transfer_moves_ownership_and_logs_event() {
        let alice = Address::repeat_byte(0xAA);
        let bob = Address::repeat_byte(0xBB);
        let collection = MemoryCollection::new("ipfs://base/", price());
        collection.seed_token(alice, U256::from(3)).await;

        let signing = collection.with_signer(alice);
        let confirmation = signing.transfer(U256::from(3), bob).await.unwrap();
        assert_eq!(confirmation.block_number, 1);

        assert_eq!(collection.balance_of(alice).await.unwrap(), U256::ZERO);
        assert_eq!(collection.balance_of(bob).await.unwrap(), U256::from(1));

        let log = collection.transfer_log().await.unwrap();
        assert_eq!(
            log,
            vec![TransferRecord {
                token_id: U256::from(3),
                from: alice,
                to: bob,
                block_number: 1,
            }]
        );
    }

    #[tokio::test]
    async fn test_transfer_of_unowned_token_reverts() {
        let alice = Address::repeat_byte(0xAA);
        let bob = Address::repeat_byte(0xBB);
        let collection = MemoryCollection::new("ipfs://base/", price());
        collection.seed_token(bob, U256::from(3)).await;

        let signing = collection.with_signer(alice);
        assert_matches!(
            signing.transfer(U256::from(3), bob).await,
            Err(EthereumClientError::Reverted(_))
        );
        assert!(collection.transfer_log().await.unwrap().is_empty());
    }
}
