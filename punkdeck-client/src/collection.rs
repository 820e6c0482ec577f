// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synchronization of the connected account's holdings.
//!
//! [`fetch_owned_tokens`] walks the contract's enumeration of the account and
//! resolves each token's metadata, with a bounded number of in-flight
//! requests. Results keep the enumeration order regardless of which requests
//! finish first, and any failure fails the whole snapshot rather than leaving
//! gaps in it.

use alloy::primitives::{Address, U256};
use futures::{stream, StreamExt as _, TryStreamExt as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use punkdeck_ethereum::{client::CollectionQueries, common::EthereumClientError};

use crate::metadata::{MetadataFetcher, TokenMetadata};

/// The number of token lookups allowed to run at the same time.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The collection contract could not be queried
    #[error("failed to query the collection contract: {0}")]
    Chain(#[from] EthereumClientError),

    /// A token's metadata document could not be resolved
    #[error("failed to resolve metadata of token {token_id}: {source}")]
    Metadata {
        token_id: U256,
        source: crate::metadata::MetadataError,
    },
}

/// A token owned by the connected account, together with its resolved
/// metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: U256,
    pub owner: Address,
    /// The metadata URI in its fetchable, gateway-rewritten form.
    pub token_uri: String,
    pub metadata: TokenMetadata,
}

/// What the holdings view currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionState {
    /// A refresh is in progress.
    Loading,
    /// The last refresh failed as a whole.
    Failed { message: String },
    /// The last refresh completed.
    Ready { tokens: Vec<Token> },
}

impl CollectionState {
    /// The tokens of the last completed refresh, if any.
    pub fn tokens(&self) -> Option<&[Token]> {
        match self {
            CollectionState::Ready { tokens } => Some(tokens),
            _ => None,
        }
    }

    /// The number of owned tokens currently on display, zero while loading
    /// or failed.
    pub fn owned_count(&self) -> usize {
        self.tokens().map_or(0, |tokens| tokens.len())
    }
}

/// Returns all tokens currently owned by `account`, in the order of the
/// contract's enumeration.
pub async fn fetch_owned_tokens<C, M>(
    chain: &C,
    metadata: &M,
    account: Address,
) -> Result<Vec<Token>, FetchError>
where
    C: CollectionQueries + Sync + ?Sized,
    M: MetadataFetcher + Sync + ?Sized,
{
    let balance = chain.balance_of(account).await?;
    let count = balance.saturating_to::<u64>();
    let tokens = stream::iter(0..count)
        .map(|index| fetch_token_at(chain, metadata, account, index))
        .buffered(MAX_CONCURRENT_FETCHES)
        .try_collect()
        .await?;
    Ok(tokens)
}

async fn fetch_token_at<C, M>(
    chain: &C,
    metadata: &M,
    account: Address,
    index: u64,
) -> Result<Token, FetchError>
where
    C: CollectionQueries + Sync + ?Sized,
    M: MetadataFetcher + Sync + ?Sized,
{
    let token_id = chain
        .token_of_owner_by_index(account, U256::from(index))
        .await?;
    let uri = chain.token_uri(token_id).await?;
    let document = metadata
        .resolve(&uri)
        .await
        .map_err(|source| FetchError::Metadata { token_id, source })?;
    Ok(Token {
        id: token_id,
        owner: account,
        token_uri: metadata.rewrite(&uri),
        metadata: document,
    })
}
