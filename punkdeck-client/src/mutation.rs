// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Submission of mint and transfer transactions.
//!
//! Inputs are validated before anything is sent; a rejected input never
//! reaches the chain.

use alloy::primitives::{Address, U256};
use thiserror::Error;

use punkdeck_ethereum::{
    client::CollectionMutations,
    common::{EthereumClientError, TxConfirmation},
};

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The recipient field was left empty
    #[error("enter a valid recipient address")]
    EmptyRecipient,

    /// The recipient is not a hex-encoded address
    #[error("recipient is not a valid address: {0}")]
    InvalidRecipient(#[from] alloy::primitives::hex::FromHexError),
}

#[derive(Debug, Error)]
pub enum MintError {
    /// The transaction could not be submitted or confirmed
    #[error("mint failed: {0}")]
    Chain(#[from] EthereumClientError),
}

#[derive(Debug, Error)]
pub enum TransferError {
    /// The recipient did not pass validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transaction could not be submitted or confirmed
    #[error("transfer failed: {0}")]
    Chain(#[from] EthereumClientError),
}

/// Checks a recipient string before any transaction is built from it.
pub fn parse_recipient(input: &str) -> Result<Address, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRecipient);
    }
    Ok(trimmed.parse()?)
}

/// Mints the next token to the connected signer, attaching `value` wei, and
/// waits for the transaction to be confirmed.
pub async fn mint<C>(chain: &C, value: U256) -> Result<TxConfirmation, MintError>
where
    C: CollectionMutations + Sync + ?Sized,
{
    Ok(chain.mint(value).await?)
}

/// Validates `recipient`, transfers `token_id` to it and waits for the
/// transaction to be confirmed.
pub async fn transfer<C>(
    chain: &C,
    token_id: U256,
    recipient: &str,
) -> Result<TxConfirmation, TransferError>
where
    C: CollectionMutations + Sync + ?Sized,
{
    let to = parse_recipient(recipient)?;
    Ok(chain.transfer(token_id, to).await?)
}
