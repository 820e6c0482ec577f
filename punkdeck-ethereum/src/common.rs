// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared data types and errors for accessing the collection contract.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EthereumClientError {
    /// RPC transport error
    #[error(transparent)]
    RpcError(#[from] alloy::transports::TransportError),

    /// Contract call or log query error
    #[error(transparent)]
    ContractError(#[from] alloy::contract::Error),

    /// The transaction was dropped before confirmation
    #[error(transparent)]
    PendingTransactionError(#[from] alloy::providers::PendingTransactionError),

    /// The transaction was included in a block but reverted
    #[error("transaction {0} was included in a block but reverted")]
    TransactionFailed(B256),

    /// The contract rejected the call
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// A mutation was attempted on a client connected without a signer
    #[error("no signer is attached to this client")]
    NoActiveSigner,
}

/// The receipt summary of a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfirmation {
    pub transaction_hash: B256,
    pub block_number: u64,
}

/// A single `Transferred` event emitted by the collection contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub token_id: U256,
    pub from: Address,
    pub to: Address,
    pub block_number: u64,
}

/// A single `Minted` event emitted by the collection contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    pub owner: Address,
    pub token_id: U256,
    pub block_number: u64,
}
