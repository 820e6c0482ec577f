// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The lifecycle of the wallet attached to a client.

use alloy::{
    primitives::Address,
    signers::local::{LocalSignerError, PrivateKeySigner},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    /// An operation needed a connected wallet
    #[error("no wallet connected: pass a private key to authorize this operation")]
    MissingWallet,

    /// The supplied private key could not be parsed
    #[error("invalid wallet key: {0}")]
    InvalidKey(#[from] LocalSignerError),
}

/// Where the wallet connection currently stands.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SessionStatus {
    /// No wallet is attached.
    #[default]
    Disconnected,
    /// A wallet is being attached.
    Connecting,
    /// A wallet is attached and `address` signs for it.
    Connected { address: Address },
}

/// The wallet connection of a single client.
#[derive(Debug, Default)]
pub struct AccountSession {
    status: SessionStatus,
}

impl AccountSession {
    /// Creates a disconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already connected as `address`, for wallets whose
    /// signer is managed elsewhere.
    pub fn connected(address: Address) -> Self {
        Self {
            status: SessionStatus::Connected { address },
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.status, SessionStatus::Connected { .. })
    }

    /// The connected address, if any.
    pub fn address(&self) -> Option<Address> {
        match self.status {
            SessionStatus::Connected { address } => Some(address),
            _ => None,
        }
    }

    /// Parses `private_key` and attaches the resulting signer to this session.
    /// On failure the session falls back to `Disconnected`.
    pub fn connect(&mut self, private_key: &str) -> Result<PrivateKeySigner, ConnectionError> {
        self.status = SessionStatus::Connecting;
        match private_key.trim().parse::<PrivateKeySigner>() {
            Ok(signer) => {
                self.status = SessionStatus::Connected {
                    address: signer.address(),
                };
                Ok(signer)
            }
            Err(error) => {
                self.status = SessionStatus::Disconnected;
                Err(ConnectionError::InvalidKey(error))
            }
        }
    }

    /// Detaches the wallet.
    pub fn disconnect(&mut self) {
        self.status = SessionStatus::Disconnected;
    }
}
