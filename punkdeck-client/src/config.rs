// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Chain and gateway settings for the networks the collection is deployed on.

use std::{fmt, time::Duration};

use alloy::primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};
use url::Url;

/// The fixed mint price of the collection, in wei (0.01 ETH).
pub const MINT_PRICE_WEI: u64 = 10_000_000_000_000_000;

/// The public HTTP gateway used to resolve `ipfs://` URIs.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// How often watch mode polls the chain for new `Minted` events.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2_000);

/// The networks the collection contract is deployed on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    /// A local development node.
    Localnet,
    /// The Sepolia testnet.
    Sepolia,
    /// The Arbitrum Sepolia testnet.
    ArbitrumSepolia,
}

impl fmt::Display for Network {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Network::Localnet => "localnet",
            Network::Sepolia => "sepolia",
            Network::ArbitrumSepolia => "arbitrum-sepolia",
        };
        write!(formatter, "{}", name)
    }
}

/// Everything needed to reach the collection contract on one network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// The network the client talks to.
    pub network: Network,
    /// The JSON-RPC endpoint of a node on that network.
    pub rpc_url: Url,
    /// The address of the collection contract.
    pub contract_address: Address,
    /// The HTTP gateway prefix replacing the `ipfs://` scheme.
    pub gateway: String,
    /// The value attached to mint transactions, in wei.
    pub mint_price: U256,
    /// The polling interval used by watch mode.
    pub poll_interval: Duration,
}

impl ChainConfig {
    /// Returns the default settings for `network`.
    pub fn for_network(network: Network) -> Self {
        let (rpc_url, contract_address) = match network {
            Network::Localnet => (
                "http://localhost:8545",
                // The first contract deployed from the default dev account.
                address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            ),
            Network::Sepolia => (
                "https://rpc.sepolia.org",
                address!("f200E2abC665b05b28291C044cB3930f39DacA4B"),
            ),
            Network::ArbitrumSepolia => (
                "https://sepolia-rollup.arbitrum.io/rpc",
                address!("f200E2abC665b05b28291C044cB3930f39DacA4B"),
            ),
        };
        Self {
            network,
            rpc_url: Url::parse(rpc_url).expect("default RPC URLs are valid"),
            contract_address,
            gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            mint_price: U256::from(MINT_PRICE_WEI),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
