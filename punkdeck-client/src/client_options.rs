// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{num::ParseIntError, time::Duration};

use alloy::primitives::{Address, U256};
use url::Url;

use crate::config::{ChainConfig, Network};

fn parse_millis(s: &str) -> Result<Duration, ParseIntError> {
    Ok(Duration::from_millis(s.parse()?))
}

#[derive(Clone, Debug, clap::Parser)]
#[command(
    name = "punkdeck",
    version,
    about = "A terminal client for the Punks NFT collection",
)]
pub struct ClientOptions {
    /// The network hosting the collection contract.
    #[arg(
        long,
        value_enum,
        default_value_t = Network::ArbitrumSepolia,
        env = "PUNKDECK_NETWORK"
    )]
    pub network: Network,

    /// Overrides the JSON-RPC endpoint of the selected network.
    #[arg(long, env = "PUNKDECK_RPC_URL")]
    pub rpc_url: Option<Url>,

    /// Overrides the collection contract address of the selected network.
    #[arg(long, env = "PUNKDECK_CONTRACT_ADDRESS")]
    pub contract_address: Option<Address>,

    /// Overrides the HTTP gateway prefix used to resolve ipfs:// URIs.
    #[arg(long, env = "PUNKDECK_IPFS_GATEWAY")]
    pub gateway: Option<String>,

    /// Hex-encoded private key signing mint and transfer transactions.
    #[arg(long, env = "PUNKDECK_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Interval between polls for new mint events (milliseconds).
    #[arg(long = "poll-interval-ms", default_value = "2000", value_parser = parse_millis)]
    pub poll_interval: Duration,

    /// Subcommand.
    #[command(subcommand)]
    pub command: ClientCommand,
}

impl ClientOptions {
    /// The chain settings of the selected network, with any command line
    /// overrides applied.
    pub fn chain_config(&self) -> ChainConfig {
        let mut config = ChainConfig::for_network(self.network);
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = rpc_url.clone();
        }
        if let Some(contract_address) = self.contract_address {
            config.contract_address = contract_address;
        }
        if let Some(gateway) = &self.gateway {
            config.gateway = gateway.clone();
        }
        config.poll_interval = self.poll_interval;
        config
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
pub enum ClientCommand {
    /// Show the collection overview and the wallet connection state.
    Home,

    /// List the punks owned by the connected wallet.
    Holdings {
        /// Keep running and refresh the list whenever the wallet mints.
        #[arg(long)]
        watch: bool,
    },

    /// Mint the next punk at the collection's fixed price.
    Mint,

    /// Transfer an owned punk to another address.
    Transfer {
        /// Id of the token to transfer.
        token_id: U256,

        /// Recipient address.
        #[arg(long = "to")]
        recipient: String,
    },

    /// Show the historical log of all punk transfers.
    Transfers,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory as _, Parser as _};

    use super::*;
    use crate::config::DEFAULT_IPFS_GATEWAY;

    #[test]
    fn test_command_line_is_well_formed() {
        ClientOptions::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let options = ClientOptions::try_parse_from(["punkdeck", "home"]).unwrap();
        assert_eq!(options.network, Network::ArbitrumSepolia);
        assert_eq!(options.poll_interval, Duration::from_millis(2000));

        let config = options.chain_config();
        assert_eq!(config.network, Network::ArbitrumSepolia);
        assert_eq!(config.gateway, DEFAULT_IPFS_GATEWAY);
    }

    #[test]
    fn test_transfer_arguments() {
        let options = ClientOptions::try_parse_from([
            "punkdeck",
            "transfer",
            "3",
            "--to",
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        ])
        .unwrap();
        match options.command {
            ClientCommand::Transfer {
                token_id,
                recipient,
            } => {
                assert_eq!(token_id, U256::from(3));
                assert_eq!(recipient, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
            }
            command => panic!("parsed into the wrong command: {command:?}"),
        }
    }

    #[test]
    fn test_overrides_apply_to_the_chain_config() {
        let options = ClientOptions::try_parse_from([
            "punkdeck",
            "--network",
            "localnet",
            "--rpc-url",
            "http://node.example:9545",
            "--gateway",
            "https://gateway.example/ipfs/",
            "--poll-interval-ms",
            "250",
            "holdings",
            "--watch",
        ])
        .unwrap();
        let config = options.chain_config();
        assert_eq!(config.network, Network::Localnet);
        assert_eq!(config.rpc_url.as_str(), "http://node.example:9545/");
        assert_eq!(config.gateway, "https://gateway.example/ipfs/");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(matches!(
            options.command,
            ClientCommand::Holdings { watch: true }
        ));
    }
}
