// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Plain-text views of the client state, one renderer per screen.

use alloy::primitives::{utils::format_ether, Address, U256};
use punkdeck_client::{
    collection::{CollectionState, Token},
    config::ChainConfig,
    metadata::TokenAttribute,
    session::SessionStatus,
};
use punkdeck_ethereum::common::TransferRecord;

/// Shortens an address to the `0x1234…abcd` form used across all views.
pub fn format_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// The landing view: where the client points and whether a wallet is
/// connected.
pub fn render_home(config: &ChainConfig, status: &SessionStatus) -> String {
    [
        "Punkdeck".to_string(),
        "A fixed-price punk collection on Ethereum testnets".to_string(),
        String::new(),
        format!("Network:    {}", config.network),
        format!("Contract:   {}", config.contract_address),
        format!("Gateway:    {}", config.gateway),
        format!("Mint price: {} ETH", format_price(config.mint_price)),
        format!("Wallet:     {}", describe_session(status)),
    ]
    .join("\n")
}

/// The holdings view for the current wallet and collection state.
pub fn render_collection(status: &SessionStatus, state: &CollectionState) -> String {
    let SessionStatus::Connected { address } = status else {
        return "Connect your wallet to see your NFTs".to_string();
    };
    match state {
        CollectionState::Loading => "Loading...".to_string(),
        CollectionState::Failed { message } => format!("Error: {message}"),
        CollectionState::Ready { tokens } if tokens.is_empty() => "No NFTs found".to_string(),
        CollectionState::Ready { tokens } => {
            let mut lines = vec![format!(
                "{} punk(s) owned by {}",
                tokens.len(),
                format_address(address)
            )];
            for token in tokens {
                lines.push(String::new());
                lines.extend(render_token(token));
            }
            lines.join("\n")
        }
    }
}

/// The historical transfer log as a table, oldest transfer first.
pub fn render_transfer_table(records: &[TransferRecord]) -> String {
    let mut lines = vec![
        format!(
            "{:<10} | {:<13} | {:<13} | {:<8}",
            "Token Id", "From", "To", "Block"
        ),
        format!("{:-<10}-+-{:-<13}-+-{:-<13}-+-{:-<8}", "", "", "", ""),
    ];
    if records.is_empty() {
        lines.push("No events found".to_string());
    } else {
        for record in records {
            lines.push(format!(
                "{:<10} | {:<13} | {:<13} | {:<8}",
                record.token_id.to_string(),
                format_address(&record.from),
                format_address(&record.to),
                record.block_number
            ));
        }
    }
    lines.join("\n")
}

fn describe_session(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Disconnected => "not connected".to_string(),
        SessionStatus::Connecting => "connecting".to_string(),
        SessionStatus::Connected { address } => {
            format!("connected as {}", format_address(address))
        }
    }
}

fn render_token(token: &Token) -> Vec<String> {
    let mut lines = vec![
        format!("#{}  {}", token.id, token.metadata.name),
        format!("    {}", token.metadata.description),
        format!("    owner: {}", format_address(&token.owner)),
        format!("    image: {}", token.metadata.image),
    ];
    if !token.metadata.attributes.is_empty() {
        let badges = token
            .metadata
            .attributes
            .iter()
            .map(badge)
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("    {badges}"));
    }
    lines
}

fn badge(attribute: &TokenAttribute) -> String {
    match &attribute.value {
        serde_json::Value::String(text) => format!("[{}: {}]", attribute.trait_type, text),
        other => format!("[{}: {}]", attribute.trait_type, other),
    }
}

fn format_price(wei: U256) -> String {
    let ether = format_ether(wei);
    ether.trim_end_matches('0').trim_end_matches('.').to_string()
}
