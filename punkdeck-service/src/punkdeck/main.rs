// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The `punkdeck` terminal client for the Punks collection.

use anyhow::Result;
use clap::Parser as _;
use colored::Colorize as _;
use punkdeck_client::{
    client_context::ClientContext,
    client_options::{ClientCommand, ClientOptions},
    metadata::GatewayClient,
    mint_listener,
    session::AccountSession,
};
use punkdeck_ethereum::client::PunksClient;
use punkdeck_service::views;
use tracing::info;

fn main() -> Result<()> {
    punkdeck_service::tracing::init("punkdeck");
    let options = ClientOptions::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(options))
}

async fn run(options: ClientOptions) -> Result<()> {
    let config = options.chain_config();
    let mut session = AccountSession::new();
    let chain = match &options.private_key {
        Some(private_key) => {
            let signer = session.connect(private_key)?;
            PunksClient::connect_with_signer(
                config.rpc_url.clone(),
                config.contract_address,
                signer,
            )
        }
        None => PunksClient::connect(config.rpc_url.clone(), config.contract_address),
    };
    let metadata = GatewayClient::new(config.gateway.clone());
    let mut context = ClientContext::new(config, chain, metadata, session);

    match options.command {
        ClientCommand::Home => {
            println!(
                "{}",
                views::render_home(&context.config, context.session.status())
            );
        }
        ClientCommand::Holdings { watch } => {
            if context.session.is_connected() {
                context.refresh().await?;
            }
            print_holdings(&context);
            if watch && context.session.is_connected() {
                watch_mints(&mut context).await?;
            }
        }
        ClientCommand::Mint => match context.mint().await {
            Ok(confirmation) => {
                println!(
                    "{}",
                    format!(
                        "Minted in block {} (tx {})",
                        confirmation.block_number, confirmation.transaction_hash
                    )
                    .green()
                    .bold()
                );
                print_holdings(&context);
            }
            Err(error) => println!("{}", error.to_string().red()),
        },
        ClientCommand::Transfer {
            token_id,
            recipient,
        } => match context.transfer(token_id, &recipient).await {
            Ok(confirmation) => {
                println!(
                    "{}",
                    format!(
                        "Transferred punk #{token_id} in block {} (tx {})",
                        confirmation.block_number, confirmation.transaction_hash
                    )
                    .green()
                    .bold()
                );
                print_holdings(&context);
            }
            Err(error) => println!("{}", error.to_string().red()),
        },
        ClientCommand::Transfers => match context.transfer_history().await {
            Ok(records) => println!("{}", views::render_transfer_table(&records)),
            Err(error) => println!("{}", error.to_string().red()),
        },
    }
    Ok(())
}

fn print_holdings(context: &ClientContext<PunksClient, GatewayClient>) {
    println!(
        "{}",
        views::render_collection(context.session.status(), &context.collection)
    );
}

/// Re-renders the holdings whenever the connected wallet mints, until Ctrl-C
/// or the subscription ends.
async fn watch_mints(context: &mut ClientContext<PunksClient, GatewayClient>) -> Result<()> {
    let owner = context.connected_address()?;
    let mut subscription = mint_listener::subscribe_minted(
        context.chain.clone(),
        owner,
        context.config.poll_interval,
    )
    .await?;
    info!("watching for new mints, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("stopping the mint watcher");
                return Ok(());
            }
            record = subscription.next_minted() => {
                let Some(record) = record else { return Ok(()) };
                println!(
                    "{}",
                    format!("Minted punk #{} in block {}", record.token_id, record.block_number)
                        .green()
                        .bold()
                );
                context.refresh().await?;
                print_holdings(context);
            }
        }
    }
}
