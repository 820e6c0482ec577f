// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use alloy::primitives::{Address, U256};
use assert_matches::assert_matches;
use punkdeck_client::{
    client_context::ClientContext,
    config::{ChainConfig, Network, MINT_PRICE_WEI},
    mint_listener::subscribe_minted,
    mutation::{TransferError, ValidationError},
    session::AccountSession,
    test_utils::{sample_metadata, CannedFetcher},
};
use punkdeck_ethereum::{client::CollectionMutations as _, test_utils::MemoryCollection};

const BASE_URI: &str = "ipfs://bafybeiewvbpr76hwencf3ymwu7muyh3kzim6uiioapvmuou4xe3h5j4njm/";

// The first well-known development key shipped with Anvil and Hardhat.
const DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

async fn canned_documents(fetcher: &CannedFetcher, ids: &[u64]) {
    for id in ids {
        fetcher
            .insert(
                format!("{BASE_URI}{id}"),
                sample_metadata(&format!("Punk #{id}")),
            )
            .await;
    }
}

fn owned_ids<C, M>(context: &ClientContext<C, M>) -> Vec<U256> {
    context
        .collection
        .tokens()
        .expect("holdings are not ready")
        .iter()
        .map(|token| token.id)
        .collect()
}

#[tokio::test]
async fn test_connect_refresh_mint_and_transfer() -> anyhow::Result<()> {
    let chain = MemoryCollection::new(BASE_URI, U256::from(MINT_PRICE_WEI));
    let fetcher = CannedFetcher::new();
    canned_documents(&fetcher, &[3, 7, 8]).await;

    let mut session = AccountSession::new();
    let signer = session.connect(DEV_PRIVATE_KEY)?;
    let alice = signer.address();
    chain.seed_token(alice, U256::from(3)).await;
    chain.seed_token(alice, U256::from(7)).await;

    let mut context = ClientContext::new(
        ChainConfig::for_network(Network::Localnet),
        chain.with_signer(alice),
        fetcher,
        session,
    );

    // The first refresh shows the seeded holdings in enumeration order.
    context.refresh().await?;
    assert_eq!(owned_ids(&context), vec![U256::from(3), U256::from(7)]);

    // Minting appends the next token and refreshes the view on its own.
    let confirmation = context.mint().await?;
    assert_eq!(confirmation.block_number, 1);
    assert_eq!(
        owned_ids(&context),
        vec![U256::from(3), U256::from(7), U256::from(8)]
    );

    // Transferring removes the token from the view and logs the event.
    let bob = Address::repeat_byte(0xBB);
    context.transfer(U256::from(3), &bob.to_string()).await?;
    assert_eq!(owned_ids(&context), vec![U256::from(7), U256::from(8)]);

    let history = context.transfer_history().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].token_id, U256::from(3));
    assert_eq!(history[0].from, alice);
    assert_eq!(history[0].to, bob);
    Ok(())
}

#[tokio::test]
async fn test_rejected_transfer_leaves_holdings_untouched() -> anyhow::Result<()> {
    let alice = Address::repeat_byte(0xAA);
    let chain = MemoryCollection::new(BASE_URI, U256::from(MINT_PRICE_WEI));
    chain.seed_token(alice, U256::from(3)).await;
    let fetcher = CannedFetcher::new();
    canned_documents(&fetcher, &[3]).await;

    let mut context = ClientContext::new(
        ChainConfig::for_network(Network::Localnet),
        chain.with_signer(alice),
        fetcher,
        AccountSession::connected(alice),
    );
    context.refresh().await?;

    let result = context.transfer(U256::from(3), "  ").await;
    assert_matches!(
        result,
        Err(TransferError::Validation(ValidationError::EmptyRecipient))
    );
    // Nothing was submitted and the view still shows the token.
    assert_eq!(chain.submissions().await, 0);
    assert_eq!(owned_ids(&context), vec![U256::from(3)]);
    Ok(())
}

#[tokio::test]
async fn test_watch_picks_up_mints_from_another_handle() -> anyhow::Result<()> {
    let alice = Address::repeat_byte(0xAA);
    let chain = MemoryCollection::new(BASE_URI, U256::from(MINT_PRICE_WEI));
    let fetcher = CannedFetcher::new();
    canned_documents(&fetcher, &[0]).await;

    let mut subscription =
        subscribe_minted(chain.clone(), alice, Duration::from_millis(10)).await?;

    // A mint submitted through a different handle of the same wallet.
    chain
        .with_signer(alice)
        .mint(U256::from(MINT_PRICE_WEI))
        .await?;

    let record = tokio::time::timeout(Duration::from_secs(5), subscription.next_minted())
        .await
        .expect("the poller never reported the mint")
        .expect("the subscription closed early");
    assert_eq!(record.owner, alice);

    // Refreshing after the notification shows the new token.
    let mut context = ClientContext::new(
        ChainConfig::for_network(Network::Localnet),
        chain.with_signer(alice),
        fetcher,
        AccountSession::connected(alice),
    );
    context.refresh().await?;
    assert_eq!(owned_ids(&context), vec![record.token_id]);
    Ok(())
}
