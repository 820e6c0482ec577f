// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The historical log of transfers within the collection.

use punkdeck_ethereum::{client::CollectionQueries, common::TransferRecord};

use crate::collection::FetchError;

/// Returns every transfer the contract ever recorded, from its first block to
/// the latest, oldest first.
pub async fn list_transfers<C>(chain: &C) -> Result<Vec<TransferRecord>, FetchError>
where
    C: CollectionQueries + Sync + ?Sized,
{
    Ok(chain.transfer_log().await?)
}
