// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the metadata layer.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_lock::Mutex;
use async_trait::async_trait;

use crate::{
    config::DEFAULT_IPFS_GATEWAY,
    metadata::{rewrite_uri, MetadataError, MetadataFetcher, TokenMetadata},
};

/// A [`MetadataFetcher`] serving canned documents keyed by their raw URI.
/// URIs without a document resolve to a not-found error.
#[derive(Default)]
pub struct CannedFetcher {
    documents: Mutex<BTreeMap<String, TokenMetadata>>,
    delays: Mutex<BTreeMap<String, Duration>>,
    resolutions: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `metadata` for the raw `uri`.
    pub async fn insert(&self, uri: impl Into<String>, metadata: TokenMetadata) {
        self.documents.lock().await.insert(uri.into(), metadata);
    }

    /// Delays every resolution of the raw `uri` by `delay`.
    pub async fn set_delay(&self, uri: impl Into<String>, delay: Duration) {
        self.delays.lock().await.insert(uri.into(), delay);
    }

    /// How many resolutions were attempted so far.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    /// The largest number of resolutions that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataFetcher for CannedFetcher {
    fn rewrite(&self, uri: &str) -> String {
        rewrite_uri(uri, DEFAULT_IPFS_GATEWAY)
    }

    async fn resolve(&self, uri: &str) -> Result<TokenMetadata, MetadataError> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        let delay = self.delays.lock().await.get(uri).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let document = self.documents.lock().await.get(uri).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        document.ok_or_else(|| MetadataError::Status {
            uri: self.rewrite(uri),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}

/// A minimal valid metadata document named `name`.
pub fn sample_metadata(name: &str) -> TokenMetadata {
    TokenMetadata {
        name: name.to_string(),
        description: format!("{} of the punks collection", name),
        image: format!("ipfs://punk-images/{}.png", name),
        attributes: Vec::new(),
    }
}
