// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Resolution of token metadata documents behind `ipfs://` URIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The URI scheme rewritten to an HTTP gateway before fetching.
pub const IPFS_SCHEME: &str = "ipfs://";

#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata document could not be fetched
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("metadata fetch of {uri} returned status {status}")]
    Status {
        uri: String,
        status: reqwest::StatusCode,
    },

    /// The metadata document was not valid JSON of the expected shape
    #[error("malformed metadata document: {0}")]
    Json(#[from] serde_json::Error),
}

/// One descriptive trait of a token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// The off-chain metadata document of a token.
///
/// `name`, `description` and `image` are required; a document missing any of
/// them is rejected as malformed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<TokenAttribute>,
}

/// Rewrites an `ipfs://` URI to its HTTP gateway form. Any other URI is
/// returned unchanged, so the rewrite is idempotent.
pub fn rewrite_uri(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix(IPFS_SCHEME) {
        Some(path) => format!("{}{}", gateway, path),
        None => uri.to_string(),
    }
}

/// Resolution of token URIs into [`TokenMetadata`].
#[async_trait]
pub trait MetadataFetcher {
    /// Rewrites `uri` into the form this fetcher actually requests.
    fn rewrite(&self, uri: &str) -> String;

    /// Fetches and parses the metadata document behind `uri`. The `image`
    /// field of the result is already rewritten to a fetchable URL.
    async fn resolve(&self, uri: &str) -> Result<TokenMetadata, MetadataError>;
}

/// A [`MetadataFetcher`] going through a public HTTP gateway.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    gateway: String,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(gateway: impl Into<String>) -> Self {
        let http = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            gateway: gateway.into(),
            http,
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }
}

#[async_trait]
impl MetadataFetcher for GatewayClient {
    fn rewrite(&self, uri: &str) -> String {
        rewrite_uri(uri, &self.gateway)
    }

    async fn resolve(&self, uri: &str) -> Result<TokenMetadata, MetadataError> {
        let url = self.rewrite(uri);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MetadataError::Status {
                uri: url,
                status: response.status(),
            });
        }
        let body = response.bytes().await?;
        let mut metadata: TokenMetadata = serde_json::from_slice(&body)?;
        metadata.image = self.rewrite(&metadata.image);
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::config::DEFAULT_IPFS_GATEWAY;

    #[test_case(
        "ipfs://bafybeihq/3.json",
        "https://ipfs.io/ipfs/bafybeihq/3.json"
        ; "ipfs scheme is rewritten")]
    #[test_case(
        "https://example.com/3.json",
        "https://example.com/3.json"
        ; "https is untouched")]
    #[test_case(
        "https://ipfs.io/ipfs/bafybeihq/3.json",
        "https://ipfs.io/ipfs/bafybeihq/3.json"
        ; "already rewritten is untouched")]
    #[test_case("", "" ; "empty is untouched")]
    fn test_rewrite_uri(input: &str, expected: &str) {
        assert_eq!(rewrite_uri(input, DEFAULT_IPFS_GATEWAY), expected);
    }

    #[test]
    fn test_rewrite_only_strips_the_scheme_prefix() {
        // A URI merely mentioning the scheme later on is not an IPFS URI.
        let uri = "https://example.com/?source=ipfs://bafybeihq";
        assert_eq!(rewrite_uri(uri, DEFAULT_IPFS_GATEWAY), uri);
    }

    #[test]
    fn test_metadata_document_parsing() {
        let document = serde_json::json!({
            "name": "Punk #3",
            "description": "A punk for members.",
            "image": "ipfs://bafybeihq/3.png",
            "attributes": [
                { "trait_type": "hair", "value": "green" },
                { "trait_type": "level", "value": 2 },
            ],
        });
        let metadata: TokenMetadata = serde_json::from_value(document).unwrap();
        assert_eq!(metadata.name, "Punk #3");
        assert_eq!(metadata.attributes.len(), 2);
        assert_eq!(metadata.attributes[0].trait_type, "hair");
    }

    #[test]
    fn test_metadata_without_attributes_parses() {
        let document = serde_json::json!({
            "name": "Punk #3",
            "description": "A punk for members.",
            "image": "ipfs://bafybeihq/3.png",
        });
        let metadata: TokenMetadata = serde_json::from_value(document).unwrap();
        assert!(metadata.attributes.is_empty());
    }

    #[test]
    fn test_metadata_missing_required_field_is_rejected() {
        let document = serde_json::json!({
            "name": "Punk #3",
            "description": "A punk for members.",
        });
        assert!(serde_json::from_value::<TokenMetadata>(document).is_err());
    }
}
