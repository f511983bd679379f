//! # Props SDK for Rust
//!
//! SDK for creating and minting NFT editions and collections on the Fuel
//! network: deploy contracts, build transaction parameters, wait for
//! transaction results, and shape responses into domain objects.
//!
//! ## Features
//!
//! - Edition and collection deployment, minting and airdrops
//! - Merkle allowlists for gated minting, with per-address inclusion proofs
//! - Async node client with transaction polling
//! - GraphQL chain queries for enumerating deployed contracts
//! - Lifecycle events broadcast over an injectable bus
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use props_fuels::allowlist::{create_allowlist, AllowlistAllocation};
//! use props_fuels::contract::PropsContract;
//! use props_fuels::{PropsConfiguration, PropsSdk};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdk = PropsSdk::new(PropsConfiguration::new("testnet"))?;
//!
//!     // Build an allowlist and commit it to a deployed edition
//!     let entries = vec![AllowlistAllocation {
//!         address: "0x7e2becd64adba192cb1ae3431074f654dca2a419f8e5e283f811e36825dbfa1d"
//!             .to_string(),
//!         amount: 3,
//!     }];
//!     let created = create_allowlist(&entries)?;
//!
//!     // Publish `created.allowlist` as JSON at a URI of your choosing,
//!     // then store the root and URI on-chain in one update:
//!     let contract = PropsContract::connected(
//!         "0x386162f4c6bbec1c5d868b1e7c67068c9854e09b3338c4adb221ff488140456e".parse()?,
//!         sdk.node().clone(),
//!         "0x09c0b2d1a486c439a87bcba6b46a7a1a23f3897cc83a94521a96da5dfdb4c13e".parse()?,
//!     );
//!     contract
//!         .set_allowlist(created.root, "ipfs://bafyALLOWLIST")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod allowlist;
pub mod client;
pub mod collection;
pub mod contract;
pub mod edition;
pub mod error;
pub mod events;
pub mod merkle;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use allowlist::{Allowlist, AllowlistAllocation, AllowlistEntry, CreatedAllowlist};
pub use client::{GraphQlClient, NodeClient};
pub use collection::{Collection, CollectionCreateOptions, CollectionManager};
pub use contract::{ContractConfiguration, MintResult, PropsContract};
pub use edition::{Edition, EditionCreateOptions, EditionManager};
pub use error::{PropsError, Result};
pub use events::{EventBus, EventKind, SdkEvent};
pub use types::{Address, Bytes32, ContractId, Network, NftMetadata};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the SDK (sets up logging if enabled)
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// SDK configuration
#[derive(Debug, Clone)]
pub struct PropsConfiguration {
    /// The network to connect to, identified by its unique id
    pub network: String,
    /// API key to authenticate requests; a rate-limited default is used
    /// when none is supplied
    pub api_key: Option<String>,
}

impl PropsConfiguration {
    /// Create a configuration for the given network id
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            api_key: None,
        }
    }
}

impl Default for PropsConfiguration {
    fn default() -> Self {
        Self::new("testnet")
    }
}

/// Core entry point: managers, event bus and network clients in one place.
#[derive(Debug)]
pub struct PropsSdk {
    /// The edition manager instance
    pub editions: EditionManager,
    /// The collection manager instance
    pub collections: CollectionManager,
    /// The event bus shared by the managers
    pub events: EventBus,
    network: Network,
    node: NodeClient,
    graphql: Option<GraphQlClient>,
}

impl PropsSdk {
    /// Create an SDK instance for a supported network
    pub fn new(configuration: PropsConfiguration) -> Result<Self> {
        let network = types::resolve_network(&configuration.network)?;
        let node = NodeClient::new(network.url.clone())?;
        let graphql = network
            .graphql_url
            .as_ref()
            .map(|url| GraphQlClient::new(url.clone()))
            .transpose()?;

        let events = EventBus::new();

        Ok(Self {
            editions: EditionManager::new(events.clone()),
            collections: CollectionManager::new(events.clone()),
            events,
            network,
            node,
            graphql,
        })
    }

    /// The network configuration
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The node client
    pub fn node(&self) -> &NodeClient {
        &self.node
    }

    /// The GraphQL client, when the network exposes an endpoint
    pub fn graphql(&self) -> Option<&GraphQlClient> {
        self.graphql.as_ref()
    }

    /// Check the health of the currently connected network
    pub async fn health(&self) -> Result<bool> {
        let graphql = self.graphql.as_ref().ok_or_else(|| {
            PropsError::GraphQl("GraphQL URL is not available for this network".to_string())
        })?;
        graphql.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_construction_on_supported_network() {
        let sdk = PropsSdk::new(PropsConfiguration::new("testnet")).unwrap();
        assert_eq!(sdk.network().id, "testnet");
        assert!(sdk.graphql().is_some());
    }

    #[test]
    fn test_sdk_rejects_unknown_network() {
        let err = PropsSdk::new(PropsConfiguration::new("beta-9")).unwrap_err();
        assert!(matches!(err, PropsError::UnsupportedNetwork { .. }));
    }

    #[test]
    fn test_local_network_has_no_graphql() {
        let sdk = PropsSdk::new(PropsConfiguration::new("local")).unwrap();
        assert!(sdk.graphql().is_none());
    }
}
