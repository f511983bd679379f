use crate::error::{PropsError, Result};
use crate::types::primitives::ContractId;
use serde::{Deserialize, Serialize};

/// A supported network endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// The unique identifier for the network
    pub id: String,
    /// The name of the network
    pub name: String,
    /// The URL of the network node
    pub url: String,
    /// The GraphQL URL for the network, if it exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,
}

impl Network {
    fn new(id: &str, name: &str, url: &str, graphql_url: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            graphql_url: graphql_url.map(str::to_string),
        }
    }
}

/// The networks this SDK knows how to reach
pub fn supported_networks() -> Vec<Network> {
    vec![
        Network::new(
            "testnet",
            "Testnet",
            "https://testnet.fuel.network/v1",
            Some("https://testnet.fuel.network/v1/graphql"),
        ),
        Network::new(
            "mainnet",
            "Mainnet",
            "https://mainnet.fuel.network/v1",
            Some("https://mainnet.fuel.network/v1/graphql"),
        ),
        Network::new("local", "Local Node", "http://127.0.0.1:4000", None),
    ]
}

/// The network used when none is configured
pub fn default_network() -> Network {
    Network::new(
        "testnet",
        "Testnet",
        "https://testnet.fuel.network/v1",
        Some("https://testnet.fuel.network/v1/graphql"),
    )
}

/// Look up a network by id, listing the supported ids on failure
pub fn resolve_network(id: &str) -> Result<Network> {
    let networks = supported_networks();
    networks
        .iter()
        .find(|network| network.id == id)
        .cloned()
        .ok_or_else(|| PropsError::UnsupportedNetwork {
            id: id.to_string(),
            supported: networks
                .iter()
                .map(|network| network.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Registry contract address for a network, if deployed there
pub fn registry_contract_address(network_id: &str) -> Option<ContractId> {
    let hex = match network_id {
        "testnet" | "mainnet" => {
            "0xc6e6c19f5a8bc4d505eb0725e4b93b5494bcbf7d53253be303c83a921df9ea70"
        }
        _ => return None,
    };
    ContractId::from_hex(hex).ok()
}

/// Fee splitter contract address for a network, if deployed there
pub fn fee_splitter_contract_address(network_id: &str) -> Option<ContractId> {
    let hex = match network_id {
        "testnet" | "mainnet" => {
            "0xe63564f83a2b82b97ea3f42d1680eeca825e3596b76da197ea4f6f6595810562"
        }
        _ => return None,
    };
    ContractId::from_hex(hex).ok()
}

/// TAI64 label for the Unix epoch (1970-01-01T00:00:00Z)
pub const TAI64_UNIX_EPOCH: u64 = 4611686018427387904;

/// Default minting start date: the Unix epoch
pub const DEFAULT_START_DATE: u64 = 4611686018427387904;

/// Default minting end date: 2099-12-31T23:59:59Z
pub const DEFAULT_END_DATE: u64 = 4764231219200000000;

/// Convert a Unix timestamp in milliseconds to a TAI64 label
pub fn tai64_from_unix_ms(unix_ms: u64) -> u64 {
    TAI64_UNIX_EPOCH + unix_ms / 1000
}
