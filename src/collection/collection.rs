use crate::client::NodeClient;
use crate::contract::{MintResult, PropsContract};
use crate::error::Result;
use crate::types::{Address, ContractId, NftMetadata};
use crate::utils::parse_uri;

/// A collection: per-token metadata served from a base URI.
#[derive(Debug, Clone)]
pub struct Collection {
    /// The deployed collection contract
    pub contract: PropsContract,
    /// The base URI for the collection's token metadata
    pub base_uri: Option<String>,
}

impl Collection {
    /// Reference a collection by contract id, without a connection
    pub fn new(id: ContractId, base_uri: Option<String>) -> Self {
        Self {
            contract: PropsContract::new(id),
            base_uri,
        }
    }

    /// Reference a collection with a live connection
    pub fn connected(
        id: ContractId,
        node: NodeClient,
        account: Address,
        base_uri: Option<String>,
    ) -> Self {
        Self {
            contract: PropsContract::connected(id, node, account),
            base_uri,
        }
    }

    /// The collection's contract id
    pub fn id(&self) -> ContractId {
        self.contract.id
    }

    /// Connect an account, replacing the current connection
    pub fn connect(&mut self, node: NodeClient, account: Address) {
        self.contract.connect(node, account);
    }

    /// Mint `amount` tokens to `to`. Gating works exactly as for editions:
    /// an active allowlist root makes the proof bundle mandatory.
    pub async fn mint(
        &self,
        to: &str,
        amount: u64,
        affiliate: Option<&str>,
    ) -> Result<MintResult> {
        self.contract.execute_mint(to, amount, affiliate, "fees").await
    }

    /// Owner-only airdrop of `amount` tokens to `to`
    pub async fn airdrop(&self, to: &str, amount: u64) -> Result<MintResult> {
        self.contract.execute_airdrop(to, amount).await
    }

    /// Fetch up to the first three token metadata documents from the base
    /// URI. Individual fetch failures are skipped, not fatal.
    pub async fn sample_tokens(&self, client: &reqwest::Client) -> Result<Vec<NftMetadata>> {
        let Some(base_uri) = &self.base_uri else {
            return Ok(Vec::new());
        };

        let mut tokens = Vec::new();
        for index in 1..=3u32 {
            let url = parse_uri(&format!("{}{}", base_uri, index));
            let response = match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => response,
                Ok(response) => {
                    tracing::warn!(%url, status = %response.status(), "failed to fetch sample token");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(%url, "error fetching sample token: {}", e);
                    continue;
                }
            };

            match response.json::<NftMetadata>().await {
                Ok(metadata) => tokens.push(metadata),
                Err(e) => tracing::warn!(%url, "malformed sample token metadata: {}", e),
            }
        }

        Ok(tokens)
    }

    /// Rebuild a collection entity from a deployed contract, reading its
    /// base URI back from chain state
    pub async fn from_contract_id(
        id: ContractId,
        node: NodeClient,
        account: Address,
    ) -> Result<Self> {
        let contract = PropsContract::connected(id, node, account);
        let base_uri = contract.read_optional_string("base_uri").await?;
        Ok(Self { contract, base_uri })
    }
}
