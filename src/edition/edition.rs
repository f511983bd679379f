use crate::client::NodeClient;
use crate::contract::{MintResult, PropsContract};
use crate::error::Result;
use crate::types::{decode_metadata, Address, ContractId, MetadataValue, NftMetadata};
use serde_json::json;

/// An edition: one metadata document shared by every minted token.
#[derive(Debug, Clone)]
pub struct Edition {
    /// The deployed edition contract
    pub contract: PropsContract,
    /// Metadata associated with the edition
    pub metadata: Option<NftMetadata>,
}

impl Edition {
    /// Reference an edition by contract id, without a connection
    pub fn new(id: ContractId, metadata: Option<NftMetadata>) -> Self {
        Self {
            contract: PropsContract::new(id),
            metadata,
        }
    }

    /// Reference an edition with a live connection
    pub fn connected(
        id: ContractId,
        node: NodeClient,
        account: Address,
        metadata: Option<NftMetadata>,
    ) -> Self {
        Self {
            contract: PropsContract::connected(id, node, account),
            metadata,
        }
    }

    /// The edition's contract id
    pub fn id(&self) -> ContractId {
        self.contract.id
    }

    /// Connect an account, replacing the current connection
    pub fn connect(&mut self, node: NodeClient, account: Address) {
        self.contract.connect(node, account);
    }

    /// Mint `amount` tokens to `to`, paying price and fees in the base
    /// asset. When an allowlist root is active the recipient's proof bundle
    /// is resolved and submitted with the call; a resolution failure aborts
    /// the mint.
    pub async fn mint(
        &self,
        to: &str,
        amount: u64,
        affiliate: Option<&str>,
    ) -> Result<MintResult> {
        self.contract
            .execute_mint(to, amount, affiliate, "fee_breakdown")
            .await
    }

    /// Owner-only airdrop of `amount` tokens to `to`
    pub async fn airdrop(&self, to: &str, amount: u64) -> Result<MintResult> {
        self.contract.execute_airdrop(to, amount).await
    }

    /// Rebuild an edition entity from a deployed contract, reading its
    /// metadata back from chain state
    pub async fn from_contract_id(
        id: ContractId,
        node: NodeClient,
        account: Address,
    ) -> Result<Self> {
        let contract = PropsContract::connected(id, node.clone(), account);

        let encoded: Vec<(String, MetadataValue)> = serde_json::from_value(
            node.contract_read(&id, "total_metadata", json!([])).await?,
        )?;
        let metadata = decode_metadata(&encoded)?;

        Ok(Self {
            contract,
            metadata: Some(metadata),
        })
    }
}
