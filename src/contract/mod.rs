//! Shared behavior for contract-bound entities: allowlist publication and
//! resolution, minting, and date windows.

mod config;

pub use config::ContractConfiguration;

use crate::allowlist::{
    create_allowlist, fetch_allowlist, lookup, AllowlistAllocation, CreatedAllowlist,
    ResolvedAllowlistEntry,
};
use crate::client::{
    CallForward, ContractCall, NodeClient, DEFAULT_TRANSACTION_TIMEOUT,
};
use crate::error::{PropsError, Result};
use crate::types::{Address, Bytes32, ContractId};
use serde_json::{json, Value};

/// Gas limit forwarded with state-changing contract calls
const CALL_GAS_LIMIT: u64 = 1_000_000;

/// A node client plus the account acting through it
#[derive(Debug, Clone)]
pub struct ContractConnection {
    pub node: NodeClient,
    pub account: Address,
}

/// Result of a mint or airdrop transaction
#[derive(Debug, Clone)]
pub struct MintResult {
    /// The transaction id
    pub id: String,
    /// Block the transaction cleared in, when the node reports it
    pub block_height: Option<u64>,
}

/// A deployed Props contract, optionally bound to a node and account.
///
/// Reads and transactions require a connection; entities start disconnected
/// when only the contract id is known.
#[derive(Debug, Clone)]
pub struct PropsContract {
    pub id: ContractId,
    connection: Option<ContractConnection>,
}

impl PropsContract {
    /// Reference a contract by id, without a connection
    pub fn new(id: ContractId) -> Self {
        Self {
            id,
            connection: None,
        }
    }

    /// Reference a contract with a live connection
    pub fn connected(id: ContractId, node: NodeClient, account: Address) -> Self {
        Self {
            id,
            connection: Some(ContractConnection { node, account }),
        }
    }

    /// Connect an account, replacing any current connection
    pub fn connect(&mut self, node: NodeClient, account: Address) {
        self.connection = Some(ContractConnection { node, account });
    }

    /// The connected account, if any
    pub fn account(&self) -> Option<&Address> {
        self.connection.as_ref().map(|connection| &connection.account)
    }

    fn connection(&self) -> Result<&ContractConnection> {
        self.connection.as_ref().ok_or(PropsError::NotConnected)
    }

    /// Build a Merkle allowlist from allocations. Pure; the result still has
    /// to be published and committed with [`PropsContract::set_allowlist`].
    pub fn create_allowlist(entries: &[AllowlistAllocation]) -> Result<CreatedAllowlist> {
        create_allowlist(entries)
    }

    /// Commit an allowlist: store its Merkle root and the URI of the
    /// published document in a single on-chain update.
    ///
    /// Re-setting replaces the previous allowlist; proofs generated under
    /// the old root stop verifying.
    pub async fn set_allowlist(&self, root: Bytes32, uri: &str) -> Result<String> {
        let connection = self.connection()?;

        let call = ContractCall {
            contract_id: self.id,
            function: "set_merkle".to_string(),
            args: json!([root, uri]),
            caller: connection.account,
            forward: None,
            gas_limit: None,
        };

        let transaction_id = connection.node.contract_call(&call).await?;
        connection
            .node
            .wait_for_transaction(&transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;
        Ok(transaction_id)
    }

    /// The committed Merkle root. `None` or the zero sentinel both mean
    /// minting is ungated.
    pub async fn merkle_root(&self) -> Result<Option<Bytes32>> {
        let connection = self.connection()?;
        let value = connection
            .node
            .contract_read(&self.id, "merkle_root", json!([]))
            .await?;
        serde_json::from_value(value).map_err(PropsError::Json)
    }

    /// The URI of the published allowlist document, if one was committed
    pub async fn merkle_uri(&self) -> Result<Option<String>> {
        let connection = self.connection()?;
        let value = connection
            .node
            .contract_read(&self.id, "merkle_uri", json!([]))
            .await?;
        serde_json::from_value(value).map_err(PropsError::Json)
    }

    /// Resolve an address's proof bundle from the published allowlist.
    ///
    /// Fetches the document at the contract-reported URI (rewriting
    /// `ipfs://` to a gateway URL) and looks the address up by its exact
    /// string spelling. The root is not re-checked here; consistency is
    /// maintained by committing root and URI together.
    pub async fn allowlist_entry(&self, address: &str) -> Result<ResolvedAllowlistEntry> {
        let connection = self.connection()?;
        let uri = self.merkle_uri().await?.ok_or(PropsError::MerkleUriMissing)?;
        let allowlist = fetch_allowlist(connection.node.http_client(), &uri).await?;
        lookup(&allowlist, address)
    }

    /// The allocation amount for an address in the published allowlist
    pub async fn allowlist_allocation(&self, address: &str) -> Result<u64> {
        let resolved = self.allowlist_entry(address).await?;
        Ok(resolved.entry.amount)
    }

    /// Set the minting window. Timestamps are Unix milliseconds, stored
    /// on-chain as TAI64 labels.
    pub async fn set_dates(&self, start_ms: u64, end_ms: u64) -> Result<String> {
        let connection = self.connection()?;

        let start = crate::types::network::tai64_from_unix_ms(start_ms);
        let end = crate::types::network::tai64_from_unix_ms(end_ms);

        let call = ContractCall {
            contract_id: self.id,
            function: "set_dates".to_string(),
            args: json!([start.to_string(), end.to_string()]),
            caller: connection.account,
            forward: None,
            gas_limit: Some(CALL_GAS_LIMIT),
        };

        let transaction_id = connection.node.contract_call(&call).await?;
        connection
            .node
            .wait_for_transaction(&transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;
        Ok(transaction_id)
    }

    /// Shared mint path. Pays `price * amount` plus the fixed fees, and when
    /// a Merkle root is active resolves the recipient's proof bundle and
    /// submits it with the call. A gating failure aborts the mint; there is
    /// no fallback to an ungated path.
    pub(crate) async fn execute_mint(
        &self,
        to: &str,
        amount: u64,
        affiliate: Option<&str>,
        fees_function: &str,
    ) -> Result<MintResult> {
        let connection = self.connection()?;

        let recipient = Address::parse(to)?;
        let affiliate = affiliate.map(Address::parse).transpose()?;

        let base_asset_id = connection.node.base_asset_id().await?;

        let price: Option<u64> = serde_json::from_value(
            connection
                .node
                .contract_read(&self.id, "price", json!([]))
                .await?,
        )?;
        let price = price.ok_or_else(|| PropsError::Contract("Price not found".to_string()))?;

        let fees: Vec<u64> = serde_json::from_value(
            connection
                .node
                .contract_read(&self.id, fees_function, json!([]))
                .await?,
        )?;
        let total_fees: u64 = fees.iter().sum();

        let total_price = price
            .checked_mul(amount)
            .and_then(|cost| cost.checked_add(total_fees))
            .ok_or_else(|| PropsError::InvalidParameter("Mint price overflow".to_string()))?;

        // Gating: a non-sentinel root means a proof bundle is mandatory
        let root = self.merkle_root().await?;
        let gated = root.map(|root| !root.is_zero()).unwrap_or(false);
        let resolved = if gated {
            Some(self.allowlist_entry(to).await?)
        } else {
            None
        };

        let args = match &resolved {
            Some(resolved) => json!([
                recipient.to_identity_input(),
                Bytes32::ZERO,
                amount,
                affiliate.map(|a| a.to_identity_input()),
                resolved.entry.proof,
                resolved.entry.key,
                resolved.num_leaves,
                resolved.entry.amount,
            ]),
            None => json!([
                recipient.to_identity_input(),
                Bytes32::ZERO,
                amount,
                affiliate.map(|a| a.to_identity_input()),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ]),
        };

        let call = ContractCall {
            contract_id: self.id,
            function: "mint".to_string(),
            args,
            caller: connection.account,
            forward: Some(CallForward {
                amount: total_price,
                asset_id: base_asset_id,
            }),
            gas_limit: Some(CALL_GAS_LIMIT),
        };

        let transaction_id = connection.node.contract_call(&call).await?;
        let summary = connection
            .node
            .wait_for_transaction(&transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;

        tracing::info!(transaction = %summary.id, amount, "mint cleared");

        Ok(MintResult {
            id: summary.id,
            block_height: summary.block_height,
        })
    }

    /// Owner-only airdrop, free of price and gating
    pub(crate) async fn execute_airdrop(&self, to: &str, amount: u64) -> Result<MintResult> {
        let connection = self.connection()?;
        let recipient = Address::parse(to)?;

        let call = ContractCall {
            contract_id: self.id,
            function: "airdrop".to_string(),
            args: json!([recipient.to_identity_input(), amount]),
            caller: connection.account,
            forward: None,
            gas_limit: Some(CALL_GAS_LIMIT),
        };

        let transaction_id = connection.node.contract_call(&call).await?;
        let summary = connection
            .node
            .wait_for_transaction(&transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;

        Ok(MintResult {
            id: summary.id,
            block_height: summary.block_height,
        })
    }

    /// Read a view function returning an optional string, used when probing
    /// whether a contract exposes the Props interface
    pub(crate) async fn read_optional_string(&self, function: &str) -> Result<Option<String>> {
        let connection = self.connection()?;
        let value = connection
            .node
            .contract_read(&self.id, function, json!([]))
            .await?;
        serde_json::from_value(value).map_err(PropsError::Json)
    }
}
