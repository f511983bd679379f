use crate::client::jsonrpc::JsonRpcHttpTransport;
use crate::error::{PropsError, Result};
use crate::types::{Address, AssetId, Bytes32, ContractId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Assets forwarded with a contract call
#[derive(Debug, Clone, Serialize)]
pub struct CallForward {
    pub amount: u64,
    pub asset_id: AssetId,
}

/// One contract call ready for submission
#[derive(Debug, Clone, Serialize)]
pub struct ContractCall {
    pub contract_id: ContractId,
    pub function: String,
    pub args: Value,
    pub caller: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<CallForward>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

/// Deployment request for one of the known contract programs
#[derive(Debug, Clone, Serialize)]
pub struct ContractDeployment {
    /// Which program to deploy, e.g. `props721_edition`
    pub program: String,
    pub salt: Bytes32,
    pub configurables: Value,
    pub owner: Address,
}

/// Response to a deployment request
#[derive(Debug, Clone, Deserialize)]
pub struct DeployResponse {
    pub contract_id: ContractId,
    pub transaction_id: String,
}

/// Status of a submitted transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub enum TransactionStatus {
    Submitted,
    Success {
        #[serde(default)]
        block_height: Option<u64>,
    },
    Failure {
        reason: String,
    },
}

/// A cleared transaction
#[derive(Debug, Clone)]
pub struct TransactionSummary {
    pub id: String,
    pub block_height: Option<u64>,
}

/// Default time to wait for a transaction to clear
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Client for a network node.
///
/// Contract execution, fee distribution and proof verification all happen
/// behind this boundary; the client only shapes requests and waits on
/// transaction results.
#[derive(Debug, Clone)]
pub struct NodeClient {
    transport: JsonRpcHttpTransport,
}

impl NodeClient {
    /// Create a new client for the given node URL
    pub fn new(url: String) -> Result<Self> {
        Ok(Self {
            transport: JsonRpcHttpTransport::new(url)?,
        })
    }

    /// The node URL
    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// The shared HTTP client, for plain document fetches
    pub fn http_client(&self) -> &reqwest::Client {
        self.transport.http_client()
    }

    /// Read a contract view function without submitting a transaction
    pub async fn contract_read(
        &self,
        contract_id: &ContractId,
        function: &str,
        args: Value,
    ) -> Result<Value> {
        self.transport
            .send_request(
                "contract_read",
                json!({
                    "contract_id": contract_id,
                    "function": function,
                    "args": args,
                }),
            )
            .await
    }

    /// Submit a contract call, returning the transaction id
    pub async fn contract_call(&self, call: &ContractCall) -> Result<String> {
        let response = self
            .transport
            .send_request("contract_call", serde_json::to_value(call)?)
            .await?;

        response["transaction_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PropsError::Network("Missing transaction id".to_string()))
    }

    /// Deploy a contract program
    pub async fn deploy_contract(&self, deployment: &ContractDeployment) -> Result<DeployResponse> {
        let response = self
            .transport
            .send_request("deploy_contract", serde_json::to_value(deployment)?)
            .await?;
        serde_json::from_value(response).map_err(PropsError::Json)
    }

    /// Query the status of a transaction
    pub async fn transaction_status(&self, transaction_id: &str) -> Result<TransactionStatus> {
        let response = self
            .transport
            .send_request(
                "transaction_status",
                json!({ "transaction_id": transaction_id }),
            )
            .await?;
        serde_json::from_value(response).map_err(PropsError::Json)
    }

    /// Poll until a transaction clears, fails, or the timeout elapses.
    ///
    /// A failed transaction surfaces as `TransactionFailed`; the poll itself
    /// does not retry submission.
    pub async fn wait_for_transaction(
        &self,
        transaction_id: &str,
        timeout: Duration,
    ) -> Result<TransactionSummary> {
        let start = std::time::Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(PropsError::Timeout(timeout.as_secs()));
            }

            match self.transaction_status(transaction_id).await {
                Ok(TransactionStatus::Success { block_height }) => {
                    return Ok(TransactionSummary {
                        id: transaction_id.to_string(),
                        block_height,
                    });
                }
                Ok(TransactionStatus::Failure { reason }) => {
                    return Err(PropsError::TransactionFailed(reason));
                }
                Ok(TransactionStatus::Submitted) => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(e) => {
                    tracing::debug!("Error polling transaction status: {}", e);
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
    }

    /// The network's base asset id
    pub async fn base_asset_id(&self) -> Result<AssetId> {
        let response = self.transport.send_request("base_asset_id", json!({})).await?;
        serde_json::from_value(response).map_err(PropsError::Json)
    }

    /// Current block height
    pub async fn block_height(&self) -> Result<u64> {
        let response = self.transport.send_request("block_height", json!({})).await?;
        response["block_height"]
            .as_u64()
            .ok_or_else(|| PropsError::Network("Malformed block height".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_call_serialization() {
        let call = ContractCall {
            contract_id: ContractId::new([1u8; 32]),
            function: "mint".to_string(),
            args: json!([1, 2]),
            caller: Address::new(Bytes32::new([2u8; 32])),
            forward: Some(CallForward {
                amount: 500,
                asset_id: AssetId::ZERO,
            }),
            gas_limit: Some(1_000_000),
        };

        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["function"], "mint");
        assert_eq!(value["forward"]["amount"], 500);
        assert_eq!(value["gas_limit"], 1_000_000);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let call = ContractCall {
            contract_id: ContractId::new([1u8; 32]),
            function: "set_merkle".to_string(),
            args: json!([]),
            caller: Address::new(Bytes32::new([2u8; 32])),
            forward: None,
            gas_limit: None,
        };

        let value = serde_json::to_value(&call).unwrap();
        assert!(value.get("forward").is_none());
        assert!(value.get("gas_limit").is_none());
    }

    #[test]
    fn test_transaction_status_deserialization() {
        let success: TransactionStatus =
            serde_json::from_str(r#"{"status":"Success","block_height":10}"#).unwrap();
        assert!(matches!(
            success,
            TransactionStatus::Success {
                block_height: Some(10)
            }
        ));

        let failure: TransactionStatus =
            serde_json::from_str(r#"{"status":"Failure","reason":"OutsideMintingPeriod"}"#)
                .unwrap();
        assert!(matches!(failure, TransactionStatus::Failure { .. }));

        let submitted: TransactionStatus =
            serde_json::from_str(r#"{"status":"Submitted"}"#).unwrap();
        assert!(matches!(submitted, TransactionStatus::Submitted));
    }
}
