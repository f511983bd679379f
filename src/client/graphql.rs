use crate::client::jsonrpc::DEFAULT_REQUEST_TIMEOUT;
use crate::error::{PropsError, Result};
use crate::types::{Address, ContractId};
use serde_json::{json, Value};

/// Client for a network's GraphQL endpoint, used for chain queries that are
/// not contract calls.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: reqwest::Client,
    url: String,
}

impl GraphQlClient {
    /// Create a new client for the given GraphQL URL
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PropsError::Network(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// The endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute a query and return the raw response document
    pub async fn execute_query(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        let mut body = json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PropsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PropsError::GraphQl(format!(
                "Query failed with status: {}",
                response.status()
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| PropsError::Network(e.to_string()))?;

        if let Some(errors) = document.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return Err(PropsError::GraphQl(errors[0]["message"]
                    .as_str()
                    .unwrap_or("Unknown error")
                    .to_string()));
            }
        }

        Ok(document)
    }

    /// Check the health of the connected network
    pub async fn health(&self) -> Result<bool> {
        let document = self.execute_query("{ health }", None).await?;
        Ok(document["data"]["health"].as_bool().unwrap_or(false))
    }

    /// Contract ids created by transactions of the given owner
    pub async fn contracts_created_by_owner(&self, owner: &Address) -> Result<Vec<ContractId>> {
        let query = r#"
          query Transactions($address: Address) {
            transactionsByOwner(owner: $address, first: 100) {
              nodes {
                id
                outputs {
                  __typename
                  ... on ContractCreated {
                    contract
                  }
                }
              }
            }
          }
        "#;

        let document = self
            .execute_query(query, Some(json!({ "address": owner.to_hex() })))
            .await?;

        let nodes = document["data"]["transactionsByOwner"]["nodes"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut contracts = Vec::new();
        for node in nodes {
            let outputs = node["outputs"].as_array().cloned().unwrap_or_default();
            for output in outputs {
                if output["__typename"] == "ContractCreated" {
                    if let Some(contract) = output["contract"].as_str() {
                        contracts.push(ContractId::from_hex(contract)?);
                    }
                }
            }
        }

        Ok(contracts)
    }
}
