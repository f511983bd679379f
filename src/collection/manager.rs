use crate::client::{ContractCall, ContractDeployment, GraphQlClient, NodeClient, DEFAULT_TRANSACTION_TIMEOUT};
use crate::collection::Collection;
use crate::contract::ContractConfiguration;
use crate::error::Result;
use crate::events::{EventBus, EventKind, SdkEvent};
use crate::types::network::{tai64_from_unix_ms, DEFAULT_END_DATE, DEFAULT_START_DATE};
use crate::types::{Address, Bytes32};
use serde_json::json;

/// Parameters for creating a new collection
#[derive(Debug, Clone)]
pub struct CollectionCreateOptions {
    /// The name of the collection to create
    pub name: String,
    /// The symbol of the collection
    pub symbol: String,
    /// The base URI for the collection's token metadata
    pub base_uri: String,
    /// Mint price in the base asset; defaults to free
    pub price: Option<u64>,
    /// Minting window start, Unix milliseconds; defaults to the epoch
    pub start_date_ms: Option<u64>,
    /// Minting window end, Unix milliseconds; defaults to far future
    pub end_date_ms: Option<u64>,
    /// Deploy-time contract configuration
    pub config: ContractConfiguration,
}

/// Creates and enumerates collections.
#[derive(Debug)]
pub struct CollectionManager {
    events: EventBus,
}

impl CollectionManager {
    /// Create a manager broadcasting on the given bus
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// The event bus this manager broadcasts on
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Deploy and initialize a new collection contract. Two transactions:
    /// the deployment and the constructor call.
    pub async fn create(
        &self,
        node: &NodeClient,
        options: CollectionCreateOptions,
    ) -> Result<Collection> {
        let configurables = options.config.to_configurables()?;
        let owner = options.config.owner;

        self.events.emit(SdkEvent::new(
            EventKind::Transaction,
            "Awaiting transaction approval...",
            1,
            2,
        ));

        let salt = Bytes32::new(rand::random());
        let deployed = node
            .deploy_contract(&ContractDeployment {
                program: "props721_collection".to_string(),
                salt,
                configurables,
                owner,
            })
            .await?;

        self.events.emit(SdkEvent::new(
            EventKind::Pending,
            "Waiting for transaction to clear...",
            1,
            2,
        ));

        node.wait_for_transaction(&deployed.transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;

        self.events.emit(SdkEvent::new(
            EventKind::Transaction,
            "Awaiting transaction approval...",
            2,
            2,
        ));

        let start = options
            .start_date_ms
            .map(tai64_from_unix_ms)
            .unwrap_or(DEFAULT_START_DATE);
        let end = options
            .end_date_ms
            .map(tai64_from_unix_ms)
            .unwrap_or(DEFAULT_END_DATE);

        let call = ContractCall {
            contract_id: deployed.contract_id,
            function: "constructor".to_string(),
            args: json!([
                owner.to_identity_input(),
                options.name,
                options.symbol,
                options.base_uri.clone(),
                options.price.unwrap_or(0),
                start.to_string(),
                end.to_string(),
            ]),
            caller: owner,
            forward: None,
            gas_limit: None,
        };

        let transaction_id = node.contract_call(&call).await?;

        self.events.emit(SdkEvent::new(
            EventKind::Pending,
            "Waiting for transaction to clear...",
            2,
            2,
        ));

        node.wait_for_transaction(&transaction_id, DEFAULT_TRANSACTION_TIMEOUT)
            .await?;

        tracing::info!(contract = %deployed.contract_id, "collection created");

        Ok(Collection::connected(
            deployed.contract_id,
            node.clone(),
            owner,
            Some(options.base_uri),
        ))
    }

    /// Collections deployed by the given owner, probed through the
    /// collection interface; contracts that do not answer are skipped.
    pub async fn list(
        &self,
        node: &NodeClient,
        graphql: &GraphQlClient,
        owner: &Address,
    ) -> Result<Vec<Collection>> {
        let contracts = graphql.contracts_created_by_owner(owner).await?;

        let mut collections = Vec::new();
        for contract_id in contracts {
            match Collection::from_contract_id(contract_id, node.clone(), *owner).await {
                Ok(collection) => collections.push(collection),
                Err(e) => {
                    tracing::debug!(contract = %contract_id, "skipping non-collection contract: {}", e);
                }
            }
        }

        Ok(collections)
    }
}
