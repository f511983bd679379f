use crate::client::{
    ContractCall, ContractDeployment, GraphQlClient, NodeClient, DEFAULT_TRANSACTION_TIMEOUT,
};
use crate::contract::ContractConfiguration;
use crate::edition::Edition;
use crate::error::Result;
use crate::events::{EventBus, EventKind, SdkEvent};
use crate::types::network::{tai64_from_unix_ms, DEFAULT_END_DATE, DEFAULT_START_DATE};
use crate::types::{encode_metadata, Address, Bytes32, NftMetadata};
use serde_json::json;

/// Parameters for creating a new edition
#[derive(Debug, Clone)]
pub struct EditionCreateOptions {
    /// The name of the edition to create
    pub name: String,
    /// The symbol of the edition to create
    pub symbol: String,
    /// The metadata shared by every token of the edition
    pub metadata: NftMetadata,
    /// Mint price in the base asset; defaults to free
    pub price: Option<u64>,
    /// Minting window start, Unix milliseconds; defaults to the epoch
    pub start_date_ms: Option<u64>,
    /// Minting window end, Unix milliseconds; defaults to far future
    pub end_date_ms: Option<u64>,
    /// Deploy-time contract configuration
    pub config: ContractConfiguration,
}

/// Creates and enumerates editions.
#[derive(Debug)]
pub struct EditionManager {
    events: EventBus,
}

impl EditionManager {
    /// Create a manager broadcasting on the given bus
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// The event bus this manager broadcasts on
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Deploy and initialize a new edition contract. Two transactions: the
    /// deployment and the constructor call.
    pub async fn create(&self, node: &NodeClient, options: EditionCreateOptions) -> Result<Edition> {
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
                program: "props721_edition".to_string(),
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

        let encoded = encode_metadata(&options.metadata)?;
        let metadata_keys: Vec<&String> = encoded.iter().map(|(key, _)| key).collect();
        let metadata_values: Vec<_> = encoded.iter().map(|(_, value)| value).collect();

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
                metadata_keys,
                metadata_values,
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

        tracing::info!(contract = %deployed.contract_id, "edition created");

        Ok(Edition::connected(
            deployed.contract_id,
            node.clone(),
            owner,
            Some(options.metadata),
        ))
    }

    /// Editions deployed by the given owner. Contract-created outputs are
    /// listed through GraphQL, then each candidate is probed through the
    /// edition interface; contracts that do not answer are skipped.
    pub async fn list(
        &self,
        node: &NodeClient,
        graphql: &GraphQlClient,
        owner: &Address,
    ) -> Result<Vec<Edition>> {
        let contracts = graphql.contracts_created_by_owner(owner).await?;

        let mut editions = Vec::new();
        for contract_id in contracts {
            match Edition::from_contract_id(contract_id, node.clone(), *owner).await {
                Ok(edition) => editions.push(edition),
                Err(e) => {
                    tracing::debug!(contract = %contract_id, "skipping non-edition contract: {}", e);
                }
            }
        }

        Ok(editions)
    }
}
