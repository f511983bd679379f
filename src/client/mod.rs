pub mod graphql;
pub mod jsonrpc;
pub mod node;

pub use graphql::GraphQlClient;
pub use jsonrpc::JsonRpcHttpTransport;
pub use node::{
    CallForward, ContractCall, ContractDeployment, DeployResponse, NodeClient, TransactionStatus,
    TransactionSummary, DEFAULT_TRANSACTION_TIMEOUT,
};
