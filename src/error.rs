use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Failed to fetch allowlist from URI: {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    #[error("Address {0} not found in allowlist")]
    AddressNotFound(String),

    #[error("Merkle URI not found")]
    MerkleUriMissing,

    #[error("Contract or account is not connected")]
    NotConnected,

    #[error("Network {id} is not supported. It must be one of: {supported}")]
    UnsupportedNetwork { id: String, supported: String },

    #[error("Invalid metadata value for key {key}: {reason}")]
    InvalidMetadata { key: String, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON-RPC error: {code}: {message}")]
    JsonRpc { code: i32, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Timeout error: operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, PropsError>;
