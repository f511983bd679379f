pub mod address;
pub mod hex_serde;
pub mod metadata;
pub mod network;
pub mod primitives;

pub use address::Address;
pub use metadata::{decode_metadata, encode_metadata, MetadataValue, NftAttribute, NftMetadata};
pub use network::{default_network, resolve_network, supported_networks, Network};
pub use primitives::{AssetId, Bytes32, ContractId};
