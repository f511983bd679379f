//! Binary Merkle tree with the hashing rules the minting contracts verify
//! against: `sha256` with domain-separated leaf and node prefixes, and
//! subtrees split at the largest power of two below the leaf count.

mod binary;

pub use binary::{empty_sum, leaf_sum, node_sum, verify, MerkleTree, ProofSet};
