use crate::error::{PropsError, Result};
use crate::types::Bytes32;
use sha2::{Digest, Sha256};

/// Domain separation prefix for leaf hashes
const LEAF_PREFIX: u8 = 0x00;

/// Domain separation prefix for internal node hashes
const NODE_PREFIX: u8 = 0x01;

/// Sibling hashes from leaf to root
pub type ProofSet = Vec<Bytes32>;

/// Hash of the empty tree
pub fn empty_sum() -> Bytes32 {
    let hash: [u8; 32] = Sha256::new().finalize().into();
    Bytes32::new(hash)
}

/// Hash of a leaf: `sha256(0x00 || data)`
pub fn leaf_sum(data: &[u8]) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(data);
    let hash: [u8; 32] = hasher.finalize().into();
    Bytes32::new(hash)
}

/// Hash of an internal node: `sha256(0x01 || left || right)`
pub fn node_sum(left: &Bytes32, right: &Bytes32) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    let hash: [u8; 32] = hasher.finalize().into();
    Bytes32::new(hash)
}

/// Largest power of two strictly below `len`. Callers guarantee `len >= 2`.
fn split_point(len: usize) -> usize {
    1 << (usize::BITS - 1 - (len - 1).leading_zeros())
}

/// Root of an ordered slice of leaf hashes
fn subtree_root(leaves: &[Bytes32]) -> Bytes32 {
    match leaves.len() {
        0 => empty_sum(),
        1 => leaves[0],
        len => {
            let mid = split_point(len);
            node_sum(&subtree_root(&leaves[..mid]), &subtree_root(&leaves[mid..]))
        }
    }
}

/// In-memory binary Merkle tree over an ordered sequence of leaves.
///
/// Built once from its leaf data and immutable thereafter; leaves keep the
/// position they were pushed at, which doubles as the proof key.
#[derive(Debug, Clone, Default)]
pub struct MerkleTree {
    leaves: Vec<Bytes32>,
}

impl MerkleTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self { leaves: Vec::new() }
    }

    /// Build a tree from an ordered sequence of leaf data
    pub fn from_leaves<'a, I>(data: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut tree = Self::new();
        for datum in data {
            tree.push(datum);
        }
        tree
    }

    /// Append a leaf. The leaf keeps this position as its proof key.
    pub fn push(&mut self, data: &[u8]) {
        self.leaves.push(leaf_sum(data));
    }

    /// Number of leaves in the tree
    pub fn leaves_count(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Check if the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Compute the root hash
    pub fn root(&self) -> Bytes32 {
        subtree_root(&self.leaves)
    }

    /// Produce the root and the authentication path for the leaf at `key`,
    /// sibling hashes ordered from leaf to root.
    pub fn prove(&self, key: u64) -> Result<(Bytes32, ProofSet)> {
        if key >= self.leaves_count() {
            return Err(PropsError::InvalidParameter(format!(
                "Cannot prove leaf {} in a tree of {} leaves",
                key,
                self.leaves_count()
            )));
        }

        let mut proof = ProofSet::new();
        Self::collect_proof(&self.leaves, key as usize, &mut proof);
        Ok((self.root(), proof))
    }

    fn collect_proof(leaves: &[Bytes32], index: usize, proof: &mut ProofSet) {
        if leaves.len() <= 1 {
            return;
        }
        let mid = split_point(leaves.len());
        if index < mid {
            Self::collect_proof(&leaves[..mid], index, proof);
            proof.push(subtree_root(&leaves[mid..]));
        } else {
            Self::collect_proof(&leaves[mid..], index - mid, proof);
            proof.push(subtree_root(&leaves[..mid]));
        }
    }
}

/// Verify an inclusion proof against a root.
///
/// Mirrors the verification the contracts run on-chain; `num_leaves` is
/// required to reconstruct the tree shape for unbalanced leaf counts.
pub fn verify(
    root: &Bytes32,
    data: &[u8],
    proof_set: &[Bytes32],
    proof_index: u64,
    num_leaves: u64,
) -> bool {
    if proof_index >= num_leaves {
        return false;
    }

    if proof_set.is_empty() {
        return num_leaves == 1 && *root == leaf_sum(data);
    }

    let mut sum = leaf_sum(data);
    let mut height = 1u32;
    let proof_length = proof_set.len() as u32;

    // Climb while the leaf sits inside a complete subtree
    let mut stable_end = proof_index;
    loop {
        let subtree_size = 1u64 << height;
        let subtree_start = proof_index / subtree_size * subtree_size;
        let subtree_end = subtree_start + subtree_size - 1;
        if subtree_end >= num_leaves {
            break;
        }
        stable_end = subtree_end;

        if proof_length < height {
            return false;
        }
        let sibling = &proof_set[(height - 1) as usize];
        if proof_index - subtree_start < (1u64 << (height - 1)) {
            sum = node_sum(&sum, sibling);
        } else {
            sum = node_sum(sibling, &sum);
        }
        height += 1;
    }

    // One right sibling if the subtree is not flush with the last leaf
    if stable_end != num_leaves - 1 {
        if proof_length < height {
            return false;
        }
        sum = node_sum(&sum, &proof_set[(height - 1) as usize]);
        height += 1;
    }

    // Remaining siblings join from the left
    while height - 1 < proof_length {
        sum = node_sum(&proof_set[(height - 1) as usize], &sum);
        height += 1;
    }

    sum == *root
}
