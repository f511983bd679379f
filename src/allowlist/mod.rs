//! Allowlist construction and resolution for gated minting.
//!
//! An allowlist commits a set of `(address, amount)` allocations into a
//! Merkle root. The root goes on-chain; the full mapping, with one inclusion
//! proof per address, is published as a JSON document at a URI. At mint time
//! the proof bundle is resolved back from that document and submitted
//! alongside the mint call for on-chain verification against the root alone.

use crate::error::{PropsError, Result};
use crate::merkle::MerkleTree;
use crate::types::Bytes32;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// One caller-supplied allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistAllocation {
    /// Textual hex address. The exact spelling becomes the published map key.
    pub address: String,
    /// Number of tokens the address may mint
    pub amount: u64,
}

/// Proof bundle for one address in the published document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    /// Number of tokens the address may mint
    pub amount: u64,
    /// Sibling hashes from leaf to root
    pub proof: Vec<Bytes32>,
    /// Position of the entry's leaf in the original input order
    pub key: u64,
}

/// The published document: address spelling -> proof bundle, in input order
pub type Allowlist = IndexMap<String, AllowlistEntry>;

/// Result of building an allowlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAllowlist {
    /// Merkle root committing every allocation
    pub root: Bytes32,
    /// Proof bundles keyed by address, ready to publish
    pub allowlist: Allowlist,
}

/// An entry resolved from a published allowlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAllowlistEntry {
    /// The proof bundle for the queried address
    pub entry: AllowlistEntry,
    /// Total number of leaves in the tree, needed by the on-chain verifier
    pub num_leaves: u64,
}

/// Leaf datum for one allocation: reversed address bytes followed by the
/// amount as 8 bytes little-endian, hashed with sha256. The byte order must
/// match the on-chain verifier exactly; a mismatch breaks proof verification
/// with no client-side error.
pub fn leaf_hash(address: &Bytes32, amount: u64) -> Bytes32 {
    let mut reversed = *address.as_bytes();
    reversed.reverse();

    let mut hasher = Sha256::new();
    hasher.update(reversed);
    hasher.update(amount.to_le_bytes());
    let hash: [u8; 32] = hasher.finalize().into();
    Bytes32::new(hash)
}

fn decode_entry_address(index: usize, address: &str) -> Result<Bytes32> {
    Bytes32::from_hex(address).map_err(|_| PropsError::InvalidEntry {
        index,
        reason: format!("address {} is not a 32-byte hex value", address),
    })
}

/// Build a Merkle allowlist from an ordered list of allocations.
///
/// Pure and deterministic: the same entries in the same order always produce
/// the same root and proofs, and entry order is the proof key. An empty input
/// yields the all-zero root, the same sentinel the contract stores to mean
/// "gating inactive".
pub fn create_allowlist(entries: &[AllowlistAllocation]) -> Result<CreatedAllowlist> {
    // Validate every entry before hashing anything
    let mut addresses = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        addresses.push(decode_entry_address(index, &entry.address)?);
    }

    if entries.is_empty() {
        return Ok(CreatedAllowlist {
            root: Bytes32::ZERO,
            allowlist: Allowlist::new(),
        });
    }

    let mut tree = MerkleTree::new();
    for (entry, address) in entries.iter().zip(&addresses) {
        tree.push(leaf_hash(address, entry.amount).as_bytes());
    }

    let root = tree.root();
    let mut allowlist = Allowlist::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let (_, proof) = tree.prove(index as u64)?;
        allowlist.insert(
            entry.address.clone(),
            AllowlistEntry {
                amount: entry.amount,
                proof,
                key: index as u64,
            },
        );
    }

    Ok(CreatedAllowlist { root, allowlist })
}

/// Build an allowlist from an untyped JSON value, enforcing the input shape
/// before any hashing: the value must be an array, every `address` a string
/// and every `amount` a non-negative integer.
pub fn create_allowlist_from_json(entries: &Value) -> Result<CreatedAllowlist> {
    let items = entries
        .as_array()
        .ok_or_else(|| PropsError::InvalidInput("Entries must be an array".to_string()))?;

    let mut allocations = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let entry = item.as_object().ok_or_else(|| PropsError::InvalidEntry {
            index,
            reason: "entry must be an object".to_string(),
        })?;

        let address = entry
            .get("address")
            .and_then(Value::as_str)
            .ok_or_else(|| PropsError::InvalidEntry {
                index,
                reason: "address must be a string".to_string(),
            })?;

        let amount = entry
            .get("amount")
            .and_then(Value::as_u64)
            .ok_or_else(|| PropsError::InvalidEntry {
                index,
                reason: "amount must be a non-negative integer".to_string(),
            })?;

        allocations.push(AllowlistAllocation {
            address: address.to_string(),
            amount,
        });
    }

    create_allowlist(&allocations)
}

/// Look up an address in a fetched allowlist document. Exact string match;
/// `num_leaves` is the size of the full mapping.
pub fn lookup(allowlist: &Allowlist, address: &str) -> Result<ResolvedAllowlistEntry> {
    let entry = allowlist
        .get(address)
        .cloned()
        .ok_or_else(|| PropsError::AddressNotFound(address.to_string()))?;

    Ok(ResolvedAllowlistEntry {
        entry,
        num_leaves: allowlist.len() as u64,
    })
}

/// Rewrite an `ipfs://` URI to its public gateway form. Every other URI
/// shape is fetched as reported by the contract.
pub fn rewrite_allowlist_uri(uri: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(cid) => format!("https://ipfs.io/ipfs/{}", cid),
        None => uri.to_string(),
    }
}

/// Fetch a published allowlist document. A transport failure or non-success
/// HTTP status surfaces as a `Fetch` error, never as a default document.
pub async fn fetch_allowlist(client: &reqwest::Client, uri: &str) -> Result<Allowlist> {
    let target = rewrite_allowlist_uri(uri);

    let response = client
        .get(&target)
        .send()
        .await
        .map_err(|e| PropsError::Fetch {
            uri: target.clone(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(PropsError::Fetch {
            uri: target,
            reason: format!("HTTP status {}", response.status()),
        });
    }

    response.json().await.map_err(|e| PropsError::Fetch {
        uri: target,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::{leaf_sum, verify};
    use serde_json::json;

    const ADDRESS_A: &str = "0x7e2becd64adba192cb1ae3431074f654dca2a419f8e5e283f811e36825dbfa1d";
    const ADDRESS_B: &str = "0x09c0b2d1a486c439a87bcba6b46a7a1a23f3897cc83a94521a96da5dfdb4c13e";
    const ADDRESS_C: &str = "0xf1e92c42b90934aa6372e30bc568a326f6e66a1a0288595e6e3fbd392a4f3e6e";

    fn entries() -> Vec<AllowlistAllocation> {
        vec![
            AllowlistAllocation {
                address: ADDRESS_A.to_string(),
                amount: 3,
            },
            AllowlistAllocation {
                address: ADDRESS_B.to_string(),
                amount: 2,
            },
        ]
    }

    #[test]
    fn test_leaf_encoding_fixture() {
        // Known-good vector matching the on-chain verifier's encoding:
        // reverse(address) || amount_le8, sha256
        let address = Bytes32::from_hex(ADDRESS_A).unwrap();
        assert_eq!(
            leaf_hash(&address, 3).to_hex(),
            "0x3e289a93a4bf01cb9ccedaebbf15d71397be897db5a2c4d1159dfa0c05e351a4"
        );
    }

    #[test]
    fn test_root_fixture() {
        let created = create_allowlist(&entries()).unwrap();
        assert_eq!(
            created.root.to_hex(),
            "0x0248319f21a53fa1e2745a6c853fb6de5024fe5005a4c2c3eb29a46b6888e288"
        );
    }

    #[test]
    fn test_entries_carry_position_and_amount() {
        let created = create_allowlist(&entries()).unwrap();
        assert_eq!(created.allowlist.len(), 2);

        let a = &created.allowlist[ADDRESS_A];
        assert_eq!(a.amount, 3);
        assert_eq!(a.key, 0);
        assert_eq!(a.proof.len(), 1);

        let b = &created.allowlist[ADDRESS_B];
        assert_eq!(b.amount, 2);
        assert_eq!(b.key, 1);
        assert_eq!(
            b.proof[0].to_hex(),
            "0x8fffda2ab8edbce49bd238bfdd31fac850de16c5c371b1d4461647b639093c85"
        );
    }

    #[test]
    fn test_every_entry_verifies_against_root() {
        let mut all = entries();
        all.push(AllowlistAllocation {
            address: ADDRESS_C.to_string(),
            amount: 5,
        });
        let created = create_allowlist(&all).unwrap();

        for allocation in &all {
            let entry = &created.allowlist[&allocation.address];
            let address = Bytes32::from_hex(&allocation.address).unwrap();
            let leaf = leaf_hash(&address, allocation.amount);
            assert!(verify(
                &created.root,
                leaf.as_bytes(),
                &entry.proof,
                entry.key,
                all.len() as u64,
            ));
        }
    }

    #[test]
    fn test_absent_address_has_no_entry() {
        let created = create_allowlist(&entries()).unwrap();
        assert!(!created.allowlist.contains_key(ADDRESS_C));
        assert!(matches!(
            lookup(&created.allowlist, ADDRESS_C),
            Err(PropsError::AddressNotFound(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let first = create_allowlist(&entries()).unwrap();
        let second = create_allowlist(&entries()).unwrap();
        assert_eq!(first.root, second.root);
        assert_eq!(first.allowlist, second.allowlist);
    }

    #[test]
    fn test_order_sensitivity() {
        let forward = create_allowlist(&entries()).unwrap();
        let mut swapped = entries();
        swapped.reverse();
        let backward = create_allowlist(&swapped).unwrap();

        assert_ne!(forward.root, backward.root);
        assert_eq!(backward.allowlist[ADDRESS_A].key, 1);

        // Old proofs must not verify against the new root
        let entry = &forward.allowlist[ADDRESS_A];
        let address = Bytes32::from_hex(ADDRESS_A).unwrap();
        let leaf = leaf_hash(&address, 3);
        assert!(!verify(
            &backward.root,
            leaf.as_bytes(),
            &entry.proof,
            entry.key,
            2,
        ));
    }

    #[test]
    fn test_empty_input_yields_zero_root() {
        let created = create_allowlist(&[]).unwrap();
        assert_eq!(created.root, Bytes32::ZERO);
        assert!(created.allowlist.is_empty());
    }

    #[test]
    fn test_single_entry_round_trips() {
        let single = vec![AllowlistAllocation {
            address: ADDRESS_A.to_string(),
            amount: 3,
        }];
        let created = create_allowlist(&single).unwrap();
        let entry = &created.allowlist[ADDRESS_A];
        assert!(entry.proof.is_empty());

        let address = Bytes32::from_hex(ADDRESS_A).unwrap();
        let leaf = leaf_hash(&address, 3);
        assert_eq!(created.root, leaf_sum(leaf.as_bytes()));
        assert!(verify(&created.root, leaf.as_bytes(), &entry.proof, 0, 1));
    }

    #[test]
    fn test_rejects_malformed_address_before_hashing() {
        let err = create_allowlist(&[AllowlistAllocation {
            address: "0xabc".to_string(),
            amount: 1,
        }])
        .unwrap_err();
        assert!(matches!(err, PropsError::InvalidEntry { index: 0, .. }));
    }

    #[test]
    fn test_json_input_must_be_array() {
        let err = create_allowlist_from_json(&json!("not-an-array")).unwrap_err();
        assert!(matches!(err, PropsError::InvalidInput(_)));
    }

    #[test]
    fn test_json_entry_field_types_checked() {
        let err =
            create_allowlist_from_json(&json!([{ "address": 123, "amount": 100 }])).unwrap_err();
        assert!(matches!(err, PropsError::InvalidEntry { index: 0, .. }));

        let err = create_allowlist_from_json(&json!([
            { "address": ADDRESS_A, "amount": 3 },
            { "address": ADDRESS_B, "amount": "200" },
        ]))
        .unwrap_err();
        assert!(matches!(err, PropsError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn test_json_round_trip_preserves_proofs() {
        let created = create_allowlist(&entries()).unwrap();
        let published = serde_json::to_string(&created.allowlist).unwrap();
        let parsed: Allowlist = serde_json::from_str(&published).unwrap();
        assert_eq!(parsed, created.allowlist);

        let resolved = lookup(&parsed, ADDRESS_A).unwrap();
        assert_eq!(resolved.num_leaves, 2);
        assert_eq!(resolved.entry, created.allowlist[ADDRESS_A]);
    }

    #[test]
    fn test_uri_rewriting() {
        assert_eq!(
            rewrite_allowlist_uri("ipfs://bafyXYZ"),
            "https://ipfs.io/ipfs/bafyXYZ"
        );
        assert_eq!(
            rewrite_allowlist_uri("https://example.com/allowlist.json"),
            "https://example.com/allowlist.json"
        );
    }
}
