use props_fuels::allowlist::{create_allowlist, leaf_hash, AllowlistAllocation};
use props_fuels::merkle::verify;
use props_fuels::types::Bytes32;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    props_fuels::init();

    let entries = vec![
        AllowlistAllocation {
            address: "0x7e2becd64adba192cb1ae3431074f654dca2a419f8e5e283f811e36825dbfa1d"
                .to_string(),
            amount: 3,
        },
        AllowlistAllocation {
            address: "0x09c0b2d1a486c439a87bcba6b46a7a1a23f3897cc83a94521a96da5dfdb4c13e"
                .to_string(),
            amount: 2,
        },
    ];

    let created = create_allowlist(&entries)?;
    println!("Merkle root: {}", created.root);
    println!(
        "Publish this document and commit the root on-chain:\n{}",
        serde_json::to_string_pretty(&created.allowlist)?
    );

    // Every entry's proof reconstructs the root
    for allocation in &entries {
        let entry = &created.allowlist[&allocation.address];
        let address = Bytes32::from_hex(&allocation.address)?;
        let leaf = leaf_hash(&address, allocation.amount);
        let ok = verify(
            &created.root,
            leaf.as_bytes(),
            &entry.proof,
            entry.key,
            entries.len() as u64,
        );
        println!("{} verifies: {}", allocation.address, ok);
    }

    Ok(())
}
