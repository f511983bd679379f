use props_fuels::contract::ContractConfiguration;
use props_fuels::edition::EditionCreateOptions;
use props_fuels::types::{Address, NftMetadata};
use props_fuels::{PropsConfiguration, PropsSdk};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    props_fuels::init();

    let sdk = PropsSdk::new(PropsConfiguration::new("testnet"))?;

    sdk.events.subscribe(|event| {
        println!(
            "[{}] {} ({}/{})",
            event.kind, event.message, event.transaction_index, event.transaction_count
        );
    });

    let owner: Address =
        "0x09c0b2d1a486c439a87bcba6b46a7a1a23f3897cc83a94521a96da5dfdb4c13e".parse()?;

    let mut config = ContractConfiguration::new(owner);
    config.max_supply = Some(100);

    let edition = sdk
        .editions
        .create(
            sdk.node(),
            EditionCreateOptions {
                name: "Demo Edition".to_string(),
                symbol: "DEMO".to_string(),
                metadata: NftMetadata {
                    name: "Demo Edition".to_string(),
                    description: "A demo edition".to_string(),
                    image: "ipfs://bafyimage".to_string(),
                    ..Default::default()
                },
                price: Some(1_000),
                start_date_ms: None,
                end_date_ms: None,
                config,
            },
        )
        .await?;

    println!("Created edition at {}", edition.id());

    let result = edition.mint(&owner.to_hex(), 1, None).await?;
    println!("Minted in transaction {}", result.id);

    Ok(())
}
