//! Publish/fetch round-trip for allowlists: the proof bundle written at
//! creation time must come back byte-identical through a published JSON
//! document, and resolution failures must surface instead of defaulting.

use props_fuels::allowlist::{create_allowlist, AllowlistAllocation};
use props_fuels::client::NodeClient;
use props_fuels::contract::PropsContract;
use props_fuels::error::PropsError;
use props_fuels::types::{Address, ContractId};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

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

fn test_account() -> Address {
    Address::parse(ADDRESS_B).unwrap()
}

fn test_contract_id() -> ContractId {
    ContractId::new([0x11; 32])
}

/// Mount a `merkle_uri` read answering with the given JSON value
async fn mock_merkle_uri(server: &MockServer, uri: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "method": "contract_read",
            "params": { "function": "merkle_uri" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": uri,
            "id": 1
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_published_entry_with_leaf_count() {
    let node_server = MockServer::start().await;
    let host_server = MockServer::start().await;

    let created = create_allowlist(&entries()).unwrap();
    let allowlist_url = format!("{}/allowlist.json", host_server.uri());

    mock_merkle_uri(&node_server, json!(allowlist_url)).await;
    Mock::given(method("GET"))
        .and(path("/allowlist.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created.allowlist))
        .mount(&host_server)
        .await;

    let node = NodeClient::new(node_server.uri()).unwrap();
    let contract = PropsContract::connected(test_contract_id(), node, test_account());

    let resolved = contract.allowlist_entry(ADDRESS_A).await.unwrap();
    assert_eq!(resolved.num_leaves, 2);
    assert_eq!(resolved.entry, created.allowlist[ADDRESS_A]);
    assert_eq!(resolved.entry.amount, 3);
    assert_eq!(resolved.entry.key, 0);

    let allocation = contract.allowlist_allocation(ADDRESS_B).await.unwrap();
    assert_eq!(allocation, 2);
}

#[tokio::test]
async fn published_document_round_trips_proofs_exactly() {
    let created = create_allowlist(&entries()).unwrap();

    // The published form keeps hex-string proofs in leaf-to-root order
    let document = serde_json::to_value(&created.allowlist).unwrap();
    let proof = document[ADDRESS_A]["proof"].as_array().unwrap();
    assert_eq!(proof.len(), 1);
    assert!(proof[0].as_str().unwrap().starts_with("0x"));

    let reparsed: props_fuels::Allowlist = serde_json::from_value(document).unwrap();
    assert_eq!(reparsed, created.allowlist);
}

#[tokio::test]
async fn missing_address_surfaces_not_found() {
    let node_server = MockServer::start().await;
    let host_server = MockServer::start().await;

    let created = create_allowlist(&entries()).unwrap();
    let allowlist_url = format!("{}/allowlist.json", host_server.uri());

    mock_merkle_uri(&node_server, json!(allowlist_url)).await;
    Mock::given(method("GET"))
        .and(path("/allowlist.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created.allowlist))
        .mount(&host_server)
        .await;

    let node = NodeClient::new(node_server.uri()).unwrap();
    let contract = PropsContract::connected(test_contract_id(), node, test_account());

    let err = contract.allowlist_entry(ADDRESS_C).await.unwrap_err();
    match err {
        PropsError::AddressNotFound(address) => assert_eq!(address, ADDRESS_C),
        other => panic!("expected AddressNotFound, got {other}"),
    }
}

#[tokio::test]
async fn fetch_failure_surfaces_instead_of_defaulting() {
    let node_server = MockServer::start().await;
    let host_server = MockServer::start().await;

    let allowlist_url = format!("{}/allowlist.json", host_server.uri());
    mock_merkle_uri(&node_server, json!(allowlist_url)).await;
    Mock::given(method("GET"))
        .and(path("/allowlist.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&host_server)
        .await;

    let node = NodeClient::new(node_server.uri()).unwrap();
    let contract = PropsContract::connected(test_contract_id(), node, test_account());

    let err = contract.allowlist_entry(ADDRESS_A).await.unwrap_err();
    assert!(matches!(err, PropsError::Fetch { .. }));
}

#[tokio::test]
async fn unset_merkle_uri_surfaces_missing() {
    let node_server = MockServer::start().await;
    mock_merkle_uri(&node_server, json!(null)).await;

    let node = NodeClient::new(node_server.uri()).unwrap();
    let contract = PropsContract::connected(test_contract_id(), node, test_account());

    let err = contract.allowlist_entry(ADDRESS_A).await.unwrap_err();
    assert!(matches!(err, PropsError::MerkleUriMissing));
}

#[tokio::test]
async fn disconnected_contract_cannot_resolve() {
    let contract = PropsContract::new(test_contract_id());
    let err = contract.allowlist_entry(ADDRESS_A).await.unwrap_err();
    assert!(matches!(err, PropsError::NotConnected));
}

#[tokio::test]
async fn set_allowlist_commits_root_and_uri_together() {
    let node_server = MockServer::start().await;
    let created = create_allowlist(&entries()).unwrap();

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "method": "contract_call",
            "params": { "function": "set_merkle" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": { "transaction_id": "0xfeed" },
            "id": 1
        })))
        .expect(1)
        .mount(&node_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({ "method": "transaction_status" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": { "status": "Success", "block_height": 42 },
            "id": 1
        })))
        .mount(&node_server)
        .await;

    let node = NodeClient::new(node_server.uri()).unwrap();
    let contract = PropsContract::connected(test_contract_id(), node, test_account());

    let transaction_id = contract
        .set_allowlist(created.root, "ipfs://bafyALLOWLIST")
        .await
        .unwrap();
    assert_eq!(transaction_id, "0xfeed");

    // Root and URI travel in the same update
    let requests = node_server.received_requests().await.unwrap();
    let set_merkle = requests
        .iter()
        .map(|request| serde_json::from_slice::<serde_json::Value>(&request.body).unwrap())
        .find(|body| body["method"] == "contract_call")
        .unwrap();
    let args = &set_merkle["params"]["args"];
    assert_eq!(args[0], json!(created.root.to_hex()));
    assert_eq!(args[1], json!("ipfs://bafyALLOWLIST"));
}
