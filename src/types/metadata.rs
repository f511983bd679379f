use crate::error::{PropsError, Result};
use crate::types::primitives::Bytes32;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token metadata following the common NFT metadata document shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    /// The name of the NFT
    pub name: String,
    /// The description of the NFT
    pub description: String,
    /// The image URL of the NFT
    pub image: String,
    /// The external URL to the NFT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// The background color of the NFT item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// The URL to a multimedia attachment for the NFT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    /// The URL to a YouTube video associated with the NFT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    /// Attributes associated with the NFT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<NftAttribute>>,
    /// Any further keys are carried through as-is
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A single attribute entry in the metadata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    /// A string or integer value
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u64>,
}

/// Wire representation of one metadata value as the contract stores it.
///
/// The contract accepts a small closed set of shapes; anything else is
/// rejected at this boundary instead of being guessed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Text(String),
    Int(u64),
    RawBytes(#[serde(with = "crate::types::hex_serde")] Vec<u8>),
    Hash(Bytes32),
}

/// Encode a metadata document into ordered `(key, value)` pairs for the
/// contract constructor. JSON objects and arrays are carried as stringified
/// text; booleans, nulls and non-integer numbers have no wire representation
/// and are rejected.
pub fn encode_metadata(metadata: &NftMetadata) -> Result<Vec<(String, MetadataValue)>> {
    let mut encoded = Vec::new();

    encoded.push(("name".to_string(), MetadataValue::Text(metadata.name.clone())));
    encoded.push((
        "description".to_string(),
        MetadataValue::Text(metadata.description.clone()),
    ));
    encoded.push(("image".to_string(), MetadataValue::Text(metadata.image.clone())));

    let optional = [
        ("external_url", &metadata.external_url),
        ("background_color", &metadata.background_color),
        ("animation_url", &metadata.animation_url),
        ("youtube_url", &metadata.youtube_url),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            encoded.push((key.to_string(), MetadataValue::Text(value.clone())));
        }
    }

    if let Some(attributes) = &metadata.attributes {
        let text = serde_json::to_string(attributes)?;
        encoded.push(("attributes".to_string(), MetadataValue::Text(text)));
    }

    for (key, value) in &metadata.extra {
        encoded.push((key.clone(), encode_metadata_value(key, value)?));
    }

    Ok(encoded)
}

/// Encode one free-form JSON value into its wire representation
pub fn encode_metadata_value(key: &str, value: &Value) -> Result<MetadataValue> {
    match value {
        Value::String(s) => Ok(MetadataValue::Text(s.clone())),
        Value::Number(n) => n
            .as_u64()
            .map(MetadataValue::Int)
            .ok_or_else(|| PropsError::InvalidMetadata {
                key: key.to_string(),
                reason: "numbers must be non-negative integers".to_string(),
            }),
        Value::Array(_) | Value::Object(_) => {
            let text = serde_json::to_string(value)?;
            Ok(MetadataValue::Text(text))
        }
        Value::Bool(_) | Value::Null => Err(PropsError::InvalidMetadata {
            key: key.to_string(),
            reason: "unsupported value shape".to_string(),
        }),
    }
}

/// Decode `(key, value)` pairs read back from a contract into a metadata
/// document. Text values that parse as JSON are unfolded; everything else is
/// kept verbatim.
pub fn decode_metadata(encoded: &[(String, MetadataValue)]) -> Result<NftMetadata> {
    let mut metadata = NftMetadata::default();

    for (key, value) in encoded {
        match (key.as_str(), value) {
            ("name", MetadataValue::Text(s)) => metadata.name = s.clone(),
            ("description", MetadataValue::Text(s)) => metadata.description = s.clone(),
            ("image", MetadataValue::Text(s)) => metadata.image = s.clone(),
            ("external_url", MetadataValue::Text(s)) => metadata.external_url = Some(s.clone()),
            ("background_color", MetadataValue::Text(s)) => {
                metadata.background_color = Some(s.clone())
            }
            ("animation_url", MetadataValue::Text(s)) => metadata.animation_url = Some(s.clone()),
            ("youtube_url", MetadataValue::Text(s)) => metadata.youtube_url = Some(s.clone()),
            ("attributes", MetadataValue::Text(s)) => {
                let attributes: Vec<NftAttribute> =
                    serde_json::from_str(s).map_err(|_| PropsError::InvalidMetadata {
                        key: key.clone(),
                        reason: "failed to parse attributes".to_string(),
                    })?;
                metadata.attributes = Some(attributes);
            }
            (_, MetadataValue::Text(s)) => {
                // Stringified JSON round-trips back into structure
                let value = serde_json::from_str(s).unwrap_or(Value::String(s.clone()));
                metadata.extra.insert(key.clone(), value);
            }
            (_, MetadataValue::Int(n)) => {
                metadata.extra.insert(key.clone(), Value::from(*n));
            }
            (_, MetadataValue::RawBytes(bytes)) => {
                metadata
                    .extra
                    .insert(key.clone(), Value::String(format!("0x{}", hex::encode(bytes))));
            }
            (_, MetadataValue::Hash(hash)) => {
                metadata.extra.insert(key.clone(), Value::String(hash.to_hex()));
            }
        }
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_metadata() -> NftMetadata {
        let mut extra = IndexMap::new();
        extra.insert("edition_size".to_string(), json!(100));
        extra.insert("tags".to_string(), json!(["art", "pixel"]));
        NftMetadata {
            name: "Test Edition".to_string(),
            description: "A test edition".to_string(),
            image: "ipfs://bafyimage".to_string(),
            attributes: Some(vec![NftAttribute {
                trait_type: "Rarity".to_string(),
                value: json!("legendary"),
                display_type: None,
                max_value: None,
            }]),
            extra,
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_known_keys_as_text() {
        let encoded = encode_metadata(&sample_metadata()).unwrap();
        assert_eq!(encoded[0].0, "name");
        assert_eq!(encoded[0].1, MetadataValue::Text("Test Edition".to_string()));
        assert_eq!(encoded[2].0, "image");
    }

    #[test]
    fn test_encode_extra_values() {
        let encoded = encode_metadata(&sample_metadata()).unwrap();
        let edition_size = encoded
            .iter()
            .find(|(k, _)| k == "edition_size")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(edition_size, MetadataValue::Int(100));

        let tags = encoded
            .iter()
            .find(|(k, _)| k == "tags")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(tags, MetadataValue::Text("[\"art\",\"pixel\"]".to_string()));
    }

    #[test]
    fn test_encode_rejects_unsupported_shapes() {
        assert!(matches!(
            encode_metadata_value("flag", &json!(true)),
            Err(PropsError::InvalidMetadata { .. })
        ));
        assert!(matches!(
            encode_metadata_value("nothing", &json!(null)),
            Err(PropsError::InvalidMetadata { .. })
        ));
        assert!(matches!(
            encode_metadata_value("ratio", &json!(1.5)),
            Err(PropsError::InvalidMetadata { .. })
        ));
        assert!(matches!(
            encode_metadata_value("negative", &json!(-3)),
            Err(PropsError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn test_decode_round_trip() {
        let metadata = sample_metadata();
        let encoded = encode_metadata(&metadata).unwrap();
        let decoded = decode_metadata(&encoded).unwrap();

        assert_eq!(decoded.name, metadata.name);
        assert_eq!(decoded.description, metadata.description);
        assert_eq!(decoded.image, metadata.image);
        assert_eq!(decoded.attributes, metadata.attributes);
        assert_eq!(decoded.extra["edition_size"], json!(100));
        assert_eq!(decoded.extra["tags"], json!(["art", "pixel"]));
    }

    #[test]
    fn test_metadata_value_json_shape() {
        let text = serde_json::to_value(MetadataValue::Text("hi".to_string())).unwrap();
        assert_eq!(text, json!({"Text": "hi"}));

        let int = serde_json::to_value(MetadataValue::Int(7)).unwrap();
        assert_eq!(int, json!({"Int": 7}));

        let bytes = serde_json::to_value(MetadataValue::RawBytes(vec![0xde, 0xad])).unwrap();
        assert_eq!(bytes, json!({"RawBytes": "0xdead"}));
    }
}
