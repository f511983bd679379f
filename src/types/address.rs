use crate::error::{PropsError, Result};
use crate::types::primitives::Bytes32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 32-byte account identifier.
///
/// Accounts are identified by the `b256` hash of their address; the textual
/// form is `0x`-prefixed hex. Allowlist documents key entries by whatever
/// string spelling the caller supplied, so lookups there use the raw string
/// rather than this normalized type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(Bytes32);

impl Address {
    /// Create from a raw 32-byte value
    pub fn new(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = Bytes32::from_hex(s).map_err(|_| {
            PropsError::InvalidParameter(format!("Invalid address: {}", s))
        })?;
        Ok(Self(bytes))
    }

    /// Get the underlying 32-byte value
    pub fn as_bytes32(&self) -> &Bytes32 {
        &self.0
    }

    /// Get the raw address bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Render as a `0x`-prefixed lowercase hex string
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Identity input shape expected by contract entry points
    pub fn to_identity_input(&self) -> serde_json::Value {
        serde_json::json!({ "Address": { "bits": self.to_hex() } })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl From<Bytes32> for Address {
    fn from(bytes: Bytes32) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Address(Bytes32::deserialize(deserializer)?))
    }
}
