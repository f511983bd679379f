use crate::error::{PropsError, Result};
use crate::types::Address;
use serde_json::{json, Map, Value};

/// Deploy-time configuration for the edition and collection contracts.
///
/// These values become configurable constants baked into the deployed
/// bytecode and cannot be changed afterwards. One struct with optional
/// fields covers every contract revision; unset fields keep the program
/// defaults.
#[derive(Debug, Clone)]
pub struct ContractConfiguration {
    /// The account that will own the deployed contract
    pub owner: Address,
    /// Maximum number of tokens that can ever be minted
    pub max_supply: Option<u64>,
    /// Where the builder fee is sent
    pub builder_fee_address: Option<Address>,
    /// Flat builder fee in the base asset
    pub builder_fee: Option<u64>,
    /// Where the builder's revenue share is sent
    pub builder_revenue_share_address: Option<Address>,
    /// Builder revenue share, percent of mint price
    pub builder_revenue_share_percentage: Option<u8>,
    /// Affiliate fee, percent of mint price
    pub affiliate_fee_percentage: Option<u8>,
    /// Disable the airdrop entry point entirely
    pub disable_airdrop: bool,
}

impl ContractConfiguration {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            max_supply: None,
            builder_fee_address: None,
            builder_fee: None,
            builder_revenue_share_address: None,
            builder_revenue_share_percentage: None,
            affiliate_fee_percentage: None,
            disable_airdrop: false,
        }
    }

    /// Check value ranges before anything is deployed
    pub fn validate(&self) -> Result<()> {
        if let Some(share) = self.builder_revenue_share_percentage {
            if share > 100 {
                return Err(PropsError::InvalidParameter(
                    "builder_revenue_share_percentage must be between 0 and 100".to_string(),
                ));
            }
        }
        if let Some(fee) = self.affiliate_fee_percentage {
            if fee > 100 {
                return Err(PropsError::InvalidParameter(
                    "affiliate_fee_percentage must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Map set fields to the contract's configurable constants
    pub fn to_configurables(&self) -> Result<Value> {
        self.validate()?;

        let mut configurables = Map::new();
        if let Some(max_supply) = self.max_supply {
            configurables.insert("MAX_SUPPLY".to_string(), json!(max_supply));
        }
        if let Some(address) = &self.builder_fee_address {
            configurables.insert(
                "BUILDER_FEE_ADDRESS".to_string(),
                json!({ "bits": address.to_hex() }),
            );
        }
        if let Some(fee) = self.builder_fee {
            configurables.insert("BUILDER_FEE".to_string(), json!(fee));
        }
        if let Some(address) = &self.builder_revenue_share_address {
            configurables.insert(
                "BUILDER_REVENUE_SHARE_ADDRESS".to_string(),
                json!({ "bits": address.to_hex() }),
            );
        }
        if let Some(share) = self.builder_revenue_share_percentage {
            configurables.insert("BUILDER_REVENUE_SHARE_PERCENTAGE".to_string(), json!(share));
        }
        if let Some(fee) = self.affiliate_fee_percentage {
            configurables.insert("AFFILIATE_FEE_PERCENTAGE".to_string(), json!(fee));
        }
        if self.disable_airdrop {
            configurables.insert("DISABLE_AIRDROP".to_string(), json!(true));
        }

        Ok(Value::Object(configurables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bytes32;

    fn owner() -> Address {
        Address::new(Bytes32::new([9u8; 32]))
    }

    #[test]
    fn test_defaults_produce_empty_configurables() {
        let config = ContractConfiguration::new(owner());
        let configurables = config.to_configurables().unwrap();
        assert_eq!(configurables, serde_json::json!({}));
    }

    #[test]
    fn test_set_fields_are_mapped() {
        let mut config = ContractConfiguration::new(owner());
        config.max_supply = Some(1000);
        config.builder_fee = Some(25);
        config.builder_fee_address = Some(owner());
        config.disable_airdrop = true;

        let configurables = config.to_configurables().unwrap();
        assert_eq!(configurables["MAX_SUPPLY"], 1000);
        assert_eq!(configurables["BUILDER_FEE"], 25);
        assert_eq!(configurables["BUILDER_FEE_ADDRESS"]["bits"], owner().to_hex());
        assert_eq!(configurables["DISABLE_AIRDROP"], true);
        assert!(configurables.get("AFFILIATE_FEE_PERCENTAGE").is_none());
    }

    #[test]
    fn test_percentage_ranges_validated() {
        let mut config = ContractConfiguration::new(owner());
        config.builder_revenue_share_percentage = Some(101);
        assert!(config.to_configurables().is_err());

        config.builder_revenue_share_percentage = Some(100);
        config.affiliate_fee_percentage = Some(101);
        assert!(config.validate().is_err());

        config.affiliate_fee_percentage = Some(5);
        assert!(config.validate().is_ok());
    }
}
