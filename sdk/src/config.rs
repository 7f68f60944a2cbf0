//! Program id configuration

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, CP_SWAP_PROGRAM_ID, MEMO_PROGRAM_ID, METADATA_PROGRAM_ID,
    TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};

/// Program ids the encoder targets. Defaults to mainnet deployments; any
/// field can be overridden from a config file for forks or local validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramIds {
    #[serde(with = "pubkey_string")]
    pub cp_swap: Pubkey,
    #[serde(with = "pubkey_string")]
    pub token: Pubkey,
    #[serde(with = "pubkey_string")]
    pub token_2022: Pubkey,
    #[serde(with = "pubkey_string")]
    pub associated_token: Pubkey,
    #[serde(with = "pubkey_string")]
    pub metadata: Pubkey,
    #[serde(with = "pubkey_string")]
    pub memo: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            cp_swap: CP_SWAP_PROGRAM_ID,
            token: TOKEN_PROGRAM_ID,
            token_2022: TOKEN_2022_PROGRAM_ID,
            associated_token: ASSOCIATED_TOKEN_PROGRAM_ID,
            metadata: METADATA_PROGRAM_ID,
            memo: MEMO_PROGRAM_ID,
        }
    }
}

/// Base58 string (de)serialization for pubkeys
pub mod pubkey_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(|e| D::Error::custom(format!("invalid pubkey {s}: {e}")))
    }
}
