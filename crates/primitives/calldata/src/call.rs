use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

use crate::{parse_felt, parse_felts, FeltParseError};

/// A single contract invocation, as given to an account's `__execute__`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub contract_address: Felt,
    pub entrypoint: String,
    #[serde(default)]
    pub calldata: Vec<Felt>,
}

impl Call {
    pub fn new(contract_address: Felt, entrypoint: impl Into<String>, calldata: Vec<Felt>) -> Self {
        Self { contract_address, entrypoint: entrypoint.into(), calldata }
    }

    /// Builds a call from textual felts, as they usually come from JSON fixtures or the command line.
    pub fn from_strs<S: AsRef<str>>(
        contract_address: &str,
        entrypoint: impl Into<String>,
        calldata: &[S],
    ) -> Result<Self, FeltParseError> {
        Ok(Self::new(parse_felt(contract_address)?, entrypoint, parse_felts(calldata)?))
    }
}
