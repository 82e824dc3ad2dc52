//! Request and response shapes of the node methods used by this client.
//!
//! Only the fields callers actually rely on are typed; the version-dependent remainder of each
//! object is kept as raw JSON so that nodes speaking a slightly different API revision still
//! deserialize.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use starknet_types_core::felt::Felt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHashAndNumber {
    pub block_hash: Felt,
    pub block_number: u64,
}

/// Pending blocks have no hash, number or root yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub block_hash: Option<Felt>,
    pub parent_hash: Felt,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub new_root: Option<Felt>,
    pub timestamp: u64,
    pub sequencer_address: Felt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockWithTxHashes {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub transactions: Vec<Felt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockWithTxs {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_hash: Felt,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub from_address: Option<Felt>,
    pub keys: Vec<Felt>,
    pub data: Vec<Felt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: Felt,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default)]
    pub block_hash: Option<Felt>,
    #[serde(default)]
    pub new_root: Option<Felt>,
    pub old_root: Felt,
    pub state_diff: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SierraContractClass {
    pub sierra_program: Vec<Felt>,
    pub contract_class_version: String,
    pub entry_points_by_type: Value,
    #[serde(default)]
    pub abi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyContractClass {
    pub program: Value,
    pub entry_points_by_type: Value,
    #[serde(default)]
    pub abi: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractClass {
    Sierra(SierraContractClass),
    Legacy(LegacyContractClass),
}

impl ContractClass {
    pub fn entry_points_by_type(&self) -> &Value {
        match self {
            ContractClass::Sierra(class) => &class.entry_points_by_type,
            ContractClass::Legacy(class) => &class.entry_points_by_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProgress {
    pub starting_block_hash: Felt,
    pub starting_block_num: u64,
    pub current_block_hash: Felt,
    pub current_block_num: u64,
    pub highest_block_hash: Felt,
    pub highest_block_num: u64,
}

/// `starknet_syncing` answers `false` when the node is not syncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    NotSyncing,
    Syncing(SyncProgress),
}

impl<'de> Deserialize<'de> for SyncStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Flag(bool),
            Progress(SyncProgress),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Flag(false) => Ok(SyncStatus::NotSyncing),
            Helper::Flag(true) => Err(serde::de::Error::custom("`true` is not a valid sync status")),
            Helper::Progress(progress) => Ok(SyncStatus::Syncing(progress)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub overall_fee: Felt,
    pub gas_consumed: Felt,
    pub gas_price: Felt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// An invoke transaction sent for fee estimation only.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "INVOKE")]
pub struct InvokeTransactionPayload {
    pub contract_address: Felt,
    pub entry_point_selector: Option<Felt>,
    pub calldata: Vec<Felt>,
    pub signature: Vec<Felt>,
    pub max_fee: Felt,
    pub version: Felt,
    pub nonce: Option<Felt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "DECLARE")]
pub struct DeclareTransactionRequest {
    pub contract_class: Value,
    pub sender_address: Felt,
    pub max_fee: Felt,
    pub version: Felt,
    pub signature: Vec<Felt>,
    pub nonce: Felt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "DEPLOY")]
pub struct DeployTransactionRequest {
    pub class_hash: Felt,
    pub contract_address_salt: Felt,
    pub constructor_calldata: Vec<Felt>,
    pub version: Felt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTransactionResult {
    pub transaction_hash: Felt,
    #[serde(default)]
    pub class_hash: Option<Felt>,
}

/// The contract address is optional here so that a node omitting it can be reported as such
/// instead of as a decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTransactionResult {
    pub transaction_hash: Felt,
    #[serde(default)]
    pub contract_address: Option<Felt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_with_tx_hashes_pending() {
        let block: BlockWithTxHashes = serde_json::from_value(json!({
            "parent_hash": "0x1",
            "timestamp": 1700000000,
            "sequencer_address": "0x2",
            "transactions": ["0x3", "0x4"]
        }))
        .unwrap();
        assert_eq!(block.header.block_number, None);
        assert_eq!(block.transactions, vec![Felt::THREE, Felt::from(4u64)]);
    }

    #[test]
    fn transaction_keeps_unknown_fields() {
        let tx: Transaction = serde_json::from_value(json!({
            "transaction_hash": "0xabc",
            "type": "INVOKE",
            "version": "0x1",
            "calldata": ["0x1"]
        }))
        .unwrap();
        assert_eq!(tx.tx_type.as_deref(), Some("INVOKE"));
        assert_eq!(tx.fields.get("version"), Some(&json!("0x1")));
    }

    #[test]
    fn contract_class_variants() {
        let legacy: ContractClass = serde_json::from_value(json!({
            "program": "H4sIAAAA",
            "entry_points_by_type": {"EXTERNAL": []},
            "abi": []
        }))
        .unwrap();
        assert!(matches!(legacy, ContractClass::Legacy(_)));

        let sierra: ContractClass = serde_json::from_value(json!({
            "sierra_program": ["0x1"],
            "contract_class_version": "0.1.0",
            "entry_points_by_type": {"EXTERNAL": []},
            "abi": "[]"
        }))
        .unwrap();
        assert!(matches!(sierra, ContractClass::Sierra(_)));
        assert_eq!(sierra.entry_points_by_type(), &json!({"EXTERNAL": []}));
    }

    #[test]
    fn sync_status() {
        assert_eq!(serde_json::from_value::<SyncStatus>(json!(false)).unwrap(), SyncStatus::NotSyncing);
        assert!(serde_json::from_value::<SyncStatus>(json!(true)).is_err());
        let status: SyncStatus = serde_json::from_value(json!({
            "starting_block_hash": "0x1",
            "starting_block_num": 1,
            "current_block_hash": "0x2",
            "current_block_num": 2,
            "highest_block_hash": "0x3",
            "highest_block_num": 3
        }))
        .unwrap();
        assert!(matches!(status, SyncStatus::Syncing(SyncProgress { highest_block_num: 3, .. })));
    }

    #[test]
    fn invoke_payload_serialization() {
        let payload = InvokeTransactionPayload {
            contract_address: Felt::ONE,
            entry_point_selector: None,
            calldata: vec![Felt::TWO],
            signature: vec![Felt::ZERO, Felt::ZERO],
            max_fee: Felt::ZERO,
            version: Felt::ONE,
            nonce: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "INVOKE",
                "contract_address": "0x1",
                "calldata": ["0x2"],
                "signature": ["0x0", "0x0"],
                "max_fee": "0x0",
                "version": "0x1"
            })
        );
    }

    #[test]
    fn deploy_result_without_address() {
        let result: DeployTransactionResult = serde_json::from_value(json!({"transaction_hash": "0x5"})).unwrap();
        assert_eq!(result.contract_address, None);
    }
}
