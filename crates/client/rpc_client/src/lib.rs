mod block_id;
mod config;
mod error;
mod jsonrpc;
mod types;

pub use block_id::*;
pub use config::*;
pub use error::*;
pub use jsonrpc::JsonRpcClient;
pub use types::*;

use async_trait::async_trait;
use serde_json::Value;
use starknet_types_core::felt::Felt;

/// Node methods the account orchestration and the CLI depend on. Each method maps to exactly one
/// JSON-RPC call and never retries.
///
/// The client is injected wherever it is needed: there is no process-wide instance.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RpcClient: Send + Sync {
    async fn chain_id(&self) -> NodeResult<Felt>;
    async fn spec_version(&self) -> NodeResult<String>;
    async fn block_number(&self) -> NodeResult<u64>;
    async fn block_hash_and_number(&self) -> NodeResult<BlockHashAndNumber>;
    async fn syncing(&self) -> NodeResult<SyncStatus>;

    async fn get_block_with_tx_hashes(&self, block_id: BlockId) -> NodeResult<BlockWithTxHashes>;
    async fn get_block_with_txs(&self, block_id: BlockId) -> NodeResult<BlockWithTxs>;
    async fn get_block_transaction_count(&self, block_id: BlockId) -> NodeResult<u64>;
    async fn get_state_update(&self, block_id: BlockId) -> NodeResult<StateUpdate>;

    async fn get_transaction_by_hash(&self, transaction_hash: Felt) -> NodeResult<Transaction>;
    async fn get_transaction_by_block_id_and_index(&self, block_id: BlockId, index: u64) -> NodeResult<Transaction>;
    async fn get_transaction_receipt(&self, transaction_hash: Felt) -> NodeResult<TransactionReceipt>;
    async fn pending_transactions(&self) -> NodeResult<Vec<Transaction>>;

    async fn get_class(&self, block_id: BlockId, class_hash: Felt) -> NodeResult<ContractClass>;
    async fn get_class_hash_at(&self, block_id: BlockId, contract_address: Felt) -> NodeResult<Felt>;
    async fn get_nonce(&self, block_id: BlockId, contract_address: Felt) -> NodeResult<Felt>;

    async fn trace_transaction(&self, transaction_hash: Felt) -> NodeResult<Value>;
    async fn trace_block_transactions(&self, block_id: BlockId) -> NodeResult<Value>;

    async fn estimate_fee(&self, payload: InvokeTransactionPayload, block_id: BlockId) -> NodeResult<FeeEstimate>;
    async fn declare_class(&self, transaction: DeclareTransactionRequest) -> NodeResult<DeclareTransactionResult>;
    async fn deploy_contract(&self, transaction: DeployTransactionRequest) -> NodeResult<DeployTransactionResult>;
}
