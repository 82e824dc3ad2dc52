use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use starknet_types_core::felt::Felt;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

use crate::{
    BlockHashAndNumber, BlockId, BlockWithTxHashes, BlockWithTxs, ContractClass, DeclareTransactionRequest,
    DeclareTransactionResult, DeployTransactionRequest, DeployTransactionResult, FeeEstimate,
    InvokeTransactionPayload, NodeError, NodeResult, RpcClient, RpcClientConfig, StateUpdate, SyncStatus, Transaction,
    TransactionReceipt,
};

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Older nodes answer `starknet_estimateFee` with a single estimate, newer ones with one estimate
/// per transaction in the request.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// [`RpcClient`] speaking JSON-RPC 2.0 over HTTP.
#[derive(Debug)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: Url,
    request_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(config: RpcClientConfig) -> NodeResult<Self> {
        let client = reqwest::Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, url: config.rpc_url, request_id: AtomicU64::new(0) })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends one request and maps the envelope. Node-reported errors are passed through untouched.
    pub async fn call<P: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> NodeResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "Sending rpc request");

        let request = JsonRpcRequest { jsonrpc: "2.0", id, method, params };
        let response = self.client.post(self.url.clone()).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!(method, id, status = status.as_u16(), "Rpc request failed at the http layer");
            return Err(NodeError::Http { status: status.as_u16(), body });
        }

        let response: JsonRpcResponse<R> =
            serde_json::from_str(&body).map_err(|source| NodeError::Decode { method: method.into(), source })?;

        if let Some(JsonRpcError { code, message, data }) = response.error {
            tracing::debug!(method, id, code, %message, "Node returned an error");
            return Err(NodeError::Rpc { code, message, data });
        }

        response.result.ok_or(NodeError::MissingResult(method.into()))
    }
}

#[async_trait]
impl RpcClient for JsonRpcClient {
    async fn chain_id(&self) -> NodeResult<Felt> {
        self.call("starknet_chainId", json!([])).await
    }

    async fn spec_version(&self) -> NodeResult<String> {
        self.call("starknet_specVersion", json!([])).await
    }

    async fn block_number(&self) -> NodeResult<u64> {
        self.call("starknet_blockNumber", json!([])).await
    }

    async fn block_hash_and_number(&self) -> NodeResult<BlockHashAndNumber> {
        self.call("starknet_blockHashAndNumber", json!([])).await
    }

    async fn syncing(&self) -> NodeResult<SyncStatus> {
        self.call("starknet_syncing", json!([])).await
    }

    async fn get_block_with_tx_hashes(&self, block_id: BlockId) -> NodeResult<BlockWithTxHashes> {
        self.call("starknet_getBlockWithTxHashes", json!({ "block_id": block_id })).await
    }

    async fn get_block_with_txs(&self, block_id: BlockId) -> NodeResult<BlockWithTxs> {
        self.call("starknet_getBlockWithTxs", json!({ "block_id": block_id })).await
    }

    async fn get_block_transaction_count(&self, block_id: BlockId) -> NodeResult<u64> {
        self.call("starknet_getBlockTransactionCount", json!({ "block_id": block_id })).await
    }

    async fn get_state_update(&self, block_id: BlockId) -> NodeResult<StateUpdate> {
        self.call("starknet_getStateUpdate", json!({ "block_id": block_id })).await
    }

    async fn get_transaction_by_hash(&self, transaction_hash: Felt) -> NodeResult<Transaction> {
        self.call("starknet_getTransactionByHash", json!({ "transaction_hash": transaction_hash })).await
    }

    async fn get_transaction_by_block_id_and_index(&self, block_id: BlockId, index: u64) -> NodeResult<Transaction> {
        self.call("starknet_getTransactionByBlockIdAndIndex", json!({ "block_id": block_id, "index": index })).await
    }

    async fn get_transaction_receipt(&self, transaction_hash: Felt) -> NodeResult<TransactionReceipt> {
        self.call("starknet_getTransactionReceipt", json!({ "transaction_hash": transaction_hash })).await
    }

    async fn pending_transactions(&self) -> NodeResult<Vec<Transaction>> {
        self.call("starknet_pendingTransactions", json!([])).await
    }

    async fn get_class(&self, block_id: BlockId, class_hash: Felt) -> NodeResult<ContractClass> {
        self.call("starknet_getClass", json!({ "block_id": block_id, "class_hash": class_hash })).await
    }

    async fn get_class_hash_at(&self, block_id: BlockId, contract_address: Felt) -> NodeResult<Felt> {
        self.call("starknet_getClassHashAt", json!({ "block_id": block_id, "contract_address": contract_address }))
            .await
    }

    async fn get_nonce(&self, block_id: BlockId, contract_address: Felt) -> NodeResult<Felt> {
        self.call("starknet_getNonce", json!({ "block_id": block_id, "contract_address": contract_address })).await
    }

    async fn trace_transaction(&self, transaction_hash: Felt) -> NodeResult<Value> {
        self.call("starknet_traceTransaction", json!({ "transaction_hash": transaction_hash })).await
    }

    async fn trace_block_transactions(&self, block_id: BlockId) -> NodeResult<Value> {
        self.call("starknet_traceBlockTransactions", json!({ "block_id": block_id })).await
    }

    async fn estimate_fee(&self, payload: InvokeTransactionPayload, block_id: BlockId) -> NodeResult<FeeEstimate> {
        let estimates: OneOrMany<FeeEstimate> =
            self.call("starknet_estimateFee", json!({ "request": [payload], "block_id": block_id })).await?;
        match estimates {
            OneOrMany::One(estimate) => Ok(estimate),
            OneOrMany::Many(estimates) => {
                estimates.into_iter().next().ok_or(NodeError::MissingResult("starknet_estimateFee".into()))
            }
        }
    }

    async fn declare_class(&self, transaction: DeclareTransactionRequest) -> NodeResult<DeclareTransactionResult> {
        self.call("starknet_addDeclareTransaction", json!({ "declare_transaction": transaction })).await
    }

    async fn deploy_contract(&self, transaction: DeployTransactionRequest) -> NodeResult<DeployTransactionResult> {
        self.call("starknet_addDeployTransaction", json!({ "deploy_transaction": transaction })).await
    }
}
