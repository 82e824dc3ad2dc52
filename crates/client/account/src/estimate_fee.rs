use mc_rpc_client::{BlockId, BlockTag, FeeEstimate, InvokeTransactionPayload, RpcClient};
use mp_calldata::{from_calls_to_execute_calldata, get_selector, Call};
use starknet_signers::Signer;
use starknet_types_core::felt::Felt;

use crate::{Account, AccountError, AccountResult, QUERY_VERSION_ONE};

const EXECUTE_ENTRYPOINT: &str = "__execute__";

/// What to estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A single call, sent to its target contract as is.
    Single(Call),
    /// Several calls, bundled into the account's `__execute__`.
    Multi(Vec<Call>),
    /// Calldata that is already encoded for `__execute__` on `contract_address`.
    Raw { contract_address: Felt, calldata: Vec<Felt> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateFeeOptions {
    pub nonce: Felt,
    /// Defaults to the pending block.
    pub block_id: Option<BlockId>,
}

impl EstimateFeeOptions {
    pub fn new(nonce: Felt) -> Self {
        Self { nonce, block_id: None }
    }

    pub fn with_block_id(mut self, block_id: BlockId) -> Self {
        self.block_id = Some(block_id);
        self
    }
}

impl<C: RpcClient, S: Signer + Send + Sync> Account<C, S> {
    /// Builds the invoke payload for `invocation`. The signature is a `[0, 0]` placeholder and the
    /// version is a query version, so the payload can only ever be estimated.
    pub fn estimate_fee_payload(
        &self,
        invocation: Invocation,
        nonce: Felt,
    ) -> AccountResult<InvokeTransactionPayload> {
        let (contract_address, entrypoint, calldata) = match invocation {
            Invocation::Single(call) => (call.contract_address, get_selector(&call.entrypoint)?, call.calldata),
            Invocation::Multi(calls) => {
                (self.address, get_selector(EXECUTE_ENTRYPOINT)?, from_calls_to_execute_calldata(&calls)?)
            }
            Invocation::Raw { contract_address, calldata } => {
                (contract_address, get_selector(EXECUTE_ENTRYPOINT)?, calldata)
            }
        };

        Ok(InvokeTransactionPayload {
            contract_address,
            entry_point_selector: Some(entrypoint),
            calldata,
            signature: vec![Felt::ZERO, Felt::ZERO],
            max_fee: Felt::ZERO,
            version: QUERY_VERSION_ONE,
            nonce: Some(nonce),
        })
    }

    pub async fn get_estimate_fee(
        &self,
        invocation: Invocation,
        options: EstimateFeeOptions,
    ) -> AccountResult<FeeEstimate> {
        let payload = self.estimate_fee_payload(invocation, options.nonce)?;
        let block_id = options.block_id.unwrap_or(BlockId::Tag(BlockTag::Pending));

        tracing::debug!(contract_address = %format!("{:#x}", payload.contract_address), %block_id, "Estimating fee");
        self.client
            .estimate_fee(payload, block_id)
            .await
            .map_err(|err| AccountError::FeeEstimation { code: err.code(), reason: err.reason() })
    }
}
