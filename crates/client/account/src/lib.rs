//! Account orchestration on top of an injected [`RpcClient`].
//!
//! An [`Account`] owns a signing identity and a handle on the node client, and assembles the
//! transactions it submits: the declare/deploy flow ([`DeclareDeployFlow`]) and fee estimation.
//! It keeps no state between operations, so several of them may run concurrently against the same
//! account. Conflicting nonces are for the node to sort out.

use std::sync::Arc;

use mc_rpc_client::{codes, BlockId, BlockTag, NodeError, RpcClient};
use starknet_signers::Signer;
use starknet_types_core::felt::Felt;

mod declare_deploy;
mod error;
mod estimate_fee;
mod hash;

pub use declare_deploy::*;
pub use error::*;
pub use estimate_fee::*;
pub use hash::*;

/// Max fee attached to declare transactions unless configured otherwise: 0.001 ETH.
pub const DEFAULT_MAX_FEE: Felt = Felt::from_hex_unchecked("0x38d7ea4c68000");

/// Decides whether a rejected declare means the class is already known to the node, in which case
/// the flow goes on with the supplied class hash.
pub type AlreadyDeclaredPredicate = Arc<dyn Fn(&NodeError) -> bool + Send + Sync>;

/// Matches error code 51 and any node message mentioning an already declared class.
pub fn is_already_declared(err: &NodeError) -> bool {
    match err {
        NodeError::Rpc { code, message, .. } => {
            *code == codes::CLASS_ALREADY_DECLARED || message.to_lowercase().contains("already declared")
        }
        _ => false,
    }
}

pub struct Account<C, S> {
    client: Arc<C>,
    signer: S,
    address: Felt,
    chain_id: Felt,
    max_fee: Felt,
    block_id: BlockId,
    already_declared: AlreadyDeclaredPredicate,
}

impl<C: RpcClient, S: Signer + Send + Sync> Account<C, S> {
    pub fn new(client: Arc<C>, signer: S, address: Felt, chain_id: Felt) -> Self {
        Self {
            client,
            signer,
            address,
            chain_id,
            max_fee: DEFAULT_MAX_FEE,
            block_id: BlockId::Tag(BlockTag::Pending),
            already_declared: Arc::new(is_already_declared),
        }
    }

    pub fn with_max_fee(mut self, max_fee: Felt) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Block the account nonce is read at. Defaults to the pending block.
    pub fn with_block_id(mut self, block_id: BlockId) -> Self {
        self.block_id = block_id;
        self
    }

    pub fn with_already_declared_predicate(
        mut self,
        predicate: impl Fn(&NodeError) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.already_declared = Arc::new(predicate);
        self
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn chain_id(&self) -> Felt {
        self.chain_id
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub async fn get_nonce(&self) -> Result<Felt, NodeError> {
        self.client.get_nonce(self.block_id, self.address).await
    }

    pub async fn public_key(&self) -> Result<Felt, AccountError> {
        self.signer
            .get_public_key()
            .await
            .map(|key| key.scalar())
            .map_err(|err| AccountError::Signing(err.to_string()))
    }
}

#[cfg(test)]
mod tests;
