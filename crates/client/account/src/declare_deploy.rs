use mc_rpc_client::{DeclareTransactionRequest, DeployTransactionRequest, NodeError, RpcClient};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use starknet_signers::Signer;
use starknet_types_core::felt::Felt;

use crate::{calculate_contract_address, compute_declare_v1_hash, Account, AccountError, AccountResult, Step};

#[derive(Debug, Clone, PartialEq)]
pub struct DeclareDeployOptions {
    /// The contract class, as the node expects it in a declare transaction.
    pub contract: serde_json::Value,
    pub class_hash: Felt,
    pub constructor_calldata: Option<Vec<Felt>>,
    pub salt: Option<Felt>,
}

impl DeclareDeployOptions {
    pub fn new(contract: serde_json::Value, class_hash: Felt) -> Self {
        Self { contract, class_hash, constructor_calldata: None, salt: None }
    }

    pub fn with_constructor_calldata(mut self, constructor_calldata: Vec<Felt>) -> Self {
        self.constructor_calldata = Some(constructor_calldata);
        self
    }

    pub fn with_salt(mut self, salt: Felt) -> Self {
        self.salt = Some(salt);
        self
    }
}

/// `transaction_hash` is `None` when the node already knew the class and the declare was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareResult {
    pub transaction_hash: Option<Felt>,
    pub class_hash: Felt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareDeployResult {
    pub transaction_hash: Felt,
    pub contract_address: Felt,
    pub class_hash: Felt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareDeployOutput {
    pub declare: DeclareResult,
    pub deploy: DeclareDeployResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclareDeployState {
    Pending,
    Declared(DeclareResult),
    Deployed { declare: DeclareResult, deploy: DeclareDeployResult },
    /// `declare` is set when the failure happened in the deploy step.
    Failed { declare: Option<DeclareResult>, step: Step },
}

impl DeclareDeployState {
    fn name(&self) -> &'static str {
        match self {
            DeclareDeployState::Pending => "pending",
            DeclareDeployState::Declared(_) => "declared",
            DeclareDeployState::Deployed { .. } => "deployed",
            DeclareDeployState::Failed { .. } => "failed",
        }
    }
}

/// Random salt below 2^248.
pub fn random_salt() -> Felt {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes[1..]);
    Felt::from_bytes_be(&bytes)
}

/// Declare then deploy, one step at a time.
///
/// A failed declare can be retried with [`DeclareDeployFlow::declare`]; a failed deploy can be
/// retried with [`DeclareDeployFlow::deploy`] without declaring again. The salt is fixed when the
/// flow is created, so a retried deploy targets the same address.
pub struct DeclareDeployFlow<'a, C, S> {
    account: &'a Account<C, S>,
    contract: serde_json::Value,
    class_hash: Felt,
    constructor_calldata: Vec<Felt>,
    salt: Felt,
    state: DeclareDeployState,
}

impl<'a, C: RpcClient, S: Signer + Send + Sync> DeclareDeployFlow<'a, C, S> {
    pub fn new(account: &'a Account<C, S>, options: DeclareDeployOptions) -> Self {
        Self {
            account,
            contract: options.contract,
            class_hash: options.class_hash,
            constructor_calldata: options.constructor_calldata.unwrap_or_default(),
            salt: options.salt.unwrap_or_else(random_salt),
            state: DeclareDeployState::Pending,
        }
    }

    pub fn state(&self) -> &DeclareDeployState {
        &self.state
    }

    pub fn salt(&self) -> Felt {
        self.salt
    }

    pub async fn declare(&mut self) -> AccountResult<DeclareResult> {
        match self.state {
            DeclareDeployState::Pending | DeclareDeployState::Failed { declare: None, .. } => {}
            state => return Err(AccountError::InvalidFlowState { step: Step::Declare, state: state.name() }),
        }

        match self.submit_declare().await {
            Ok(declare) => {
                self.state = DeclareDeployState::Declared(declare);
                Ok(declare)
            }
            Err(err) => {
                self.state = DeclareDeployState::Failed { declare: None, step: Step::Declare };
                Err(err)
            }
        }
    }

    pub async fn deploy(&mut self) -> AccountResult<DeclareDeployResult> {
        let declare = match self.state {
            DeclareDeployState::Declared(declare) | DeclareDeployState::Failed { declare: Some(declare), .. } => declare,
            state => return Err(AccountError::InvalidFlowState { step: Step::Deploy, state: state.name() }),
        };

        match self.submit_deploy(declare).await {
            Ok(deploy) => {
                self.state = DeclareDeployState::Deployed { declare, deploy };
                Ok(deploy)
            }
            Err(err) => {
                self.state = DeclareDeployState::Failed { declare: Some(declare), step: Step::Deploy };
                Err(err)
            }
        }
    }

    pub async fn run(mut self) -> AccountResult<DeclareDeployOutput> {
        let declare = self.declare().await?;
        let deploy = self.deploy().await?;
        Ok(DeclareDeployOutput { declare, deploy })
    }

    async fn submit_declare(&self) -> AccountResult<DeclareResult> {
        let account = self.account;
        let nonce = account.get_nonce().await.map_err(|source| AccountError::Node { step: Step::Declare, source })?;

        let hash = compute_declare_v1_hash(account.address, self.class_hash, account.max_fee, account.chain_id, nonce);
        let signature =
            account.signer.sign_hash(&hash).await.map_err(|err| AccountError::Signing(err.to_string()))?;

        let transaction = DeclareTransactionRequest {
            contract_class: self.contract.clone(),
            sender_address: account.address,
            max_fee: account.max_fee,
            version: Felt::ONE,
            signature: vec![signature.r, signature.s],
            nonce,
        };

        match account.client.declare_class(transaction).await {
            Ok(result) => {
                if let Some(class_hash) = result.class_hash.filter(|class_hash| *class_hash != self.class_hash) {
                    tracing::warn!(
                        expected = %format!("{:#x}", self.class_hash),
                        got = %format!("{:#x}", class_hash),
                        "Node declared a different class hash than the one supplied"
                    );
                }
                tracing::info!(
                    transaction_hash = %format!("{:#x}", result.transaction_hash),
                    class_hash = %format!("{:#x}", self.class_hash),
                    "Class declared"
                );
                Ok(DeclareResult { transaction_hash: Some(result.transaction_hash), class_hash: self.class_hash })
            }
            Err(err) if (account.already_declared)(&err) => {
                tracing::warn!(
                    class_hash = %format!("{:#x}", self.class_hash),
                    reason = %err.reason(),
                    "Class is already declared, going on with the deploy"
                );
                Ok(DeclareResult { transaction_hash: None, class_hash: self.class_hash })
            }
            Err(source @ NodeError::Rpc { .. }) => Err(AccountError::DeclareRejected { source }),
            Err(source) => Err(AccountError::Node { step: Step::Declare, source }),
        }
    }

    async fn submit_deploy(&self, declare: DeclareResult) -> AccountResult<DeclareDeployResult> {
        let transaction = DeployTransactionRequest {
            class_hash: declare.class_hash,
            contract_address_salt: self.salt,
            constructor_calldata: self.constructor_calldata.clone(),
            version: Felt::ZERO,
        };

        let result = self
            .account
            .client
            .deploy_contract(transaction)
            .await
            .map_err(|source| AccountError::DeployFailed { declare, source })?;

        let contract_address = result.contract_address.ok_or(AccountError::MalformedResponse {
            step: Step::Deploy,
            field: "contract_address",
            declare: Some(declare),
        })?;

        let expected = calculate_contract_address(self.salt, declare.class_hash, &self.constructor_calldata, Felt::ZERO);
        if expected != contract_address {
            tracing::warn!(
                expected = %format!("{:#x}", expected),
                got = %format!("{:#x}", contract_address),
                "Deployed contract address differs from the locally computed one"
            );
        }

        tracing::info!(
            transaction_hash = %format!("{:#x}", result.transaction_hash),
            contract_address = %format!("{:#x}", contract_address),
            "Contract deployed"
        );
        Ok(DeclareDeployResult {
            transaction_hash: result.transaction_hash,
            contract_address,
            class_hash: declare.class_hash,
        })
    }
}

impl<C: RpcClient, S: Signer + Send + Sync> Account<C, S> {
    /// Declares the class, then deploys an instance of it.
    ///
    /// Use [`Account::declare_deploy_flow`] to drive the two steps separately.
    pub async fn declare_deploy(&self, options: DeclareDeployOptions) -> AccountResult<DeclareDeployOutput> {
        self.declare_deploy_flow(options).run().await
    }

    pub fn declare_deploy_flow(&self, options: DeclareDeployOptions) -> DeclareDeployFlow<'_, C, S> {
        DeclareDeployFlow::new(self, options)
    }
}
