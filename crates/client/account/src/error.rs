use std::fmt;

use mc_rpc_client::NodeError;
use mp_calldata::CalldataError;

use crate::DeclareResult;

/// The step of an account operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Declare,
    Deploy,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Declare => write!(f, "declare"),
            Step::Deploy => write!(f, "deploy"),
        }
    }
}

pub type AccountResult<T> = Result<T, AccountError>;

#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error("Declare rejected by the node: {}", .source.reason())]
    DeclareRejected {
        #[source]
        source: NodeError,
    },
    /// The declare went through: its result is kept so that the caller can find the transaction.
    #[error("Deploy failed after the class was declared: {}", .source.reason())]
    DeployFailed {
        declare: DeclareResult,
        #[source]
        source: NodeError,
    },
    #[error("Malformed {step} response: missing field `{field}`")]
    MalformedResponse { step: Step, field: &'static str, declare: Option<DeclareResult> },
    #[error("Fee estimation rejected by the node: {reason}")]
    FeeEstimation { code: Option<i64>, reason: String },
    #[error("Node error during {step}: {source}")]
    Node {
        step: Step,
        #[source]
        source: NodeError,
    },
    #[error("Signer error: {0}")]
    Signing(String),
    #[error(transparent)]
    Calldata(#[from] CalldataError),
    #[error("Cannot {step} while the flow is {state}")]
    InvalidFlowState { step: Step, state: &'static str },
}

impl AccountError {
    /// The declare result, when the failure happened after the declare step succeeded.
    pub fn declare_result(&self) -> Option<&DeclareResult> {
        match self {
            AccountError::DeployFailed { declare, .. } => Some(declare),
            AccountError::MalformedResponse { declare, .. } => declare.as_ref(),
            _ => None,
        }
    }
}
