use std::borrow::Cow;

/// Starknet JSON-RPC error codes that callers commonly branch on.
pub mod codes {
    pub const CONTRACT_NOT_FOUND: i64 = 20;
    pub const BLOCK_NOT_FOUND: i64 = 24;
    pub const CLASS_HASH_NOT_FOUND: i64 = 28;
    pub const TXN_HASH_NOT_FOUND: i64 = 29;
    pub const CONTRACT_ERROR: i64 = 40;
    pub const TXN_EXECUTION_ERROR: i64 = 41;
    pub const INVALID_CONTRACT_CLASS: i64 = 50;
    pub const CLASS_ALREADY_DECLARED: i64 = 51;
    pub const INVALID_TXN_NONCE: i64 = 52;
    pub const VALIDATION_FAILURE: i64 = 55;
    pub const UNEXPECTED_ERROR: i64 = 63;
}

pub type NodeResult<T> = Result<T, NodeError>;

/// Any failure of a single node call. The node-reported variant is kept verbatim so that callers can
/// inspect the code and message.
#[derive(thiserror::Error, Debug)]
pub enum NodeError {
    #[error("Node returned error {code}: {message}")]
    Rpc { code: i64, message: String, data: Option<serde_json::Value> },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Node answered with HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to decode response to {method}: {source}")]
    Decode {
        method: Cow<'static, str>,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response to {0} has neither a result nor an error")]
    MissingResult(Cow<'static, str>),
}

impl NodeError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        NodeError::Rpc { code, message: message.into(), data: None }
    }

    /// The node-reported error code, if the node answered at all.
    pub fn code(&self) -> Option<i64> {
        match self {
            NodeError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Human readable reason, including the node's `data` payload when there is one.
    pub fn reason(&self) -> String {
        match self {
            NodeError::Rpc { message, data: Some(data), .. } => format!("{message}: {data}"),
            NodeError::Rpc { message, data: None, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
