use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::time::Duration;
use url::Url;

pub const DEFAULT_RPC_URL: &str = "http://localhost:9944";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcClientConfig {
    pub rpc_url: Url,
    /// Applies to each request on its own, not to a whole declare/deploy sequence.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

impl RpcClientConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self { rpc_url, request_timeout: DEFAULT_REQUEST_TIMEOUT }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_RPC_URL).expect("Default rpc url is valid"))
    }
}
