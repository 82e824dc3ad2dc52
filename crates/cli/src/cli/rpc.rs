use std::time::Duration;

use clap::Args;
use mc_rpc_client::{RpcClientConfig, DEFAULT_RPC_URL};
use url::Url;

/// Parameters used to reach the node.
#[derive(Debug, Clone, Args)]
pub struct RpcCliArgs {
    /// JSON-RPC endpoint of the node.
    #[arg(env = "MRPC_RPC_URL", long, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: Url,

    /// Timeout of each request, in seconds.
    #[arg(env = "MRPC_REQUEST_TIMEOUT", long, default_value_t = 30)]
    pub request_timeout: u64,
}

impl From<&RpcCliArgs> for RpcClientConfig {
    fn from(args: &RpcCliArgs) -> Self {
        RpcClientConfig::new(args.rpc_url.clone()).with_request_timeout(Duration::from_secs(args.request_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn rpc_args_into_config() {
        let cli = Cli::try_parse_from(["mrpc", "--request-timeout", "5", "chain-id"]).unwrap();
        let config = RpcClientConfig::from(&cli.rpc);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
