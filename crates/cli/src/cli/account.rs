use clap::Args;
use mp_calldata::parse_felt;
use starknet_signers::{LocalWallet, SigningKey};
use starknet_types_core::felt::Felt;

/// The account that signs and pays for transactions.
#[derive(Debug, Clone, Args)]
pub struct AccountCliArgs {
    #[arg(env = "MRPC_ACCOUNT_ADDRESS", long, value_parser = parse_felt)]
    pub account_address: Felt,

    #[arg(env = "MRPC_PRIVATE_KEY", long, value_parser = parse_felt, hide_env_values = true)]
    pub private_key: Felt,
}

impl AccountCliArgs {
    pub fn signer(&self) -> LocalWallet {
        LocalWallet::from(SigningKey::from_secret_scalar(self.private_key))
    }
}
