use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mc_rpc_client::BlockId;
use mp_calldata::parse_felt;
use starknet_types_core::felt::Felt;

pub mod account;
pub mod rpc;

pub use account::AccountCliArgs;
pub use rpc::RpcCliArgs;

#[derive(Parser, Debug)]
#[command(name = "mrpc", about = "Starknet JSON-RPC client", version)]
pub struct Cli {
    #[command(flatten)]
    pub rpc: RpcCliArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chain id of the node.
    ChainId,
    /// Print the latest block hash and number.
    BlockHashAndNumber,
    /// Print a block. Block ids are `latest`, `pending`, a number or a 0x-prefixed hash.
    Block {
        #[arg(default_value = "latest")]
        block_id: BlockId,
        /// Include full transactions instead of their hashes.
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    /// Print the state update of a block.
    StateUpdate {
        #[arg(default_value = "latest")]
        block_id: BlockId,
    },
    /// Print a transaction, either by hash or by block id and index.
    Tx {
        #[arg(value_parser = parse_felt, required_unless_present = "index")]
        hash: Option<Felt>,
        #[arg(long, requires = "index")]
        block_id: Option<BlockId>,
        #[arg(long, requires = "block_id")]
        index: Option<u64>,
    },
    /// Print a transaction receipt.
    Receipt {
        #[arg(value_parser = parse_felt)]
        hash: Felt,
    },
    /// Print the class hash of a deployed contract.
    ClassHashAt {
        #[arg(value_parser = parse_felt)]
        address: Felt,
        #[arg(long, default_value = "latest")]
        block_id: BlockId,
    },
    /// Print a contract class.
    Class {
        #[arg(value_parser = parse_felt)]
        class_hash: Felt,
        #[arg(long, default_value = "latest")]
        block_id: BlockId,
    },
    /// Encode an ASCII string of at most 31 characters into a felt.
    EncodeShortString { value: String },
    /// Decode a felt into the short string it encodes.
    DecodeShortString {
        #[arg(value_parser = parse_felt)]
        felt: Felt,
    },
    /// Encode a JSON file of calls into `__execute__` calldata.
    Calldata { calls: PathBuf },
    /// Estimate the fee of executing a JSON file of calls from the account.
    EstimateFee {
        calls: PathBuf,
        #[command(flatten)]
        account: AccountCliArgs,
        /// Defaults to the account's current nonce.
        #[arg(long, value_parser = parse_felt)]
        nonce: Option<Felt>,
        #[arg(long)]
        block_id: Option<BlockId>,
    },
    /// Declare a contract class from a JSON file, then deploy it.
    DeclareDeploy {
        contract: PathBuf,
        #[command(flatten)]
        account: AccountCliArgs,
        #[arg(long, value_parser = parse_felt)]
        class_hash: Felt,
        /// Constructor arguments, as felts.
        #[arg(long, value_parser = parse_felt, num_args = 0.., value_delimiter = ',')]
        constructor_calldata: Vec<Felt>,
        /// Defaults to a random salt.
        #[arg(long, value_parser = parse_felt)]
        salt: Option<Felt>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::CommandFactory;
    use mc_rpc_client::BlockTag;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["mrpc", "block"], BlockId::Tag(BlockTag::Latest))]
    #[case(&["mrpc", "block", "pending"], BlockId::Tag(BlockTag::Pending))]
    #[case(&["mrpc", "block", "42"], BlockId::Number(42))]
    #[case(&["mrpc", "block", "0x2a"], BlockId::Hash(Felt::from(42u64)))]
    fn parse_block_id(#[case] args: &[&str], #[case] expected: BlockId) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_matches!(cli.command, Commands::Block { block_id, full: false } if block_id == expected);
    }

    #[test]
    fn parse_declare_deploy() {
        let cli = Cli::try_parse_from([
            "mrpc",
            "--rpc-url",
            "http://127.0.0.1:9944",
            "declare-deploy",
            "erc20.json",
            "--account-address",
            "0x4b3f",
            "--private-key",
            "0x71d7",
            "--class-hash",
            "0x54328a",
            "--constructor-calldata",
            "0x546f6b656e,0x4552433230,0x4b3f",
        ])
        .unwrap();

        assert_eq!(cli.rpc.rpc_url.as_str(), "http://127.0.0.1:9944/");
        assert_matches!(
            cli.command,
            Commands::DeclareDeploy { class_hash, constructor_calldata, salt: None, .. }
                if class_hash == Felt::from_hex_unchecked("0x54328a") && constructor_calldata.len() == 3
        );
    }

    #[test]
    fn rejects_out_of_range_felts() {
        let prime_plus_one = "0x800000000000011000000000000000000000000000000000000000000000002";
        assert!(Cli::try_parse_from(["mrpc", "decode-short-string", prime_plus_one]).is_err());
    }
}
