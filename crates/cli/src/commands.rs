use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use mc_account::{Account, DeclareDeployOptions, EstimateFeeOptions, Invocation};
use mc_rpc_client::{JsonRpcClient, RpcClient, RpcClientConfig};
use mp_calldata::{
    decode_execute_calldata, decode_short_string, encode_short_string, from_calls_to_execute_calldata, Call,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use starknet_signers::LocalWallet;

use crate::cli::{AccountCliArgs, Cli, Commands};

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Parsing {}", path.display()))
}

fn encode_calls_file(path: &Path) -> anyhow::Result<Value> {
    let calls: Vec<Call> = read_json(path)?;
    let calldata = from_calls_to_execute_calldata(&calls).context("Encoding calls")?;
    let decoded = decode_execute_calldata(&calldata).context("Decoding calls back")?;
    Ok(json!({ "calldata": calldata, "calls": decoded }))
}

async fn account(
    client: Arc<JsonRpcClient>,
    args: &AccountCliArgs,
) -> anyhow::Result<Account<JsonRpcClient, LocalWallet>> {
    let chain_id = client.chain_id().await.context("Getting chain id")?;
    Ok(Account::new(client, args.signer(), args.account_address, chain_id))
}

/// Runs one command and returns what it prints. Building the client does not touch the network,
/// so offline commands work without a node.
pub async fn run(cli: Cli) -> anyhow::Result<Value> {
    let client = Arc::new(JsonRpcClient::new(RpcClientConfig::from(&cli.rpc)).context("Building rpc client")?);
    tracing::debug!(url = %client.url(), "Using node");

    let value = match cli.command {
        Commands::EncodeShortString { value } => {
            json!(encode_short_string(&value).context("Encoding short string")?)
        }
        Commands::DecodeShortString { felt } => json!(decode_short_string(&felt).context("Decoding short string")?),
        Commands::Calldata { calls } => encode_calls_file(&calls)?,
        Commands::ChainId => json!(client.chain_id().await?),
        Commands::BlockHashAndNumber => json!(client.block_hash_and_number().await?),
        Commands::Block { block_id, full: true } => json!(client.get_block_with_txs(block_id).await?),
        Commands::Block { block_id, full: false } => json!(client.get_block_with_tx_hashes(block_id).await?),
        Commands::StateUpdate { block_id } => json!(client.get_state_update(block_id).await?),
        Commands::Tx { hash: Some(hash), .. } => json!(client.get_transaction_by_hash(hash).await?),
        Commands::Tx { hash: None, block_id, index } => {
            let block_id = block_id.context("Missing --block-id")?;
            let index = index.context("Missing --index")?;
            json!(client.get_transaction_by_block_id_and_index(block_id, index).await?)
        }
        Commands::Receipt { hash } => json!(client.get_transaction_receipt(hash).await?),
        Commands::ClassHashAt { address, block_id } => json!(client.get_class_hash_at(block_id, address).await?),
        Commands::Class { class_hash, block_id } => json!(client.get_class(block_id, class_hash).await?),
        Commands::EstimateFee { calls, account: account_args, nonce, block_id } => {
            let calls: Vec<Call> = read_json(&calls)?;
            let account = account(client, &account_args).await?;
            let nonce = match nonce {
                Some(nonce) => nonce,
                None => account.get_nonce().await.context("Getting account nonce")?,
            };
            let options = EstimateFeeOptions { nonce, block_id };
            json!(account.get_estimate_fee(Invocation::Multi(calls), options).await?)
        }
        Commands::DeclareDeploy { contract, account: account_args, class_hash, constructor_calldata, salt } => {
            let contract: Value = read_json(&contract)?;
            let account = account(client, &account_args).await?;
            let mut options =
                DeclareDeployOptions::new(contract, class_hash).with_constructor_calldata(constructor_calldata);
            options.salt = salt;

            match account.declare_deploy(options).await {
                Ok(output) => json!(output),
                Err(err) => {
                    if let Some(declare) = err.declare_result() {
                        tracing::error!(declare = %json!(declare), "Class was declared but the deploy did not go through");
                    }
                    return Err(err.into());
                }
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;
    use starknet_types_core::felt::Felt;

    async fn offline(args: &[&str]) -> anyhow::Result<Value> {
        run(Cli::try_parse_from(args).unwrap()).await
    }

    #[rstest]
    #[case("Token", "0x546f6b656e")]
    #[case("ERC20", "0x4552433230")]
    #[tokio::test]
    async fn encode_short_string_command(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(offline(&["mrpc", "encode-short-string", value]).await.unwrap(), json!(expected));
        assert_eq!(offline(&["mrpc", "decode-short-string", expected]).await.unwrap(), json!(value));
    }

    #[tokio::test]
    async fn encode_short_string_too_long() {
        let err =
            offline(&["mrpc", "encode-short-string", "this string is definitely longer than 31"]).await.unwrap_err();
        assert!(format!("{err:#}").contains("31"));
    }

    #[tokio::test]
    async fn calldata_command() {
        let path = std::env::temp_dir().join(format!("mrpc-calls-{}.json", std::process::id()));
        fs::write(&path, r#"[{"contractAddress": "0xa", "entrypoint": "transfer", "calldata": ["0xb", "0xa", "0x0"]}]"#)
            .unwrap();

        let value = offline(&["mrpc", "calldata", path.to_str().unwrap()]).await.unwrap();
        fs::remove_file(&path).unwrap();

        let calldata: Vec<Felt> = serde_json::from_value(value["calldata"].clone()).unwrap();
        assert_eq!(calldata.len(), 8);
        assert_eq!(calldata[0], Felt::ONE);
        assert_eq!(calldata[1], Felt::from(10u64));
        assert_eq!(&calldata[3..5], &[Felt::ZERO, Felt::THREE]);
        assert_eq!(value["calls"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn calldata_command_missing_file() {
        let err = offline(&["mrpc", "calldata", "/definitely/not/here.json"]).await.unwrap_err();
        assert!(err.to_string().starts_with("Reading"));
    }
}
