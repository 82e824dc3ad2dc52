use std::sync::Arc;

use mc_rpc_client::MockRpcClient;
use starknet_signers::{LocalWallet, SigningKey};
use starknet_types_core::felt::Felt;

use crate::Account;


const ACCOUNT_ADDRESS: Felt =
    Felt::from_hex_unchecked("0x4b3f4ba8c00a02b66142a4b1dd41a4dfab4f92650922a3280977b0f03c75ee1");
const CHAIN_ID: Felt = Felt::from_hex_unchecked("0x534e5f5345504f4c4941"); // b"SN_SEPOLIA"
const PRIVATE_KEY: Felt = Felt::from_hex_unchecked("0x71d7bb07b9a64f6f78ac4c816aff4da9");

fn signing_key() -> SigningKey {
    SigningKey::from_secret_scalar(PRIVATE_KEY)
}

fn account(client: MockRpcClient) -> Account<MockRpcClient, LocalWallet> {
    Account::new(Arc::new(client), LocalWallet::from(signing_key()), ACCOUNT_ADDRESS, CHAIN_ID)
}

#[tokio::test]
async fn public_key_matches_signing_key() {
    let account = account(MockRpcClient::new());
    assert_eq!(account.public_key().await.unwrap(), signing_key().verifying_key().scalar());
    assert_eq!(account.address(), ACCOUNT_ADDRESS);
    assert_eq!(account.chain_id(), CHAIN_ID);
}

#[tokio::test]
async fn nonce_is_read_at_the_pending_block_by_default() {
    let mut client = MockRpcClient::new();
    client
        .expect_get_nonce()
        .withf(|block_id, address| {
            *block_id == mc_rpc_client::BlockId::Tag(mc_rpc_client::BlockTag::Pending) && *address == ACCOUNT_ADDRESS
        })
        .times(1)
        .returning(|_, _| Ok(Felt::from(7u64)));

    assert_eq!(account(client).get_nonce().await.unwrap(), Felt::from(7u64));
}
