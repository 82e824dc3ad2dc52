use starknet_types_core::felt::Felt;
use starknet_types_core::hash::{Pedersen, StarkHash};

const DECLARE_PREFIX: Felt = Felt::from_hex_unchecked("0x6465636c617265"); // b"declare"
const CONTRACT_ADDRESS_PREFIX: Felt = Felt::from_hex_unchecked("0x535441524b4e45545f434f4e54524143545f41444452455353"); // b"STARKNET_CONTRACT_ADDRESS"
const L2_ADDRESS_UPPER_BOUND: Felt =
    Felt::from_hex_unchecked("0x7ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff00");

/// Added to the version of transactions that are only simulated or estimated, so that a node never
/// accepts their signature for execution.
pub const QUERY_VERSION_OFFSET: Felt = Felt::from_hex_unchecked("0x100000000000000000000000000000000");
pub const QUERY_VERSION_ONE: Felt = Felt::from_hex_unchecked("0x100000000000000000000000000000001");

/// Hash of a v1 declare transaction, which is what the account signs.
pub fn compute_declare_v1_hash(
    sender_address: Felt,
    class_hash: Felt,
    max_fee: Felt,
    chain_id: Felt,
    nonce: Felt,
) -> Felt {
    Pedersen::hash_array(&[
        DECLARE_PREFIX,
        Felt::ONE,
        sender_address,
        Felt::ZERO,
        Pedersen::hash_array(&[class_hash]),
        max_fee,
        chain_id,
        nonce,
    ])
}

pub fn calculate_contract_address(
    salt: Felt,
    class_hash: Felt,
    constructor_calldata: &[Felt],
    deployer_address: Felt,
) -> Felt {
    let constructor_calldata_hash = Pedersen::hash_array(constructor_calldata);
    let mut address =
        Pedersen::hash_array(&[CONTRACT_ADDRESS_PREFIX, deployer_address, salt, class_hash, constructor_calldata_hash]);

    while address >= L2_ADDRESS_UPPER_BOUND {
        address -= L2_ADDRESS_UPPER_BOUND;
    }
    address
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use starknet_core::crypto::compute_hash_on_elements;
    use starknet_core::utils::get_contract_address;

    const CHAIN_ID: Felt = Felt::from_hex_unchecked("0x534e5f5345504f4c4941"); // b"SN_SEPOLIA"

    #[test]
    fn query_version() {
        assert_eq!(QUERY_VERSION_OFFSET + Felt::ONE, QUERY_VERSION_ONE);
    }

    #[test]
    fn declare_hash_commits_to_every_field() {
        let base = compute_declare_v1_hash(Felt::ONE, Felt::TWO, Felt::THREE, CHAIN_ID, Felt::ZERO);
        assert_eq!(base, compute_declare_v1_hash(Felt::ONE, Felt::TWO, Felt::THREE, CHAIN_ID, Felt::ZERO));

        assert_ne!(base, compute_declare_v1_hash(Felt::TWO, Felt::TWO, Felt::THREE, CHAIN_ID, Felt::ZERO));
        assert_ne!(base, compute_declare_v1_hash(Felt::ONE, Felt::ONE, Felt::THREE, CHAIN_ID, Felt::ZERO));
        assert_ne!(base, compute_declare_v1_hash(Felt::ONE, Felt::TWO, Felt::TWO, CHAIN_ID, Felt::ZERO));
        assert_ne!(base, compute_declare_v1_hash(Felt::ONE, Felt::TWO, Felt::THREE, Felt::ONE, Felt::ZERO));
        assert_ne!(base, compute_declare_v1_hash(Felt::ONE, Felt::TWO, Felt::THREE, CHAIN_ID, Felt::ONE));
    }

    #[test]
    fn declare_hash_matches_hash_on_elements() {
        let sender = Felt::from_hex_unchecked("0x4b3f4ba8c00a02b66142a4b1dd41a4dfab4f92650922a3280977b0f03c75ee1");
        let class_hash = Felt::from_hex_unchecked("0x54328a1075b8820eb43caf0caa233923148c983742402dcfc38541dd843d01a");
        let max_fee = Felt::from_hex_unchecked("0x38d7ea4c68000");
        let nonce = Felt::from(3u64);

        let expected = compute_hash_on_elements(&[
            Felt::from_bytes_be_slice(b"declare"),
            Felt::ONE,
            sender,
            Felt::ZERO,
            compute_hash_on_elements(&[class_hash]),
            max_fee,
            CHAIN_ID,
            nonce,
        ]);
        assert_eq!(compute_declare_v1_hash(sender, class_hash, max_fee, CHAIN_ID, nonce), expected);
    }

    #[rstest]
    #[case(Felt::from(42u64), &[Felt::ONE, Felt::TWO], Felt::from(7u64))]
    #[case(Felt::ZERO, &[], Felt::ZERO)]
    #[case(Felt::MAX, &[Felt::MAX, Felt::ZERO], Felt::ONE)]
    fn contract_address_matches_starknet_core(
        #[case] salt: Felt,
        #[case] calldata: &[Felt],
        #[case] deployer: Felt,
    ) {
        let class_hash = Felt::from_hex_unchecked("0x54328a1075b8820eb43caf0caa233923148c983742402dcfc38541dd843d01a");
        assert_eq!(
            calculate_contract_address(salt, class_hash, calldata, deployer),
            get_contract_address(salt, class_hash, calldata, deployer)
        );
    }

    #[rstest]
    #[case(Felt::ZERO, &[])]
    #[case(Felt::from(42u64), &[Felt::ONE, Felt::TWO])]
    #[case(Felt::MAX, &[Felt::MAX])]
    fn contract_address_is_in_l2_range(#[case] salt: Felt, #[case] calldata: &[Felt]) {
        let address = calculate_contract_address(salt, Felt::from(0x1234u64), calldata, Felt::ZERO);
        assert!(address < L2_ADDRESS_UPPER_BOUND);
        assert_eq!(address, calculate_contract_address(salt, Felt::from(0x1234u64), calldata, Felt::ZERO));
    }

    #[test]
    fn contract_address_depends_on_salt_and_deployer() {
        let class_hash = Felt::from(0x1234u64);
        let a = calculate_contract_address(Felt::ONE, class_hash, &[], Felt::ZERO);
        assert_ne!(a, calculate_contract_address(Felt::TWO, class_hash, &[], Felt::ZERO));
        assert_ne!(a, calculate_contract_address(Felt::ONE, class_hash, &[], Felt::ONE));
        assert_ne!(a, calculate_contract_address(Felt::ONE, class_hash, &[Felt::ZERO], Felt::ZERO));
    }
}
