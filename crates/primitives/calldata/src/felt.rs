use num_bigint::BigUint;
use starknet_types_core::felt::Felt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeltParseError {
    #[error("Invalid felt literal: {0:?}")]
    Invalid(String),
    #[error("Felt literal {0:?} is not below the field prime")]
    OutOfRange(String),
}

/// Parses a felt written either in decimal or as a `0x`-prefixed hex string.
///
/// Unlike [`Felt::from_hex`], values at or above the field prime are rejected instead of being
/// reduced.
pub fn parse_felt(s: &str) -> Result<Felt, FeltParseError> {
    let s = s.trim();
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => parse_digits(hex, 16),
        None => parse_digits(s, 10),
    }
    .ok_or_else(|| FeltParseError::Invalid(s.to_owned()))?;

    if value > Felt::MAX.to_biguint() {
        return Err(FeltParseError::OutOfRange(s.to_owned()));
    }

    Ok(Felt::from_bytes_be_slice(&value.to_bytes_be()))
}

fn parse_digits(digits: &str, radix: u32) -> Option<BigUint> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

pub fn parse_felts<S: AsRef<str>>(values: &[S]) -> Result<Vec<Felt>, FeltParseError> {
    values.iter().map(|v| parse_felt(v.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("0", Felt::ZERO)]
    #[case("10", Felt::from(10u64))]
    #[case("0xA", Felt::from(10u64))]
    #[case("0x0a", Felt::from(10u64))]
    #[case("  0x1f ", Felt::from(31u64))]
    #[case("0X10", Felt::from(16u64))]
    fn parse_felt_accepts_dec_and_hex(#[case] input: &str, #[case] expected: Felt) {
        assert_eq!(parse_felt(input).unwrap(), expected);
    }

    #[test]
    fn parse_felt_max() {
        let max = "0x800000000000011000000000000000000000000000000000000000000000000";
        assert_eq!(parse_felt(max).unwrap(), Felt::MAX);
    }

    #[test]
    fn parse_felt_rejects_prime() {
        let prime = "0x800000000000011000000000000000000000000000000000000000000000001";
        assert_matches!(parse_felt(prime), Err(FeltParseError::OutOfRange(_)));
    }

    #[rstest]
    #[case("")]
    #[case("0x")]
    #[case("0xz1")]
    #[case("12a")]
    #[case("-1")]
    #[case("+1")]
    fn parse_felt_rejects_garbage(#[case] input: &str) {
        assert_matches!(parse_felt(input), Err(FeltParseError::Invalid(_)));
    }
}
