use starknet_types_core::felt::Felt;

/// A Cairo short string fits in a single felt, which leaves room for 31 bytes.
pub const MAX_SHORT_STRING_LEN: usize = 31;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShortStringError {
    #[error("Short string is {len} bytes long, the maximum is {MAX_SHORT_STRING_LEN}")]
    InputTooLong { len: usize },
    #[error("Short strings must be ASCII")]
    NonAscii,
    #[error("Short strings cannot contain NUL characters")]
    NulCharacter,
}

pub fn is_short_string(s: &str) -> bool {
    s.len() <= MAX_SHORT_STRING_LEN && s.is_ascii() && !s.contains('\0')
}

/// Encodes `s` as a big-endian integer over its bytes.
pub fn encode_short_string(s: &str) -> Result<Felt, ShortStringError> {
    if s.len() > MAX_SHORT_STRING_LEN {
        return Err(ShortStringError::InputTooLong { len: s.len() });
    }
    if !s.is_ascii() {
        return Err(ShortStringError::NonAscii);
    }
    // A leading NUL would be dropped by the integer encoding.
    if s.contains('\0') {
        return Err(ShortStringError::NulCharacter);
    }
    Ok(Felt::from_bytes_be_slice(s.as_bytes()))
}

pub fn decode_short_string(felt: &Felt) -> Result<String, ShortStringError> {
    let bytes = felt.to_bytes_be();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let bytes = &bytes[start..];

    if bytes.len() > MAX_SHORT_STRING_LEN {
        return Err(ShortStringError::InputTooLong { len: bytes.len() });
    }
    if !bytes.is_ascii() {
        return Err(ShortStringError::NonAscii);
    }
    Ok(bytes.iter().map(|b| *b as char).collect())
}
