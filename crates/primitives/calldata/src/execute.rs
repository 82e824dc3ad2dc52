use serde::{Deserialize, Serialize};
use starknet_core::utils::get_selector_from_name;
use starknet_types_core::felt::Felt;

use crate::Call;

/// Number of felts in each per-call header: address, selector, data offset, data length.
const CALL_HEADER_LEN: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalldataError {
    #[error("Invalid entrypoint name {0:?}: selectors can only be derived from ASCII names")]
    InvalidEntrypoint(String),
    #[error("Execute calldata is truncated: expected at least {expected} felts, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("Execute calldata declares {expected} data felts but carries {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Execute calldata field {0} does not fit in a usize")]
    InvalidLength(&'static str),
}

pub fn get_selector(entrypoint: &str) -> Result<Felt, CalldataError> {
    get_selector_from_name(entrypoint).map_err(|_| CalldataError::InvalidEntrypoint(entrypoint.to_owned()))
}

/// Flattens a sequence of calls into the calldata of an account's `__execute__` entrypoint.
///
/// Layout: `[n, (to, selector, data_offset, data_len) * n, data_0, .., data_n-1]`. Offsets are
/// cumulative over the whole data region.
pub fn from_calls_to_execute_calldata(calls: &[Call]) -> Result<Vec<Felt>, CalldataError> {
    let data_len: usize = calls.iter().map(|call| call.calldata.len()).sum();
    let mut out = Vec::with_capacity(1 + CALL_HEADER_LEN * calls.len() + data_len);

    out.push(Felt::from(calls.len()));

    let mut offset = 0usize;
    for call in calls {
        out.push(call.contract_address);
        out.push(get_selector(&call.entrypoint)?);
        out.push(Felt::from(offset));
        out.push(Felt::from(call.calldata.len()));
        offset += call.calldata.len();
    }

    for call in calls {
        out.extend_from_slice(&call.calldata);
    }

    Ok(out)
}

/// A call recovered from execute calldata. The entrypoint name is lost, only its selector remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    pub to: Felt,
    pub selector: Felt,
    pub calldata: Vec<Felt>,
}

/// Walks execute calldata the way the account contract does: headers first, then slices of the
/// trailing data region.
pub fn decode_execute_calldata(calldata: &[Felt]) -> Result<Vec<DecodedCall>, CalldataError> {
    let count = calldata.first().ok_or(CalldataError::Truncated { expected: 1, actual: 0 })?;
    let count = felt_to_usize(count, "call_count")?;

    let data_start = count
        .checked_mul(CALL_HEADER_LEN)
        .and_then(|headers| headers.checked_add(1))
        .ok_or(CalldataError::InvalidLength("call_count"))?;
    if calldata.len() < data_start {
        return Err(CalldataError::Truncated { expected: data_start, actual: calldata.len() });
    }
    let data = &calldata[data_start..];

    let mut calls = Vec::with_capacity(count);
    let mut declared_len = 0usize;
    for header in calldata[1..data_start].chunks_exact(CALL_HEADER_LEN) {
        let offset = felt_to_usize(&header[2], "data_offset")?;
        let len = felt_to_usize(&header[3], "data_len")?;
        let end = offset.checked_add(len).ok_or(CalldataError::InvalidLength("data_len"))?;
        let slice = data
            .get(offset..end)
            .ok_or(CalldataError::Truncated { expected: data_start + end, actual: calldata.len() })?;

        declared_len += len;
        calls.push(DecodedCall { to: header[0], selector: header[1], calldata: slice.to_vec() });
    }

    if declared_len != data.len() {
        return Err(CalldataError::LengthMismatch { expected: declared_len, actual: data.len() });
    }

    Ok(calls)
}

fn felt_to_usize(felt: &Felt, field: &'static str) -> Result<usize, CalldataError> {
    u64::try_from(*felt)
        .ok()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(CalldataError::InvalidLength(field))
}
