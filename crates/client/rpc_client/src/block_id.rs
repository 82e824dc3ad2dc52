use serde::{Deserialize, Deserializer, Serialize};
use starknet_types_core::felt::Felt;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Latest,
    Pending,
}

/// Identifies a block either by tag, hash or height.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum BlockId {
    Tag(BlockTag),
    Hash(Felt),
    Number(u64),
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::Tag(BlockTag::Latest)
    }
}

#[derive(Serialize, Deserialize)]
struct BlockHashHelper {
    block_hash: Felt,
}

#[derive(Serialize, Deserialize)]
struct BlockNumberHelper {
    block_number: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockIdHelper {
    Tag(BlockTag),
    Hash(BlockHashHelper),
    Number(BlockNumberHelper),
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Tag(tag) => tag.serialize(serializer),
            BlockId::Hash(block_hash) => BlockHashHelper { block_hash: *block_hash }.serialize(serializer),
            BlockId::Number(block_number) => BlockNumberHelper { block_number: *block_number }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match BlockIdHelper::deserialize(deserializer)? {
            BlockIdHelper::Tag(tag) => BlockId::Tag(tag),
            BlockIdHelper::Hash(helper) => BlockId::Hash(helper.block_hash),
            BlockIdHelper::Number(helper) => BlockId::Number(helper.block_number),
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid block id {0:?}: expected `latest`, `pending`, a block number or a 0x-prefixed block hash")]
pub struct BlockIdParseError(String);

/// Parses the command-line form of a block id.
impl FromStr for BlockId {
    type Err = BlockIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockId::Tag(BlockTag::Latest)),
            "pending" => Ok(BlockId::Tag(BlockTag::Pending)),
            s if s.starts_with("0x") => {
                Felt::from_hex(s).map(BlockId::Hash).map_err(|_| BlockIdParseError(s.to_owned()))
            }
            s => s.parse().map(BlockId::Number).map_err(|_| BlockIdParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Tag(BlockTag::Latest) => write!(f, "latest"),
            BlockId::Tag(BlockTag::Pending) => write!(f, "pending"),
            BlockId::Hash(hash) => write!(f, "{hash:#x}"),
            BlockId::Number(number) => write!(f, "{number}"),
        }
    }
}
