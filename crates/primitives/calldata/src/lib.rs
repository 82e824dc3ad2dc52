mod call;
mod execute;
mod felt;
mod short_string;

pub use call::*;
pub use execute::*;
pub use felt::*;
pub use short_string::*;

pub use starknet_types_core::felt::Felt;
