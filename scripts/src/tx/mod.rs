//! Chain client: provider setup, deploy transaction encoding, sending and waiting

pub mod abi;
pub mod client;
pub mod sender;

pub use client::{AlloyChainClient, ChainClient, ConfirmationPolicy};
