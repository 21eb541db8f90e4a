//! Network configuration: the environment snapshot and the named network table

pub mod env;
pub mod network;

pub use env::Environment;
pub use network::{resolve_network, NetworkDefinition, NetworkProfile, PrivateKey, NETWORKS};
