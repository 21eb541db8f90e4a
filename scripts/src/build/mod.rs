//! Compiled contract artifacts, as produced by the hardhat build

pub mod artifact;

pub use artifact::{ArtifactStore, ContractArtifact};
