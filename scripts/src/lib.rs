//! Deploy script for the DegenGame contract.

#![cfg_attr(not(test), deny(clippy::missing_docs_in_private_items))]

pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod utils;

/// Network resolution
pub mod config;

/// Our artifact utils
pub mod build;

/// Our deploy flow
pub mod deploy;

pub mod tx;
