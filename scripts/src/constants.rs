//! Constants used in the deploy scripts

/// Network used when no selector is given
pub const DEFAULT_NETWORK: &str = "fuji";

/// Contract deployed when none is named on the command line
pub const DEFAULT_CONTRACT: &str = "DegenGame";

/// Where hardhat writes its compiled artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Env var holding the fuji RPC endpoint
pub const RPC_URL_VAR: &str = "URL";

/// Env var holding the raw deployer key
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Hex prefix expected on private keys
pub const HEX_PREFIX: &str = "0x";

/// Public Avalanche C-Chain testnet endpoint
pub const AVAX_TESTNET_RPC: &str = "https://api.avax-test.network/ext/bc/C/rpc";

/// Avalanche Fuji chain id
pub const FUJI_CHAIN_ID: u64 = 43113;

/// Snowtrace testnet explorer
pub const SNOWTRACE_BROWSER_URL: &str = "https://testnet.snowtrace.io";
