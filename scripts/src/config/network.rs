//! Named network definitions and their resolution into a concrete profile

use std::fmt;

use reqwest::Url;
use tracing::info;

use crate::{
    config::env::Environment,
    constants::{
        AVAX_TESTNET_RPC, FUJI_CHAIN_ID, HEX_PREFIX, PRIVATE_KEY_VAR, RPC_URL_VAR,
        SNOWTRACE_BROWSER_URL,
    },
    errors::DeployError,
    utils::with_hex_prefix,
};

/// Where a network's RPC endpoint comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcSource {
    /// Hardcoded endpoint
    Literal(&'static str),
    /// Name of the env var holding the endpoint
    Env(&'static str),
}

/// A statically configured network
#[derive(Debug, Clone, Copy)]
pub struct NetworkDefinition {
    /// Name used to select the network
    pub name: &'static str,
    /// Source of the RPC endpoint
    pub rpc: RpcSource,
    /// Expected chain id, checked against the node on connect when set
    pub chain_id: Option<u64>,
    /// Name of the env var holding the raw deployer key
    pub private_key_var: &'static str,
    /// Block explorer used to print a link to the deployment
    pub explorer: Option<&'static str>,
}

/// The networks this repo knows how to deploy to
pub const NETWORKS: &[NetworkDefinition] = &[
    NetworkDefinition {
        name: "snowtrace",
        rpc: RpcSource::Literal(AVAX_TESTNET_RPC),
        chain_id: Some(FUJI_CHAIN_ID),
        private_key_var: PRIVATE_KEY_VAR,
        explorer: Some(SNOWTRACE_BROWSER_URL),
    },
    NetworkDefinition {
        name: "fuji",
        rpc: RpcSource::Env(RPC_URL_VAR),
        chain_id: None,
        private_key_var: PRIVATE_KEY_VAR,
        explorer: None,
    },
];

/// A hex encoded private key, always `0x` prefixed
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Normalize a raw key read from the environment
    pub fn new(raw: &str) -> Self {
        Self(with_hex_prefix(raw.trim()))
    }

    /// The key material, only to be handed to a signer
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({HEX_PREFIX}<redacted>)")
    }
}

/// The fully resolved network a deployment runs against
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    /// Name of the selected network
    pub name: String,
    /// Validated RPC endpoint
    pub rpc_url: Url,
    /// Chain id the node must report, when known
    pub chain_id: Option<u64>,
    /// Signing accounts, in order; the first one deploys
    pub accounts: Vec<PrivateKey>,
    /// Explorer base url, with a trailing slash
    pub explorer: Option<Url>,
}

impl NetworkProfile {
    /// Link to `address` on the network's explorer, if it has one
    pub fn explorer_link(&self, address: &str) -> Option<String> {
        self.explorer
            .as_ref()
            .and_then(|base| base.join(&format!("address/{address}")).ok())
            .map(|url| url.to_string())
    }
}

/// Resolve the network named `selector` against `networks`.
///
/// Only the selected definition is looked at, so a broken entry for some other
/// network never fails the run. Nothing here touches the network.
pub fn resolve_network(
    selector: &str,
    env: &Environment,
    networks: &[NetworkDefinition],
) -> Result<NetworkProfile, DeployError> {
    let definition = networks
        .iter()
        .find(|n| n.name == selector)
        .ok_or_else(|| {
            let known = networks.iter().map(|n| n.name).collect::<Vec<_>>().join(", ");
            DeployError::Configuration(format!("unknown network `{selector}` (known: {known})"))
        })?;

    let rpc_url = resolve_rpc_url(definition, env)?;

    let private_key = env.get(definition.private_key_var).ok_or_else(|| {
        DeployError::Configuration(format!(
            "env var `{}` must hold the deployer private key",
            definition.private_key_var
        ))
    })?;

    let explorer = definition
        .explorer
        .map(|url| {
            // Trailing slash so `join` appends instead of replacing the last segment
            Url::parse(&format!("{}/", url.trim_end_matches('/')))
                .map_err(|e| DeployError::Configuration(format!("bad explorer url: {e}")))
        })
        .transpose()?;

    info!(network = definition.name, rpc = %rpc_url, "Resolved network");

    Ok(NetworkProfile {
        name: definition.name.to_string(),
        rpc_url,
        chain_id: definition.chain_id,
        accounts: vec![PrivateKey::new(private_key)],
        explorer,
    })
}

/// Find and validate the RPC endpoint of `definition`
fn resolve_rpc_url(definition: &NetworkDefinition, env: &Environment) -> Result<Url, DeployError> {
    let raw = match definition.rpc {
        RpcSource::Literal(url) => url,
        RpcSource::Env(var) => env.get(var).ok_or_else(|| {
            DeployError::Configuration(format!(
                "env var `{var}` must hold the RPC url of network `{}`",
                definition.name
            ))
        })?,
    };

    let url = Url::parse(raw).map_err(|e| {
        DeployError::Configuration(format!("invalid RPC url `{raw}` for `{}`: {e}", definition.name))
    })?;
    if !url.has_host() {
        return Err(DeployError::Configuration(format!(
            "RPC url `{raw}` for `{}` has no host",
            definition.name
        )));
    }

    Ok(url)
}
