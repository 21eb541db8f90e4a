//! The chain client capability and its alloy implementation

use std::time::Duration;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use tracing::info;

use crate::{
    build::ArtifactStore,
    config::NetworkProfile,
    deploy::DeploymentResult,
    errors::DeployError,
    tx::{
        abi::encode_deploy_code,
        sender::{send_deploy_transaction, wait_for_deployment, PendingDeployment},
    },
};

/// The capability the deploy flow needs from a blockchain client.
///
/// Implementations must not retry on their own: a resubmitted contract
/// creation is a second contract.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// A connected, signing client
    type Handle;
    /// A submitted but not yet confirmed deployment
    type Pending;

    /// Connect to `profile`'s endpoint with its first account as signer
    async fn connect(&self, profile: &NetworkProfile) -> Result<Self::Handle, DeployError>;

    /// Submit the creation transaction of `contract`
    async fn deploy(
        &self,
        handle: &Self::Handle,
        contract: &str,
        constructor_args: &[String],
    ) -> Result<Self::Pending, DeployError>;

    /// Wait until `pending` is mined and carries a contract address
    async fn wait_for_confirmation(
        &self,
        pending: Self::Pending,
    ) -> Result<DeploymentResult, DeployError>;
}

/// How long and how deep to wait for a deployment to be mined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Blocks required on top of (and including) the inclusion block
    pub confirmations: u64,
    /// Give up after this long; `None` waits forever
    pub timeout: Option<Duration>,
}

impl ConfirmationPolicy {
    /// Policy waiting for `confirmations` blocks (at least one) and at most `timeout`
    pub fn new(confirmations: u64, timeout: Option<Duration>) -> Self {
        Self {
            confirmations: confirmations.max(1),
            timeout,
        }
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::new(1, None)
    }
}

/// A provider with a local wallet, bound to one network
#[derive(Clone)]
pub struct AlloyHandle {
    /// Provider with the deployer wallet attached
    pub provider: DynProvider,
    /// Address the creation transaction is sent from
    pub deployer: Address,
}

/// [`ChainClient`] speaking JSON-RPC over HTTP through alloy
#[derive(Debug, Clone)]
pub struct AlloyChainClient {
    /// Where compiled contracts are looked up
    artifacts: ArtifactStore,
    /// How deployments are waited for
    policy: ConfirmationPolicy,
}

impl AlloyChainClient {
    /// Client deploying from `artifacts` and waiting as `policy` says
    pub fn new(artifacts: ArtifactStore, policy: ConfirmationPolicy) -> Self {
        Self { artifacts, policy }
    }
}

impl ChainClient for AlloyChainClient {
    type Handle = AlloyHandle;
    type Pending = PendingDeployment;

    async fn connect(&self, profile: &NetworkProfile) -> Result<AlloyHandle, DeployError> {
        let key = profile
            .accounts
            .first()
            .ok_or_else(|| DeployError::Connection("network profile has no account".to_string()))?;

        // Create our signer
        let signer = key
            .expose()
            .parse::<PrivateKeySigner>()
            .map_err(|e| DeployError::Connection(format!("invalid deployer key: {e}")))?;
        let deployer = signer.address();

        // Create our provider with the rpc client + signer
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(profile.rpc_url.clone())
            .erased();

        // Fetch chain id, doubles as a reachability check
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| DeployError::Connection(format!("{}: {e}", profile.rpc_url)))?;
        if let Some(expected) = profile.chain_id {
            if expected != chain_id {
                return Err(DeployError::Connection(format!(
                    "network `{}` expects chain id {expected}, node reports {chain_id}",
                    profile.name
                )));
            }
        }

        info!(%deployer, "Built client on chain ID: {}", chain_id);

        Ok(AlloyHandle { provider, deployer })
    }

    async fn deploy(
        &self,
        handle: &AlloyHandle,
        contract: &str,
        constructor_args: &[String],
    ) -> Result<PendingDeployment, DeployError> {
        let artifact = self.artifacts.load(contract)?;
        let code = encode_deploy_code(&artifact, constructor_args)?;
        info!(deployer = %handle.deployer, bytes = code.len(), "Sending {contract} creation code");

        send_deploy_transaction(&handle.provider, code).await
    }

    async fn wait_for_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<DeploymentResult, DeployError> {
        wait_for_deployment(pending, &self.policy).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Url;

    use super::*;
    use crate::config::PrivateKey;

    fn profile(key: &str) -> NetworkProfile {
        NetworkProfile {
            name: "local".to_string(),
            // Nothing listens on the discard port
            rpc_url: Url::parse("http://127.0.0.1:9/").unwrap(),
            chain_id: None,
            accounts: vec![PrivateKey::new(key)],
            explorer: None,
        }
    }

    fn client() -> AlloyChainClient {
        AlloyChainClient::new(ArtifactStore::new("artifacts"), ConfirmationPolicy::default())
    }

    #[test]
    fn policy_waits_for_at_least_one_block() {
        assert_eq!(ConfirmationPolicy::new(0, None).confirmations, 1);
        assert_eq!(ConfirmationPolicy::new(3, None).confirmations, 3);
    }

    #[tokio::test]
    async fn malformed_key_is_rejected_before_dialing() {
        let err = client().connect(&profile("abc123")).await.err().unwrap();
        assert!(matches!(err, DeployError::Connection(ref msg) if msg.contains("invalid deployer key")));
    }

    #[tokio::test]
    async fn unreachable_node_is_a_connection_error() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

        let err = client().connect(&profile(key)).await.err().unwrap();

        assert!(matches!(err, DeployError::Connection(ref msg) if msg.contains("127.0.0.1")));
    }
}
