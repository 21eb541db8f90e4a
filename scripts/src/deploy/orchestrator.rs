//! Runs a single deployment from connection to confirmation

use tracing::{debug, info};

use crate::{
    config::NetworkProfile,
    deploy::{DeploymentRequest, DeploymentResult, DeploymentState},
    errors::DeployError,
    tx::ChainClient,
};

/// Connect, submit, and wait for `request` to be mined on `profile`'s network.
///
/// Any failure ends the deployment: nothing is retried here, since a second
/// submission would deploy a second contract.
pub async fn deploy_contract<C: ChainClient>(
    client: &C,
    profile: &NetworkProfile,
    request: &DeploymentRequest,
) -> Result<DeploymentResult, DeployError> {
    let mut state = DeploymentState::Pending;

    let outcome = run(client, profile, request, &mut state).await;
    match &outcome {
        Ok(result) => {
            state.transition(DeploymentState::Confirmed);
            info!(
                network = %profile.name,
                tx_hash = %result.transaction_hash,
                "{} contract deployed to {}",
                request.contract,
                result.contract_address
            );
            if let Some(link) = profile.explorer_link(&result.contract_address) {
                info!("View it at {link}");
            }
        }
        Err(e) => {
            let submitted = state == DeploymentState::Submitted;
            state.transition(DeploymentState::Failed);
            debug!(contract = %request.contract, submitted, "Deployment stopped: {e}");
        }
    }
    debug!(?state, "Deployment finished");

    outcome
}

/// The connect, submit, wait sequence, advancing `state` as it goes
async fn run<C: ChainClient>(
    client: &C,
    profile: &NetworkProfile,
    request: &DeploymentRequest,
    state: &mut DeploymentState,
) -> Result<DeploymentResult, DeployError> {
    if profile.accounts.is_empty() {
        return Err(DeployError::Connection(format!(
            "network `{}` has no account to deploy from",
            profile.name
        )));
    }

    info!(network = %profile.name, "Connecting...");
    let handle = client.connect(profile).await?;

    info!(
        args = request.constructor_args.len(),
        "Deploying {}...", request.contract
    );
    let pending = client
        .deploy(&handle, &request.contract, &request.constructor_args)
        .await?;
    state.transition(DeploymentState::Submitted);

    let result = client.wait_for_confirmation(pending).await?;
    if !result.confirmed || result.contract_address.is_empty() {
        return Err(DeployError::Confirmation(format!(
            "client reported an unconfirmed deployment of {}",
            request.contract
        )));
    }

    Ok(result)
}
