//! Implementations of the CLI commands

use alloy::signers::local::PrivateKeySigner;
use tracing::info;

use crate::{
    build::ArtifactStore,
    cli::DeployArgs,
    config::NetworkProfile,
    deploy::{deploy_contract, DeploymentRequest},
    errors::DeployError,
    tx::AlloyChainClient,
};

/// Deploy the requested contract on `profile` and print where it landed
pub async fn deploy(args: DeployArgs, profile: &NetworkProfile) -> Result<(), DeployError> {
    let policy = args.confirmation_policy();
    info!(
        confirmations = policy.confirmations,
        timeout = ?policy.timeout,
        artifacts = %args.artifacts.display(),
        "Using confirmation policy"
    );
    let client = AlloyChainClient::new(ArtifactStore::new(args.artifacts), policy);

    let request = DeploymentRequest::new(args.contract).with_args(args.args);
    let result = deploy_contract(&client, profile, &request).await?;

    println!("{}", result.report_line(&request.contract));

    Ok(())
}

/// Print `profile` with its keys reduced to their addresses
pub fn print_profile(profile: &NetworkProfile) {
    println!("network:  {}", profile.name);
    println!("rpc url:  {}", profile.rpc_url);
    match profile.chain_id {
        Some(id) => println!("chain id: {id}"),
        None => println!("chain id: (from node)"),
    }
    for key in &profile.accounts {
        match key.expose().parse::<PrivateKeySigner>() {
            Ok(signer) => println!("account:  {}", signer.address()),
            Err(_) => println!("account:  <invalid key>"),
        }
    }
}
