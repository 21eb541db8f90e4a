//! Definitions of CLI arguments and commands for the deploy script

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy, print_profile},
    config::{resolve_network, Environment, NETWORKS},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACT, DEFAULT_NETWORK},
    errors::DeployError,
    tx::ConfirmationPolicy,
};

/// Deploy the DegenGame contract to an Avalanche network
#[derive(Parser)]
#[command(name = "degen-deploy", version)]
pub struct Cli {
    /// Name of the network to use
    #[arg(short, long, env = "DEPLOY_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a contract and wait for it to be mined
    Deploy(DeployArgs),
    /// Print the resolved network, without connecting to it
    Resolve,
}

impl Command {
    /// Run the command against the network named `network`
    pub async fn run(self, network: &str, env: &Environment) -> Result<(), DeployError> {
        let profile = resolve_network(network, env, NETWORKS)?;

        match self {
            Command::Deploy(args) => {
                info!("Deploying contracts...");
                deploy(args, &profile).await
            }
            Command::Resolve => {
                print_profile(&profile);
                Ok(())
            }
        }
    }
}

/// Deploy a contract
#[derive(Args)]
pub struct DeployArgs {
    /// Name of the contract artifact to deploy
    #[arg(short, long, default_value = DEFAULT_CONTRACT)]
    pub contract: String,

    /// Constructor argument, repeat in declaration order
    #[arg(short, long = "arg")]
    pub args: Vec<String>,

    /// Hardhat artifacts directory
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Number of blocks to wait for, the inclusion block counts as one
    #[arg(long, default_value_t = 1)]
    pub confirmations: u64,

    /// Seconds to wait for the deployment to be mined, waits forever when unset
    #[arg(long, value_name = "SECS")]
    pub confirmation_timeout: Option<u64>,
}

impl DeployArgs {
    /// Confirmation policy described by the flags
    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy::new(
            self.confirmations,
            self.confirmation_timeout.map(Duration::from_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_defaults() {
        let cli = Cli::try_parse_from(["degen-deploy", "deploy"]).unwrap();

        let Command::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert_eq!(args.contract, "DegenGame");
        assert!(args.args.is_empty());
        assert_eq!(args.confirmation_policy(), ConfirmationPolicy::new(1, None));
    }

    #[test]
    fn deploy_with_arguments_and_timeout() {
        let cli = Cli::try_parse_from([
            "degen-deploy",
            "--network",
            "snowtrace",
            "deploy",
            "--contract",
            "Token",
            "--arg",
            "42",
            "-a",
            "0x00000000000000000000000000000000000000ff",
            "--confirmations",
            "3",
            "--confirmation-timeout",
            "90",
        ])
        .unwrap();

        assert_eq!(cli.network, "snowtrace");
        let Command::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert_eq!(args.contract, "Token");
        assert_eq!(args.args.len(), 2);
        assert_eq!(
            args.confirmation_policy(),
            ConfirmationPolicy::new(3, Some(Duration::from_secs(90)))
        );
    }

    #[tokio::test]
    async fn unknown_network_fails_before_running() {
        let env: Environment = [("PRIVATE_KEY", "abc123")].into_iter().collect();

        let err = Command::Resolve.run("mainnet", &env).await.unwrap_err();

        assert!(matches!(err, DeployError::Configuration(_)));
    }
}
