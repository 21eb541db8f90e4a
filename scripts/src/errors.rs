//! Definitions of errors that can occur during a contract deployment

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur while deploying a contract.
///
/// Every variant is terminal for the run: nothing in the deploy flow retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// Missing or malformed network / credential configuration
    Configuration(String),
    /// The node is unreachable or rejected our credentials
    Connection(String),
    /// The contract creation transaction could not be built or was refused
    Submission(String),
    /// The transaction reverted, or we gave up waiting for it
    Confirmation(String),
}

impl DeployError {
    /// What the operator should do before invoking the deploy again
    pub fn hint(&self) -> &'static str {
        match self {
            DeployError::Configuration(_) => "fix the network configuration, then re-run",
            DeployError::Connection(_) => "check the RPC endpoint and key, a fresh run is safe",
            DeployError::Submission(_) => {
                "check the artifact, constructor arguments and deployer balance"
            }
            DeployError::Confirmation(_) => {
                "the transaction may still land: inspect the chain before re-running"
            }
        }
    }
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::Configuration(s) => write!(f, "configuration error: {}", s),
            DeployError::Connection(s) => write!(f, "error connecting to the network: {}", s),
            DeployError::Submission(s) => write!(f, "error submitting deployment: {}", s),
            DeployError::Confirmation(s) => write!(f, "error confirming deployment: {}", s),
        }
    }
}

impl Error for DeployError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure_kind() {
        let err = DeployError::Configuration("unknown network `mainnet`".to_string());
        assert_eq!(err.to_string(), "configuration error: unknown network `mainnet`");

        let err = DeployError::Confirmation("reverted".to_string());
        assert!(err.to_string().starts_with("error confirming deployment"));
    }

    #[test]
    fn confirmation_hint_warns_about_double_deploys() {
        let err = DeployError::Confirmation(String::new());
        assert!(err.hint().contains("inspect the chain"));
    }
}
