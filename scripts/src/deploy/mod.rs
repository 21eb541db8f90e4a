//! The deploy-and-confirm flow and the values it passes around

pub mod orchestrator;

pub use orchestrator::deploy_contract;

/// What to deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Name of the compiled artifact
    pub contract: String,
    /// Constructor arguments, in declaration order
    pub constructor_args: Vec<String>,
}

impl DeploymentRequest {
    /// Request for `contract`, with no constructor arguments
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            constructor_args: Vec::new(),
        }
    }

    /// Set the constructor arguments
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.constructor_args = args;
        self
    }
}

/// A mined contract creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Checksummed address of the new contract
    pub contract_address: String,
    /// Hash of the creation transaction
    pub transaction_hash: String,
    /// Set once the creation is mined at the requested depth
    pub confirmed: bool,
}

impl DeploymentResult {
    /// The line printed once `contract` is live
    pub fn report_line(&self, contract: &str) -> String {
        format!("{contract} contract deployed to {}", self.contract_address)
    }
}

/// Lifecycle of a single deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// Request built, nothing sent yet
    Pending,
    /// Accepted by the node, not in a block yet
    Submitted,
    /// Mined with a contract address
    Confirmed,
    /// Gave up, for any reason
    Failed,
}

impl DeploymentState {
    /// Whether the deployment is over, one way or the other
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentState::Confirmed | DeploymentState::Failed)
    }

    /// Move to `next` if the lifecycle allows it, returns whether it did
    pub fn transition(&mut self, next: DeploymentState) -> bool {
        use DeploymentState::*;

        if self.is_terminal() {
            return false;
        }
        let allowed = matches!(
            (*self, next),
            (Pending, Submitted | Failed) | (Submitted, Confirmed | Failed)
        );
        if allowed {
            *self = next;
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::DeploymentState::*;
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let mut state = Pending;
        assert!(state.transition(Submitted));
        assert!(state.transition(Confirmed));
        assert!(state.is_terminal());
    }

    #[test]
    fn terminal_states_are_final() {
        for terminal in [Confirmed, Failed] {
            for next in [Pending, Submitted, Confirmed, Failed] {
                let mut state = terminal;
                assert!(!state.transition(next));
                assert_eq!(state, terminal);
            }
        }
    }

    #[test]
    fn cannot_confirm_without_submitting() {
        let mut state = Pending;
        assert!(!state.transition(Confirmed));
        assert_eq!(state, Pending);
        assert!(state.transition(Failed));
    }

    #[test]
    fn report_line_names_contract_and_address() {
        let result = DeploymentResult {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            transaction_hash: "0x01".to_string(),
            confirmed: true,
        };
        assert_eq!(
            result.report_line("DegenGame"),
            "DegenGame contract deployed to 0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }
}
