//! Definitions of errors that can occur while deploying and verifying the contracts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy & verify scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error loading the chain configuration
    Config(String),
    /// A retry budget of zero attempts was requested
    InvalidRetryBudget,
    /// Error spawning or waiting on an external command
    CommandExecution(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error parsing the output of an external command
    OutputParsing(String),
    /// The block explorer did not accept the verification request
    VerificationRejected(String),
    /// Error reading the `deployments.json` file
    ReadDeployments(String),
    /// Error writing the `deployments.json` file
    WriteDeployments(String),
}

impl ScriptError {
    /// Whether a verification attempt failing with this error may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScriptError::VerificationRejected(_) | ScriptError::CommandExecution(_)
        )
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Config(s) => write!(f, "error loading configuration: {}", s),
            ScriptError::InvalidRetryBudget => {
                write!(f, "retry budget must be at least one attempt")
            }
            ScriptError::CommandExecution(s) => write!(f, "error executing command: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::OutputParsing(s) => write!(f, "error parsing command output: {}", s),
            ScriptError::VerificationRejected(s) => write!(f, "verification rejected: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
        }
    }
}

impl Error for ScriptError {}
