//! The external tooling used to deploy and verify contracts

use std::{future::Future, process::Output};

use alloy_primitives::{hex, Address};
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    config::ChainConfig,
    constants::{CREATE_COMMAND, FORGE_COMMAND, VERIFY_COMMAND},
    errors::ScriptError,
    types::{ContractDeployment, CreateOutput},
};

/// A backend able to deploy contracts and submit them for verification
pub trait ContractTooling {
    /// Deploy the contract with its constructor arguments
    fn deploy(
        &self,
        deployment: &ContractDeployment,
    ) -> impl Future<Output = Result<CreateOutput, ScriptError>> + Send;

    /// Submit the contract deployed at `address` for verification, once
    fn verify(
        &self,
        address: Address,
        deployment: &ContractDeployment,
    ) -> impl Future<Output = Result<(), ScriptError>> + Send;
}

/// [`ContractTooling`] backed by Foundry's `forge` CLI
#[derive(Clone, Debug)]
pub struct ForgeTooling {
    /// The chain to deploy to and verify on
    config: ChainConfig,
    /// The forge executable
    forge_path: String,
}

impl ForgeTooling {
    /// Use `forge` from the `PATH`
    pub fn new(config: ChainConfig) -> Self {
        Self::with_forge_path(config, FORGE_COMMAND)
    }

    /// Use the forge executable at `forge_path`
    pub fn with_forge_path(config: ChainConfig, forge_path: impl Into<String>) -> Self {
        Self {
            config,
            forge_path: forge_path.into(),
        }
    }

    /// Build the `forge create` command for the deployment.
    ///
    /// `--constructor-args` consumes every following value, so it goes last.
    pub fn create_command(&self, deployment: &ContractDeployment) -> Command {
        let mut cmd = Command::new(&self.forge_path);
        cmd.arg(CREATE_COMMAND)
            .arg(&deployment.contract)
            .arg("--rpc-url")
            .arg(&self.config.rpc_url)
            .arg("--private-key")
            .arg(&self.config.private_key)
            .arg("--broadcast")
            .arg("--json")
            .arg("--constructor-args")
            .args(deployment.args.to_cli_args());

        cmd
    }

    /// Build the `forge verify-contract` command for the contract at `address`
    pub fn verify_command(&self, address: Address, deployment: &ContractDeployment) -> Command {
        let mut cmd = Command::new(&self.forge_path);
        cmd.arg(VERIFY_COMMAND)
            .arg(format!("{address:#x}"))
            .arg(&deployment.contract)
            .arg("--rpc-url")
            .arg(&self.config.rpc_url)
            .arg("--etherscan-api-key")
            .arg(&self.config.etherscan_api_key)
            .arg("--constructor-args")
            .arg(hex::encode_prefixed(deployment.args.abi_encode()))
            .arg("--watch");

        if let Some(verifier_url) = &self.config.verifier_url {
            cmd.arg("--verifier-url").arg(verifier_url);
        }

        cmd
    }
}

impl ContractTooling for ForgeTooling {
    async fn deploy(&self, deployment: &ContractDeployment) -> Result<CreateOutput, ScriptError> {
        info!(contract = %deployment.contract, chain = %self.config.chain, "running forge create");
        let output = run_command(self.create_command(deployment)).await?;

        if !output.status.success() {
            return Err(ScriptError::ContractDeployment(format!(
                "forge create exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_create_output(&String::from_utf8_lossy(&output.stdout))
    }

    async fn verify(
        &self,
        address: Address,
        deployment: &ContractDeployment,
    ) -> Result<(), ScriptError> {
        info!(%address, contract = %deployment.contract, "running forge verify-contract");
        let output = run_command(self.verify_command(address, deployment)).await?;

        if !output.status.success() {
            // forge reports explorer rejections on stdout, spawn-level problems on stderr
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptError::VerificationRejected(format!(
                "forge verify-contract exited with {}: {} {}",
                output.status,
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Run a command to completion, capturing its output
async fn run_command(mut cmd: Command) -> Result<Output, ScriptError> {
    debug!(program = ?cmd.as_std().get_program(), "spawning command");
    cmd.kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ScriptError::CommandExecution(e.to_string()))
}

/// Parse the output of `forge create --json`.
///
/// Compilation progress may precede the JSON, so the last line holding a valid
/// object is taken.
pub fn parse_create_output(stdout: &str) -> Result<CreateOutput, ScriptError> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .find_map(|line| serde_json::from_str(line).ok())
        .ok_or_else(|| {
            ScriptError::OutputParsing(format!(
                "no deployment JSON in forge create output: {}",
                stdout.trim()
            ))
        })
}
