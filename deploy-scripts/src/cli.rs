//! Definitions of CLI arguments and commands for the deploy & verify scripts

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{setup_contracts, verify_contract},
    constants::{CURATION_MANAGER_CONTRACT_KEY, DEFAULT_VERIFIED_ADDRESS, FORGE_COMMAND},
    errors::ScriptError,
    retry::RetryPolicy,
    tooling::ContractTooling,
    types::ContractDeployment,
    utils::parse_addr_from_deployments_file,
};

/// Deploy and verify the CurationManager contract
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Chain identifier, selecting the `.env.<CHAIN>` file to load
    #[arg(short, long, env = "CHAIN")]
    pub chain: String,

    /// The forge executable
    #[arg(long, default_value = FORGE_COMMAND)]
    pub forge_path: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Deploy(DeployArgs),
    Verify(VerifyArgs),
}

/// Deploy the CurationManager contract and verify it on the block explorer
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Record the deployed address in this deployments file
    #[arg(long)]
    pub deployments_path: Option<PathBuf>,
}

/// Re-verify an already-deployed CurationManager contract
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Address of the deployed contract
    #[arg(short, long, conflicts_with = "deployments_path")]
    pub address: Option<Address>,

    /// Read the contract address from this deployments file
    #[arg(long)]
    pub deployments_path: Option<PathBuf>,
}

impl VerifyArgs {
    /// The address to verify: the explicit one, else the deployments file's, else the default
    pub fn target_address(&self) -> Result<Address, ScriptError> {
        if let Some(address) = self.address {
            return Ok(address);
        }

        match &self.deployments_path {
            Some(path) => parse_addr_from_deployments_file(path, CURATION_MANAGER_CONTRACT_KEY),
            None => DEFAULT_VERIFIED_ADDRESS
                .parse()
                .map_err(|e| ScriptError::Config(format!("invalid default address: {e}"))),
        }
    }
}

impl Command {
    pub async fn run(self, tooling: &impl ContractTooling) -> Result<(), ScriptError> {
        let deployment = ContractDeployment::curation_manager();

        match self {
            Command::Deploy(args) => {
                setup_contracts(
                    tooling,
                    RetryPolicy::default(),
                    &deployment,
                    args.deployments_path.as_deref(),
                )
                .await?;

                Ok(())
            }
            Command::Verify(args) => {
                let address = args.target_address()?;
                verify_contract(tooling, address, &deployment).await?;

                Ok(())
            }
        }
    }
}
