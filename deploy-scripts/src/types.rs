//! Types shared by the deploy & verify flows

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolConstructor;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CURATION_MANAGER_CONTRACT, DEFAULT_CURATION_LIMIT, DEFAULT_IS_ACTIVE, DEFAULT_TITLE,
    },
    solidity::CurationManager,
};

/// Constructor arguments of the CurationManager contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurationManagerArgs {
    /// The curation list title
    pub title: String,
    /// The pass contract gating curation, or the zero address for none
    pub curation_pass: Address,
    /// The maximum number of curated entries, zero for unlimited
    pub curation_limit: U256,
    /// Whether curation is active at deployment
    pub is_active: bool,
}

impl Default for CurationManagerArgs {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            curation_pass: Address::ZERO,
            curation_limit: U256::from(DEFAULT_CURATION_LIMIT),
            is_active: DEFAULT_IS_ACTIVE,
        }
    }
}

impl CurationManagerArgs {
    /// The arguments as positional values for `forge create --constructor-args`
    pub fn to_cli_args(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!("{:#x}", self.curation_pass),
            self.curation_limit.to_string(),
            self.is_active.to_string(),
        ]
    }

    /// The ABI-encoded constructor parameters, as expected by `forge verify-contract`
    pub fn abi_encode(&self) -> Vec<u8> {
        CurationManager::constructorCall {
            title: self.title.clone(),
            curationPass: self.curation_pass,
            curationLimit: self.curation_limit,
            isActive: self.is_active,
        }
        .abi_encode()
    }
}

/// A contract together with the constructor arguments it is deployed with.
///
/// Verification only succeeds when the arguments match those used at deployment,
/// so both flows share one value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractDeployment {
    /// The fully-qualified contract name, `<source path>:<contract>`
    pub contract: String,
    /// The constructor arguments
    pub args: CurationManagerArgs,
}

impl ContractDeployment {
    /// The CurationManager deployment with its fixed constructor arguments
    pub fn curation_manager() -> Self {
        Self {
            contract: CURATION_MANAGER_CONTRACT.to_string(),
            args: CurationManagerArgs::default(),
        }
    }
}

/// The JSON printed by `forge create --json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutput {
    /// The account that sent the deployment transaction
    pub deployer: Address,
    /// The address of the deployed contract
    pub deployed_to: Address,
    /// The hash of the deployment transaction
    pub transaction_hash: B256,
}

/// The outcome of a successful verification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// The verified contract address
    pub address: Address,
    /// The number of attempts it took
    pub attempts: u32,
}

/// The outcome of deploying and verifying a contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    /// The deployment transaction details
    pub deploy: CreateOutput,
    /// The verification of the deployed contract
    pub verification: VerificationResult,
}

impl DeploymentResult {
    /// The address of the deployed contract
    pub fn deployed_to(&self) -> Address {
        self.deploy.deployed_to
    }
}
