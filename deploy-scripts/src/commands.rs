//! Implementations of the deploy & verify scripts

use std::{
    path::Path,
    sync::atomic::{AtomicU32, Ordering},
};

use alloy_primitives::Address;
use backon::Retryable;
use tracing::{info, warn};

use crate::{
    constants::CURATION_MANAGER_CONTRACT_KEY,
    errors::ScriptError,
    retry::RetryPolicy,
    tooling::ContractTooling,
    types::{ContractDeployment, CreateOutput, DeploymentResult, VerificationResult},
    utils::write_deployed_address,
};

/// Verify the contract at `address`, making at most `policy.attempts()` attempts.
///
/// Returns on the first accepted attempt; once the budget is exhausted, or on an
/// error that can't be retried, the last error is returned.
pub async fn retry_verify(
    tooling: &impl ContractTooling,
    policy: RetryPolicy,
    address: Address,
    deployment: &ContractDeployment,
) -> Result<VerificationResult, ScriptError> {
    let attempts = AtomicU32::new(0);
    let counter = &attempts;

    (move || {
        counter.fetch_add(1, Ordering::Relaxed);
        tooling.verify(address, deployment)
    })
    .retry(policy.to_backoff_builder())
    .when(ScriptError::is_retryable)
    .notify(|err, delay| {
        warn!(
            %address,
            attempt = attempts.load(Ordering::Relaxed),
            budget = policy.attempts(),
            ?delay,
            error = %err,
            "verification failed, retrying"
        );
    })
    .await?;

    Ok(VerificationResult {
        address,
        attempts: attempts.load(Ordering::Relaxed),
    })
}

/// Deploy the contract, then verify it under the given retry policy.
///
/// `on_deployed` runs once the contract is on-chain and before verification starts,
/// so its effects survive a failed verification.
pub async fn deploy_and_verify<F>(
    tooling: &impl ContractTooling,
    policy: RetryPolicy,
    deployment: &ContractDeployment,
    on_deployed: F,
) -> Result<DeploymentResult, ScriptError>
where
    F: FnOnce(&CreateOutput) -> Result<(), ScriptError>,
{
    let deploy = tooling.deploy(deployment).await?;
    info!(
        address = %format!("{:#x}", deploy.deployed_to),
        tx_hash = %deploy.transaction_hash,
        "contract deployed"
    );
    on_deployed(&deploy)?;

    let verification = retry_verify(tooling, policy, deploy.deployed_to, deployment).await?;

    Ok(DeploymentResult {
        deploy,
        verification,
    })
}

/// Deploy and verify the CurationManager, returning its address.
///
/// With a `deployments_path`, the address is recorded there as soon as the contract
/// is deployed, ahead of verification.
pub async fn setup_contracts(
    tooling: &impl ContractTooling,
    policy: RetryPolicy,
    deployment: &ContractDeployment,
    deployments_path: Option<&Path>,
) -> Result<Address, ScriptError> {
    info!("deploying curation manager");
    let result = deploy_and_verify(tooling, policy, deployment, |deploy| {
        let Some(path) = deployments_path else {
            return Ok(());
        };

        write_deployed_address(path, CURATION_MANAGER_CONTRACT_KEY, deploy.deployed_to)?;
        info!(path = %path.display(), "recorded deployed address");
        Ok(())
    })
    .await?;

    let address = result.deployed_to();
    info!("Deployed curation manager to {address:#x}");

    Ok(address)
}

/// Re-verify an already-deployed CurationManager at `address`
pub async fn verify_contract(
    tooling: &impl ContractTooling,
    address: Address,
    deployment: &ContractDeployment,
) -> Result<VerificationResult, ScriptError> {
    info!("verifying");
    let verified = retry_verify(tooling, RetryPolicy::default(), address, deployment).await?;
    info!("[verified] {address:#x}");

    Ok(verified)
}
