//! Constants used in the deploy & verify scripts

use std::time::Duration;

/// The fully-qualified name of the CurationManager contract
pub const CURATION_MANAGER_CONTRACT: &str = "src/CurationManager.sol:CurationManager";

/// The address of the CurationManager deployment re-verified by the `verify` command
pub const DEFAULT_VERIFIED_ADDRESS: &str = "0x269921f2cf8c16a1839b3dea1c253a1f85f0b27b";

/// The number of verification attempts made before giving up
pub const VERIFY_ATTEMPTS: u32 = 3;

/// Delay before the first verification retry.
///
/// Block explorers index new bytecode with some lag, so the first retry waits a while.
pub const DEFAULT_RETRY_INITIAL_DELAY: Duration = Duration::from_secs(10);

/// Upper bound on the delay between verification retries
pub const DEFAULT_RETRY_MAX_DELAY: Duration = Duration::from_secs(60);

/// Default `title` constructor argument
pub const DEFAULT_TITLE: &str = "title";

/// Default `curationLimit` constructor argument
pub const DEFAULT_CURATION_LIMIT: u64 = 0;

/// Default `isActive` constructor argument
pub const DEFAULT_IS_ACTIVE: bool = true;

/// The key in the deployments file under which contract addresses are stored
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The key for the CurationManager contract in the deployments file
pub const CURATION_MANAGER_CONTRACT_KEY: &str = "curation_manager_contract";

// ---------------
// | Environment |
// ---------------

/// The prefix of the per-chain environment file, `.env.<CHAIN>`
pub const ENV_FILE_PREFIX: &str = ".env";

/// Env var holding the chain RPC endpoint
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// Env var holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Env var holding the block explorer API key
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Env var holding an optional custom verifier endpoint
pub const VERIFIER_URL_ENV_VAR: &str = "VERIFIER_URL";

// ---------
// | Forge |
// ---------

/// The default forge executable
pub const FORGE_COMMAND: &str = "forge";

/// The forge subcommand used to deploy a contract
pub const CREATE_COMMAND: &str = "create";

/// The forge subcommand used to verify a contract
pub const VERIFY_COMMAND: &str = "verify-contract";
