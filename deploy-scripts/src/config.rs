//! Per-chain configuration, loaded from a `.env.<CHAIN>` file

use std::{
    collections::HashMap,
    env, fmt,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    constants::{
        ENV_FILE_PREFIX, ETHERSCAN_API_KEY_ENV_VAR, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR,
        VERIFIER_URL_ENV_VAR,
    },
    errors::ScriptError,
};

/// The keys read from the environment file
const CONFIG_KEYS: [&str; 4] = [
    RPC_URL_ENV_VAR,
    PRIVATE_KEY_ENV_VAR,
    ETHERSCAN_API_KEY_ENV_VAR,
    VERIFIER_URL_ENV_VAR,
];

/// Connection and credential settings for a single chain
#[derive(Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// The chain identifier selecting the environment file
    pub chain: String,
    /// The chain RPC endpoint
    pub rpc_url: String,
    /// The deployer's private key
    pub private_key: String,
    /// The block explorer API key
    pub etherscan_api_key: String,
    /// A custom verifier endpoint, for explorers that aren't Etherscan
    pub verifier_url: Option<String>,
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("chain", &self.chain)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("etherscan_api_key", &"<redacted>")
            .field("verifier_url", &self.verifier_url)
            .finish()
    }
}

impl ChainConfig {
    /// The path of the environment file for the given chain
    pub fn env_file_path(chain: &str) -> PathBuf {
        PathBuf::from(format!("{ENV_FILE_PREFIX}.{chain}"))
    }

    /// Load the configuration for `chain` from `.env.<chain>` in the working directory.
    ///
    /// Variables already set in the process environment take precedence over the file.
    /// The process environment itself is left untouched.
    pub fn load(chain: &str) -> Result<Self, ScriptError> {
        Self::load_from(chain, &Self::env_file_path(chain), |key| env::var(key).ok())
    }

    /// Load the configuration for `chain` from the env file at `path`, with values
    /// returned by `lookup` taking precedence over the file's
    pub fn load_from<F>(chain: &str, path: &Path, lookup: F) -> Result<Self, ScriptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = read_env_file(path)?;

        for key in CONFIG_KEYS {
            if let Some(value) = lookup(key) {
                vars.insert(key.to_string(), value);
            }
        }

        Self::from_vars(chain, vars)
    }

    /// Build the configuration from key/value pairs
    pub fn from_vars<I>(chain: &str, vars: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars: HashMap<String, String> = vars
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();

        let mut required = |key: &str| {
            vars.remove(key).ok_or_else(|| {
                ScriptError::Config(format!(
                    "missing or empty {key} for chain `{chain}` (checked {} and the process environment)",
                    Self::env_file_path(chain).display()
                ))
            })
        };

        let rpc_url = required(RPC_URL_ENV_VAR)?;
        let private_key = required(PRIVATE_KEY_ENV_VAR)?;
        let etherscan_api_key = required(ETHERSCAN_API_KEY_ENV_VAR)?;
        let verifier_url = vars.remove(VERIFIER_URL_ENV_VAR);

        Ok(Self {
            chain: chain.to_string(),
            rpc_url,
            private_key,
            etherscan_api_key,
            verifier_url,
        })
    }
}

/// Read the key/value pairs of an environment file.
///
/// A missing file yields no pairs, leaving the process environment as the only source.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ScriptError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            warn!(path = %path.display(), "environment file not found");
            return Ok(HashMap::new());
        }
        Err(e) => return Err(ScriptError::Config(e.to_string())),
    };

    let vars = iter
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|e| ScriptError::Config(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), num_vars = vars.len(), "loaded environment file");

    Ok(vars)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn env_file_is_named_after_chain() {
        assert_eq!(ChainConfig::env_file_path("goerli"), PathBuf::from(".env.goerli"));
    }

    #[test]
    fn builds_from_vars() {
        let config = ChainConfig::from_vars(
            "mainnet",
            vars(&[
                ("RPC_URL", "http://localhost:8545"),
                ("PRIVATE_KEY", "0xabc"),
                ("ETHERSCAN_API_KEY", "key"),
                ("UNRELATED", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chain, "mainnet");
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.private_key, "0xabc");
        assert_eq!(config.etherscan_api_key, "key");
        assert_eq!(config.verifier_url, None);
    }

    #[test]
    fn missing_or_empty_key_is_an_error() {
        let err = ChainConfig::from_vars(
            "mainnet",
            vars(&[("RPC_URL", "http://localhost:8545"), ("PRIVATE_KEY", "")]),
        )
        .unwrap_err();

        match err {
            ScriptError::Config(msg) => assert!(msg.contains("PRIVATE_KEY")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ChainConfig::from_vars(
            "mainnet",
            vars(&[
                ("RPC_URL", "http://localhost:8545"),
                ("PRIVATE_KEY", "0xsecretkey"),
                ("ETHERSCAN_API_KEY", "secretapikey"),
            ]),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("0xsecretkey"));
        assert!(!debug.contains("secretapikey"));
        assert!(debug.contains("http://localhost:8545"));
    }

    #[test]
    fn reads_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RPC_URL=https://rpc.example.org").unwrap();
        writeln!(file, "PRIVATE_KEY=0xabc").unwrap();
        writeln!(file, "ETHERSCAN_API_KEY=key").unwrap();
        writeln!(file, "VERIFIER_URL=https://explorer.example.org/api").unwrap();

        let config = ChainConfig::load_from("sepolia", file.path(), |_| None).unwrap();
        assert_eq!(config.rpc_url, "https://rpc.example.org");
        assert_eq!(
            config.verifier_url.as_deref(),
            Some("https://explorer.example.org/api")
        );
    }

    #[test]
    fn missing_env_file_reports_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChainConfig::load_from("nowhere", &dir.path().join(".env.nowhere"), |_| None)
            .unwrap_err();

        match err {
            ScriptError::Config(msg) => {
                assert!(msg.contains("RPC_URL"));
                assert!(msg.contains("process environment"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn process_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RPC_URL=https://rpc.example.org").unwrap();
        writeln!(file, "PRIVATE_KEY=0xabc").unwrap();
        writeln!(file, "ETHERSCAN_API_KEY=file-key").unwrap();

        let config = ChainConfig::load_from("sepolia", file.path(), |key| {
            (key == "ETHERSCAN_API_KEY").then(|| "env-key".to_string())
        })
        .unwrap();

        assert_eq!(config.etherscan_api_key, "env-key");
        // Keys only present in the file are kept
        assert_eq!(config.rpc_url, "https://rpc.example.org");
        assert_eq!(config.private_key, "0xabc");
    }

    #[test]
    fn missing_env_file_falls_back_to_process_env() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<&str, &str> = [
            ("RPC_URL", "http://localhost:8545"),
            ("PRIVATE_KEY", "0xabc"),
            ("ETHERSCAN_API_KEY", "key"),
        ]
        .into_iter()
        .collect();

        let config = ChainConfig::load_from("anvil", &dir.path().join(".env.anvil"), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.chain, "anvil");
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.verifier_url, None);
    }

    #[test]
    fn empty_env_override_is_reported_as_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RPC_URL=https://rpc.example.org").unwrap();
        writeln!(file, "PRIVATE_KEY=0xabc").unwrap();
        writeln!(file, "ETHERSCAN_API_KEY=key").unwrap();

        let err = ChainConfig::load_from("sepolia", file.path(), |key| {
            (key == "RPC_URL").then(String::new)
        })
        .unwrap_err();

        match err {
            ScriptError::Config(msg) => {
                assert!(msg.contains("RPC_URL"));
                assert!(msg.contains("process environment"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
