//! Utilities for the deploy & verify scripts.

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::Address;
use serde_json::{Map, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Read a JSON deployments file
pub fn get_json_from_file(file_path: &Path) -> Result<Value, ScriptError> {
    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Read the address stored under `contract_key` in the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;

    let addr = parsed_json[DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!(
                "no `{contract_key}` address in {}",
                file_path.display()
            ))
        })?;

    Address::from_str(addr).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record `address` under `contract_key` in the deployments file, creating it if needed
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        get_json_from_file(file_path).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?
    } else {
        Value::Object(Map::new())
    };

    let root = parsed_json.as_object_mut().ok_or_else(|| {
        ScriptError::WriteDeployments(format!("{} is not a JSON object", file_path.display()))
    })?;
    let deployments = root
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    let deployments = deployments.as_object_mut().ok_or_else(|| {
        ScriptError::WriteDeployments(format!("`{DEPLOYMENTS_KEY}` is not a JSON object"))
    })?;
    deployments.insert(
        contract_key.to_string(),
        Value::String(format!("{address:#x}")),
    );

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}
