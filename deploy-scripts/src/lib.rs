//! Scripts for deploying and verifying the CurationManager contract.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod retry;
mod solidity;
pub mod tooling;
pub mod types;
pub mod utils;
