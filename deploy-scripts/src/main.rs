use clap::Parser;
use curation_scripts::{cli::Cli, config::ChainConfig, errors::ScriptError, tooling::ForgeTooling};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        chain,
        forge_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ChainConfig::load(&chain)?;
    let tooling = ForgeTooling::with_forge_path(config, forge_path);

    command.run(&tooling).await
}
