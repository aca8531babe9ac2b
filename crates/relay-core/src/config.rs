//! Configuration for the scanning core: chain endpoints, the watched account
//! set, and the proof-root mismatch policy.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use relay_types::Account;
use serde::Deserialize;
use url::Url;

/// CLI arguments accepted by the relay runner.
#[derive(Parser, Debug)]
#[command(name = "relay-runner")]
#[command(about = "Commitment discovery and proof-assembly relay")]
struct CliArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short, env = "CONFIG", default_value = "config.json")]
    config: PathBuf,
}

/// Scanning core configuration, loaded from a JSON file whose path defaults
/// to `./config.json` and can be overridden with `--config`/`CONFIG`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The parachain's own identifier, used to look it up in `Paras::Heads`.
    pub para_id: u32,
    /// Accounts whose outbound nonces are compared against Ethereum on every scan.
    pub accounts: Vec<Account>,
    pub parachain_rpc: Url,
    pub relay_chain_rpc: Url,
    pub ethereum_rpc: Url,
    /// Address of the inbound channel contract on the Ethereum side, as a
    /// `0x`-prefixed hex string — left unparsed here so this crate has no
    /// dependency on an EVM address type; `relay-rpc`/`relay-runner` parse it.
    pub inbound_channel_address: String,
    /// When `true` (the default), a Merkle proof that does not resolve to
    /// the expected root is a hard `InconsistencyError::ProofRootMismatch`.
    /// When `false`, the mismatch is logged and the task is dropped instead.
    #[serde(default = "config_defaults::default_strict_proof_roots")]
    pub strict_proof_roots: bool,
}

mod config_defaults {
    pub fn default_strict_proof_roots() -> bool {
        true
    }
}

/// Errors loading or parsing a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Config {
    /// Loads configuration from CLI arguments (`--config`/`CONFIG`, default
    /// `config.json`) and the JSON file at that path.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        Self::load_from_path(cli_args.config)
    }

    fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|err| ConfigError::FileRead(path, err))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_proof_roots_defaults_true() {
        let json = r#"{
            "para_id": 1000,
            "accounts": [],
            "parachain_rpc": "http://localhost:9944",
            "relay_chain_rpc": "http://localhost:9945",
            "ethereum_rpc": "http://localhost:8545",
            "inbound_channel_address": "0x0000000000000000000000000000000000000000"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.strict_proof_roots);
    }

    #[test]
    fn lenient_proof_roots_can_be_configured() {
        let json = r#"{
            "para_id": 1000,
            "accounts": [],
            "parachain_rpc": "http://localhost:9944",
            "relay_chain_rpc": "http://localhost:9945",
            "ethereum_rpc": "http://localhost:8545",
            "inbound_channel_address": "0x0000000000000000000000000000000000000000",
            "strict_proof_roots": false
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(!config.strict_proof_roots);
    }
}
