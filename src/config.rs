use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, DIFF_MAX, MINING_REWARD};

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub reward: u64,
    /// Recipient of mining rewards; doubles as this node's identity.
    pub miner_address: String,
    /// Bootstrap peers registered at startup.
    pub peers: Vec<String>,
    pub peer_timeout: Duration,
    /// Also check proofs and indices when validating peer chains.
    pub strict_validation: bool,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparsable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            difficulty: parse_var(&lookup, "DIFFICULTY")
                .filter(|d| {
                    let ok = *d <= DIFF_MAX;
                    if !ok {
                        warn!("ignoring DIFFICULTY={d} (max {DIFF_MAX})");
                    }
                    ok
                })
                .unwrap_or(DEFAULT_DIFFICULTY),
            reward: parse_var(&lookup, "MINING_REWARD").unwrap_or(MINING_REWARD),
            miner_address: lookup("MINER_ADDRESS")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            peers: lookup("PEERS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            peer_timeout: Duration::from_secs(
                parse_var(&lookup, "PEER_TIMEOUT_SECS").unwrap_or(5),
            ),
            strict_validation: parse_var(&lookup, "STRICT_VALIDATION").unwrap_or(false),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
