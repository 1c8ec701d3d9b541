use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::node::Node;
use crate::transaction::Transaction;

/// Shared application state: one ledger node per process.
pub struct AppState {
    pub node: Node,
}

impl AppState {
    pub fn new(node: Node) -> Self {
        Self { node }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub block: Block,
}

#[derive(Serialize)]
pub struct DifficultyResponse {
    pub difficulty: u32,
}

#[derive(Deserialize)]
pub struct SetDifficultyRequest {
    pub difficulty: u32,
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

/// Accepts either a single `address` or a list of `addresses`.
#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl RegisterNodesRequest {
    pub fn into_addresses(self) -> Vec<String> {
        self.address.into_iter().chain(self.addresses).collect()
    }
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub length: usize,
    pub chain: Vec<Block>,
}
