//! Proof-of-work ledger node: hash-linked blocks, a pending pool, and
//! longest-valid-chain consensus across HTTP peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;
