pub mod client;
pub mod consensus;
pub mod peers;

pub use client::{ChainSource, HttpChainSource};
pub use consensus::Resolver;
pub use peers::PeerSet;

/// Path queried on every peer during conflict resolution.
pub const CHAIN_PATH: &str = "/api/v1/chain/";
