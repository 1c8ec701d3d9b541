pub mod block;
pub mod hash;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use model::Ledger;
pub use pow::ProofOfWork;
pub use validator::ChainValidator;

/// Default Proof-of-Work difficulty (leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Upper bound accepted when changing difficulty at runtime.
pub const DIFF_MAX: u32 = 6;

/// Amount paid to the miner for each forged block.
pub const MINING_REWARD: u64 = 1;

/// Sender of the reward transaction; marks newly minted coins.
pub const REWARD_SENDER: &str = "0";

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 1;
