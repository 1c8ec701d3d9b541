use sha2::{Digest, Sha256};

use super::Block;

/// Lower-case hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Digest of a block's canonical JSON encoding
/// (`index, timestamp, transactions, proof, previousHash`).
pub fn hash_block(block: &Block) -> String {
    let preimage = serde_json::to_vec(block).expect("serialize block");
    sha256_hex(&preimage)
}
