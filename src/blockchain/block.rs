use serde::{Deserialize, Serialize};

use super::hash::hash_block;
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A sealed block. Field order is the canonical hash order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix millis (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    #[serde(rename = "previousHash")]
    pub previous_hash: String,
}

impl Block {
    /// The first block of every chain: index 1, proof 1, previous hash "0".
    pub fn genesis(timestamp: i64) -> Self {
        Self {
            index: 1,
            timestamp,
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    pub fn new(
        index: u64,
        timestamp: i64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 (hex) of this block's canonical encoding.
    pub fn compute_hash(&self) -> String {
        hash_block(self)
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    fn sample() -> Block {
        Block::new(
            2,
            1_700_000_000_000,
            vec![
                Transaction::new("alice", "bob", 3),
                Transaction::new("bob", "carol", 1),
            ],
            35293,
            "abc".into(),
        )
    }

    #[test]
    fn genesis_shape() {
        let g = Block::genesis(0);
        assert_eq!(g.index, 1);
        assert_eq!(g.proof, 1);
        assert_eq!(g.previous_hash, "0");
        assert!(g.transactions.is_empty());
        assert!(g.is_genesis());
    }

    #[test]
    fn hash_is_deterministic_and_hex() {
        let a = sample();
        let b = sample();
        assert_eq!(a.compute_hash(), b.compute_hash());
        assert_eq!(a.compute_hash().len(), 64);
        assert!(a.compute_hash().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn any_field_change_changes_hash() {
        let base = sample().compute_hash();

        let mut b = sample();
        b.index += 1;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.timestamp += 1;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.proof += 1;
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.previous_hash.push('0');
        assert_ne!(base, b.compute_hash());

        let mut b = sample();
        b.transactions[0].amount = 4;
        assert_ne!(base, b.compute_hash());
    }

    #[test]
    fn transaction_order_matters() {
        let mut b = sample();
        b.transactions.reverse();
        assert_ne!(sample().compute_hash(), b.compute_hash());
    }

    #[test]
    fn wire_shape_uses_previous_hash_camel_case() {
        let json = serde_json::to_string(&Block::genesis(7)).unwrap();
        assert_eq!(
            json,
            r#"{"index":1,"timestamp":7,"transactions":[],"proof":1,"previousHash":"0"}"#
        );
    }
}
