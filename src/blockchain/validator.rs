use log::debug;

use super::{Block, ProofOfWork};
use crate::error::{LedgerError, Result};

/// Checks candidate chains before they may replace the local one.
///
/// `linkage_only` only verifies that every block names the hash of its
/// predecessor. A peer can therefore win with a well-linked chain of
/// trivial proofs. `strict` also requires a genesis first block, sequential
/// indices and a proof meeting the given difficulty for every later block.
#[derive(Debug, Clone, Copy)]
pub struct ChainValidator {
    pow: Option<ProofOfWork>,
}

impl ChainValidator {
    pub fn linkage_only() -> Self {
        Self { pow: None }
    }

    pub fn strict(pow: ProofOfWork) -> Self {
        Self { pow: Some(pow) }
    }

    /// Difficulty every block must meet, if proofs are checked at all.
    pub fn required_difficulty(&self) -> Option<u32> {
        self.pow.map(|p| p.difficulty())
    }

    pub fn is_valid(&self, chain: &[Block]) -> bool {
        match self.check(chain) {
            Ok(()) => {
                debug!("chain of {} blocks is valid", chain.len());
                true
            }
            Err(e) => {
                debug!("chain validation failed: {e}");
                false
            }
        }
    }

    /// Walk the chain from the second block, stopping at the first bad pair.
    pub fn check(&self, chain: &[Block]) -> Result<()> {
        if chain.is_empty() {
            return Err(LedgerError::InvalidChain("chain is empty".into()));
        }
        if self.pow.is_some() && !chain[0].is_genesis() {
            return Err(LedgerError::InvalidChain(
                "first block is not a genesis block".into(),
            ));
        }

        for pair in chain.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);

            if current.previous_hash != prev.compute_hash() {
                return Err(LedgerError::InvalidChain(format!(
                    "block #{} does not link to block #{}",
                    current.index, prev.index
                )));
            }

            if let Some(pow) = &self.pow {
                if current.index != prev.index + 1 {
                    return Err(LedgerError::InvalidChain(format!(
                        "block #{} follows block #{}",
                        current.index, prev.index
                    )));
                }
                if !pow.is_valid(prev.proof, current.proof) {
                    return Err(LedgerError::InvalidChain(format!(
                        "block #{} proof {} misses difficulty {}",
                        current.index,
                        current.proof,
                        pow.difficulty()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for ChainValidator {
    fn default() -> Self {
        Self::linkage_only()
    }
}

#[cfg(test)]
mod tests {
    use super::ChainValidator;
    use crate::blockchain::{Block, ProofOfWork};
    use crate::transaction::Transaction;

    /// Build a linked chain of `len` blocks, optionally with real proofs.
    fn build_chain(len: usize, pow: Option<ProofOfWork>) -> Vec<Block> {
        let mut chain = vec![Block::genesis(1_000)];
        while chain.len() < len {
            let prev = chain.last().unwrap();
            let proof = pow.map(|p| p.solve(prev.proof)).unwrap_or(0);
            let block = Block::new(
                prev.index + 1,
                prev.timestamp + 1,
                vec![Transaction::new("a", "b", chain.len() as u64)],
                proof,
                prev.compute_hash(),
            );
            chain.push(block);
        }
        chain
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert!(!ChainValidator::linkage_only().is_valid(&[]));
    }

    #[test]
    fn single_block_is_valid() {
        assert!(ChainValidator::linkage_only().is_valid(&build_chain(1, None)));
    }

    #[test]
    fn linked_chain_is_valid() {
        assert!(ChainValidator::linkage_only().is_valid(&build_chain(5, None)));
    }

    #[test]
    fn tampered_block_breaks_linkage() {
        let mut chain = build_chain(5, None);
        chain[2].transactions[0].amount = 1_000;
        assert!(!ChainValidator::linkage_only().is_valid(&chain));
    }

    #[test]
    fn tampering_the_tip_goes_unnoticed() {
        // Nothing links to the last block, so its contents are unchecked.
        let mut chain = build_chain(3, None);
        chain[2].transactions.clear();
        assert!(ChainValidator::linkage_only().is_valid(&chain));
    }

    #[test]
    fn linkage_only_accepts_trivial_proofs() {
        let chain = build_chain(4, None);
        assert!(ChainValidator::linkage_only().is_valid(&chain));
        assert!(!ChainValidator::strict(ProofOfWork::new(2)).is_valid(&chain));
    }

    #[test]
    fn strict_accepts_mined_chain() {
        let pow = ProofOfWork::new(2);
        let chain = build_chain(4, Some(pow));
        assert!(ChainValidator::strict(pow).is_valid(&chain));
    }

    #[test]
    fn required_difficulty_follows_mode() {
        assert_eq!(ChainValidator::linkage_only().required_difficulty(), None);
        assert_eq!(
            ChainValidator::strict(ProofOfWork::new(3)).required_difficulty(),
            Some(3)
        );
    }

    #[test]
    fn strict_requires_genesis_first() {
        let pow = ProofOfWork::new(0);
        let chain = build_chain(3, Some(pow));
        assert!(ChainValidator::strict(pow).is_valid(&chain));
        assert!(ChainValidator::linkage_only().is_valid(&chain[1..]));
        assert!(!ChainValidator::strict(pow).is_valid(&chain[1..]));
    }

    #[test]
    fn strict_rejects_index_gap() {
        let pow = ProofOfWork::new(0);
        let mut chain = build_chain(2, Some(pow));
        let prev = &chain[1];
        let skipped = Block::new(
            prev.index + 2,
            prev.timestamp,
            vec![],
            0,
            prev.compute_hash(),
        );
        chain.push(skipped);
        assert!(ChainValidator::linkage_only().is_valid(&chain));
        assert!(!ChainValidator::strict(pow).is_valid(&chain));
    }
}
