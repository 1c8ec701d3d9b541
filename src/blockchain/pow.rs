use std::sync::atomic::{AtomicBool, Ordering};

use super::hash::sha256_hex;

/// How many candidates are tried between checks of the stop flag.
const STOP_POLL_INTERVAL: u64 = 1024;

/// Proof-of-Work puzzle: find `proof` such that
/// `sha256_hex("{last_proof}{proof}")` starts with `difficulty` zeros.
///
/// The preimage is the decimal text of both numbers concatenated, not
/// their sum, so proofs stay checkable by any other node.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Brute-force search from 0 upward. Unbounded.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.is_valid(last_proof, proof) {
            proof += 1;
        }
        proof
    }

    /// Same search as [`solve`](Self::solve), but gives up with `None`
    /// once `stop` is raised.
    pub fn solve_until(&self, last_proof: u64, stop: &AtomicBool) -> Option<u64> {
        let mut proof = 0u64;
        loop {
            if proof % STOP_POLL_INTERVAL == 0 && stop.load(Ordering::Relaxed) {
                return None;
            }
            if self.is_valid(last_proof, proof) {
                return Some(proof);
            }
            proof += 1;
        }
    }

    pub fn is_valid(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        let target_prefix = "0".repeat(self.difficulty as usize);
        sha256_hex(guess.as_bytes()).starts_with(&target_prefix)
    }
}
