use chrono::Utc;
use log::debug;

use super::{Block, ProofOfWork};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a ledger seeded with the genesis block.
    pub fn new(difficulty: u32) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            difficulty,
        };
        ledger.create_genesis_block();
        ledger
    }

    fn create_genesis_block(&mut self) {
        let genesis = Block::genesis(Utc::now().timestamp_millis());
        debug!("genesis block created at {}", genesis.timestamp);
        self.chain.push(genesis);
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// The pool is drained in the same step, so every pooled transaction
    /// lands in exactly one block.
    pub fn create_block(&mut self, proof: u64, previous_hash: String) -> &Block {
        let index = self.chain.len() as u64 + 1;
        let now = Utc::now().timestamp_millis();
        let timestamp = match self.chain.last() {
            Some(last) => now.max(last.timestamp),
            None => now,
        };
        let transactions = std::mem::take(&mut self.pending);

        let block = Block::new(index, timestamp, transactions, proof, previous_hash);
        debug!(
            "block #{} created (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.chain.push(block);
        &self.chain[self.chain.len() - 1]
    }

    /// Pool a transaction; returns the index of the block expected to hold it.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<u64> {
        let next_index = self.last_block()?.index + 1;
        self.pending.push(tx);
        Ok(next_index)
    }

    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Swap in a whole chain. Callers validate first.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        // NOTE: Changing difficulty affects future blocks only.
        self.difficulty = difficulty;
    }

    pub fn pow(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty)
    }
}
