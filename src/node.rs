use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use actix_web::web;
use log::{info, warn};
use serde::Serialize;

use crate::blockchain::{Block, ChainValidator, DIFF_MAX, Ledger, ProofOfWork, REWARD_SENDER};
use crate::config::NodeConfig;
use crate::error::{LedgerError, Result};
use crate::network::{ChainSource, HttpChainSource, PeerSet, Resolver};
use crate::transaction::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutcome {
    pub replaced: bool,
    pub length: usize,
    pub chain: Vec<Block>,
}

/// A ledger node: the chain, its peers and the mining identity.
///
/// All chain and pool mutations go through the ledger write lock. Proof
/// search and peer queries run outside it.
pub struct Node {
    ledger: RwLock<Ledger>,
    peers: RwLock<PeerSet>,
    resolver: Resolver,
    miner_address: String,
    reward: u64,
    stop: Arc<AtomicBool>,
}

impl Node {
    /// Node that fetches peer chains over HTTP.
    pub fn from_config(config: &NodeConfig) -> Self {
        let source = HttpChainSource::new(config.peer_timeout);
        Self::new(config, Box::new(source))
    }

    pub fn new(config: &NodeConfig, source: Box<dyn ChainSource + Send + Sync>) -> Self {
        let validator = if config.strict_validation {
            ChainValidator::strict(ProofOfWork::new(config.difficulty))
        } else {
            ChainValidator::linkage_only()
        };

        let mut peers = PeerSet::new();
        for peer in &config.peers {
            if let Err(e) = peers.add(peer) {
                warn!("ignoring bootstrap peer: {e}");
            }
        }

        Self {
            ledger: RwLock::new(Ledger::new(config.difficulty)),
            peers: RwLock::new(peers),
            resolver: Resolver::new(source, validator, config.peer_timeout),
            miner_address: config.miner_address.clone(),
            reward: config.reward,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    fn read_ledger(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().expect("ledger lock poisoned")
    }

    fn write_ledger(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().expect("ledger lock poisoned")
    }

    pub fn miner_address(&self) -> &str {
        &self.miner_address
    }

    /// Solve the puzzle on the current tip, reward the miner and forge a
    /// block from the pending pool.
    ///
    /// The search runs on the blocking pool. If the tip changes before the
    /// block is forged, the search restarts on the new tip.
    pub async fn mine(&self) -> Result<Block> {
        loop {
            let (last_proof, last_hash, pow) = {
                let ledger = self.read_ledger();
                let last = ledger.last_block()?;
                (last.proof, last.compute_hash(), ledger.pow())
            };

            let stop = Arc::clone(&self.stop);
            let proof = web::block(move || pow.solve_until(last_proof, &stop))
                .await
                .map_err(|e| LedgerError::Internal(e.to_string()))?
                .ok_or(LedgerError::MiningCancelled)?;

            match self.forge(proof, last_hash)? {
                Some(block) => return Ok(block),
                None => warn!("MINER - tip moved while solving, restarting"),
            }
        }
    }

    /// Reward the miner and seal the pool on top of `last_hash`.
    ///
    /// Returns `None`, leaving chain and pool untouched, when `last_hash`
    /// is no longer the tip.
    fn forge(&self, proof: u64, last_hash: String) -> Result<Option<Block>> {
        let mut ledger = self.write_ledger();
        if ledger.last_block()?.compute_hash() != last_hash {
            return Ok(None);
        }

        let reward = Transaction::new(REWARD_SENDER, self.miner_address.as_str(), self.reward);
        ledger.add_transaction(reward)?;
        let block = ledger.create_block(proof, last_hash).clone();
        info!(
            "MINER - forged block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(Some(block))
    }

    /// Abort any running and future proof searches.
    pub fn stop_mining(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn submit_transaction(&self, tx: Transaction) -> Result<u64> {
        tx.validate()?;
        let index = self.write_ledger().add_transaction(tx.clone())?;
        info!(
            "TX - {} -> {} ({}) pooled for block #{}",
            tx.sender, tx.recipient, tx.amount, index
        );
        Ok(index)
    }

    pub fn chain(&self) -> ChainSnapshot {
        let ledger = self.read_ledger();
        ChainSnapshot {
            length: ledger.len(),
            chain: ledger.chain().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.read_ledger().len()
    }

    pub fn pending(&self) -> Vec<Transaction> {
        self.read_ledger().pending().to_vec()
    }

    /// Run the configured validator over the local chain.
    pub fn validate(&self) -> bool {
        self.resolver.validator().is_valid(self.read_ledger().chain())
    }

    pub fn difficulty(&self) -> u32 {
        self.read_ledger().difficulty()
    }

    /// Change the mining difficulty for future blocks.
    ///
    /// Under strict validation the node's own blocks must keep meeting the
    /// validator, so the difficulty cannot drop below it.
    pub fn set_difficulty(&self, difficulty: u32) -> Result<u32> {
        let min = self.resolver.validator().required_difficulty().unwrap_or(0);
        if difficulty < min || difficulty > DIFF_MAX {
            return Err(LedgerError::InvalidDifficulty {
                requested: difficulty,
                min,
                max: DIFF_MAX,
            });
        }
        self.write_ledger().set_difficulty(difficulty);
        info!("difficulty set to {difficulty}");
        Ok(difficulty)
    }

    /// Register a peer. Returns `false` if it was already known.
    pub fn register_peer(&self, address: &str) -> Result<bool> {
        let added = self
            .peers
            .write()
            .expect("peer lock poisoned")
            .add(address)?;
        if added {
            info!("PEERS - registered {}", address.trim());
        }
        Ok(added)
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.read().expect("peer lock poisoned").snapshot()
    }

    /// Replace the local chain with the longest valid peer chain, if one
    /// is strictly longer.
    pub async fn resolve(&self) -> ResolveOutcome {
        let peers = self.peers();
        let local_len = self.read_ledger().len();

        let candidate = self.resolver.resolve(&peers, local_len).await;

        let mut ledger = self.write_ledger();
        let replaced = match candidate {
            Some(chain) if chain.len() > ledger.len() => {
                info!(
                    "CONSENSUS - replacing chain ({} -> {} blocks)",
                    ledger.len(),
                    chain.len()
                );
                ledger.replace_chain(chain);
                true
            }
            Some(_) => {
                info!("CONSENSUS - local chain grew during resolution, keeping it");
                false
            }
            None => false,
        };

        ResolveOutcome {
            replaced,
            length: ledger.len(),
            chain: ledger.chain().to_vec(),
        }
    }
}
