use std::time::Duration;

use actix_web::rt::time::timeout;
use futures::future::join_all;
use log::{debug, info, warn};

use super::ChainSource;
use crate::blockchain::{Block, ChainValidator};
use crate::error::LedgerError;

/// Longest-valid-chain fork choice over a set of peers.
pub struct Resolver {
    source: Box<dyn ChainSource + Send + Sync>,
    validator: ChainValidator,
    timeout: Duration,
}

impl Resolver {
    pub fn new(
        source: Box<dyn ChainSource + Send + Sync>,
        validator: ChainValidator,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            validator,
            timeout,
        }
    }

    pub fn validator(&self) -> &ChainValidator {
        &self.validator
    }

    /// Query every peer concurrently and return the longest valid chain
    /// strictly longer than `local_len`, if any.
    ///
    /// Among equally long winners the first peer in `peers` order is kept.
    /// Peers that fail or time out are skipped.
    pub async fn resolve(&self, peers: &[String], local_len: usize) -> Option<Vec<Block>> {
        let fetches = peers.iter().map(|peer| async move {
            let result = match timeout(self.timeout, self.source.fetch_chain(peer)).await {
                Ok(res) => res,
                Err(_) => Err(LedgerError::PeerUnreachable {
                    peer: peer.clone(),
                    reason: format!("timed out after {:?}", self.timeout),
                }),
            };
            (peer, result)
        });
        let responses = join_all(fetches).await;

        let mut best: Option<Vec<Block>> = None;
        let mut max_len = local_len;

        for (peer, result) in responses {
            let candidate = match result {
                Ok(chain) => chain,
                Err(e) => {
                    warn!("CONSENSUS - skipping peer: {e}");
                    continue;
                }
            };
            if candidate.len() <= max_len {
                debug!(
                    "CONSENSUS - peer {} chain length {} <= {}",
                    peer,
                    candidate.len(),
                    max_len
                );
                continue;
            }
            if let Err(e) = self.validator.check(&candidate) {
                warn!("CONSENSUS - rejecting chain from {peer}: {e}");
                continue;
            }
            info!(
                "CONSENSUS - peer {} offers valid chain of length {}",
                peer,
                candidate.len()
            );
            max_len = candidate.len();
            best = Some(candidate);
        }
        best
    }
}
