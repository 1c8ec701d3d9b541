use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::CHAIN_PATH;
use crate::blockchain::Block;
use crate::error::{LedgerError, Result};

/// Largest chain body accepted from a peer.
const MAX_CHAIN_BYTES: usize = 32 * 1024 * 1024;

/// Where candidate chains come from during conflict resolution.
#[async_trait(?Send)]
pub trait ChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>>;
}

/// Body of a peer's chain endpoint. `length` is informational only.
#[derive(Deserialize)]
struct RemoteChain {
    chain: Vec<Block>,
}

/// Fetches chains over HTTP with actix-web's client.
#[derive(Debug, Clone)]
pub struct HttpChainSource {
    timeout: Duration,
}

impl HttpChainSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn unreachable(peer: &str, reason: impl ToString) -> LedgerError {
    LedgerError::PeerUnreachable {
        peer: peer.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait(?Send)]
impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<Vec<Block>> {
        let url = format!("{peer}{CHAIN_PATH}");
        let client = awc::Client::builder().timeout(self.timeout).finish();

        let mut resp = client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(peer, e))?;
        if !resp.status().is_success() {
            return Err(unreachable(peer, format!("status {}", resp.status())));
        }

        let body: RemoteChain = resp
            .json()
            .limit(MAX_CHAIN_BYTES)
            .await
            .map_err(|e| unreachable(peer, format!("bad chain payload: {e}")))?;
        Ok(body.chain)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, HttpResponse, HttpServer, web};
    use serde_json::json;

    use super::{ChainSource, HttpChainSource};
    use crate::error::LedgerError;
    use crate::network::consensus::tests::linked_chain;

    /// Serve three fake peers under path prefixes of one local server.
    fn fake_peers() -> (actix_web::dev::Server, String) {
        let server = HttpServer::new(|| {
            App::new()
                .route(
                    "/good/api/v1/chain/",
                    web::get().to(|| async {
                        let chain = linked_chain(3, "good");
                        HttpResponse::Ok().json(json!({
                            "length": chain.len(),
                            "chain": chain,
                        }))
                    }),
                )
                .route(
                    "/broken/api/v1/chain/",
                    web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
                )
                .route(
                    "/garbled/api/v1/chain/",
                    web::get().to(|| async { HttpResponse::Ok().body("not a chain") }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let base = format!("http://{}", server.addrs()[0]);
        (server.run(), base)
    }

    #[actix_web::test]
    async fn fetches_chains_over_http() {
        let (server, base) = fake_peers();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let source = HttpChainSource::new(Duration::from_secs(5));

        let chain = source.fetch_chain(&format!("{base}/good")).await.unwrap();
        assert_eq!(chain, linked_chain(3, "good"));

        let err = source
            .fetch_chain(&format!("{base}/broken"))
            .await
            .unwrap_err();
        match err {
            LedgerError::PeerUnreachable { peer, reason } => {
                assert_eq!(peer, format!("{base}/broken"));
                assert!(reason.contains("500"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = source
            .fetch_chain(&format!("{base}/garbled"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::PeerUnreachable { .. }));

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn refused_connection_is_unreachable() {
        // Bind then drop a listener so the port is very likely closed.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let source = HttpChainSource::new(Duration::from_secs(2));
        let err = source
            .fetch_chain(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::PeerUnreachable { .. }));
    }
}
