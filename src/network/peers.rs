use actix_web::http::Uri;
use log::debug;

use crate::error::{LedgerError, Result};

/// Parse and normalise a peer address such as `http://127.0.0.1:8080`.
/// Only plain `http` is accepted; the peer client has no TLS.
pub fn parse_peer_address(address: &str) -> Result<String> {
    let trimmed = address.trim().trim_end_matches('/');
    let invalid = || LedgerError::InvalidAddress(address.to_string());

    let uri: Uri = trimmed.parse().map_err(|_| invalid())?;
    if uri.scheme_str() != Some("http") || uri.authority().is_none() || uri.query().is_some() {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Known peers, in registration order. Peers are never removed.
#[derive(Debug, Default)]
pub struct PeerSet {
    peers: Vec<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer. Returns `false` if it was already known.
    pub fn add(&mut self, address: &str) -> Result<bool> {
        let peer = parse_peer_address(address)?;
        if self.peers.contains(&peer) {
            debug!("peer {peer} already registered");
            return Ok(false);
        }
        self.peers.push(peer);
        Ok(true)
    }

    /// Copy of the current peers, taken before a resolution pass.
    pub fn snapshot(&self) -> Vec<String> {
        self.peers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{PeerSet, parse_peer_address};
    use crate::error::LedgerError;

    #[test]
    fn accepts_http_endpoints() {
        assert_eq!(
            parse_peer_address("http://127.0.0.1:8080/").unwrap(),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            parse_peer_address(" http://node.example.org ").unwrap(),
            "http://node.example.org"
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "127.0.0.1:8080",
            "ftp://host",
            "https://node.example.org",
            "http://",
            "not a url",
            "http://h/?q=1",
        ] {
            assert!(
                matches!(parse_peer_address(bad), Err(LedgerError::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut peers = PeerSet::new();
        assert!(peers.add("http://10.0.0.1:5000").unwrap());
        assert!(!peers.add("http://10.0.0.1:5000/").unwrap());
        assert!(peers.add("http://10.0.0.2:5000").unwrap());
        assert_eq!(
            peers.snapshot(),
            vec!["http://10.0.0.1:5000", "http://10.0.0.2:5000"]
        );
    }

    #[test]
    fn invalid_address_is_not_stored() {
        let mut peers = PeerSet::new();
        assert!(peers.add("garbage").is_err());
        assert!(peers.snapshot().is_empty());
    }
}
