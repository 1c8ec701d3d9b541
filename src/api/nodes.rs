use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::error::LedgerError;
use crate::network::peers::parse_peer_address;

/// Register one or more peers. Nothing is stored if any address is invalid.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, LedgerError> {
    let addresses = body.into_inner().into_addresses();
    if addresses.is_empty() {
        return Err(LedgerError::MissingAddress);
    }
    for address in &addresses {
        parse_peer_address(address)?;
    }

    let mut added = 0;
    for address in &addresses {
        if state.node.register_peer(address)? {
            added += 1;
        }
    }
    debug!("POST /nodes/register/ - {} of {} new", added, addresses.len());

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: format!("{added} new node(s) added"),
        peers: state.node.peers(),
    }))
}

#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(NodesResponse {
        peers: state.node.peers(),
    })
}

/// Run the longest-valid-chain rule against all registered peers.
#[get("/nodes/resolve/")]
pub async fn resolve_nodes(state: web::Data<AppState>) -> HttpResponse {
    let outcome = state.node.resolve().await;
    HttpResponse::Ok().json(ResolveResponse {
        message: if outcome.replaced {
            "Chain was replaced"
        } else {
            "Chain is authoritative"
        },
        replaced: outcome.replaced,
        length: outcome.length,
        chain: outcome.chain,
    })
}
