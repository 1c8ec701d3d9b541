use actix_web::{HttpResponse, get, post, web};

use super::models::{AppState, NewTxResponse, PendingResponse};
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// Pool a transaction for the next mined block.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> Result<HttpResponse, LedgerError> {
    let index = state.node.submit_transaction(body.into_inner())?;
    Ok(HttpResponse::Ok().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> HttpResponse {
    let transactions = state.node.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
