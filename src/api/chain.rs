use actix_web::{HttpResponse, get, post, web};

use super::models::{
    AppState, DifficultyResponse, MineResponse, SetDifficultyRequest, ValidateResponse,
};
use crate::error::LedgerError;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.node.chain())
}

/// Validate the local chain with the node's validator.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.node.validate(),
        length: state.node.len(),
    })
}

/// Solve the next proof, pay the miner and forge a block from the pool.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, LedgerError> {
    let block = state.node.mine().await?;
    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New block forged",
        block,
    }))
}

#[get("/difficulty/")]
pub async fn get_difficulty(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: state.node.difficulty(),
    })
}

/// Update PoW difficulty (affects future blocks only).
#[post("/difficulty/")]
pub async fn set_difficulty(
    state: web::Data<AppState>,
    body: web::Json<SetDifficultyRequest>,
) -> Result<HttpResponse, LedgerError> {
    let difficulty = state.node.set_difficulty(body.difficulty)?;
    Ok(HttpResponse::Ok().json(DifficultyResponse { difficulty }))
}
