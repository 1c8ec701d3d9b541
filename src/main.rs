use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use pow_ledger::api::{self, AppState};
use pow_ledger::config::NodeConfig;
use pow_ledger::node::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let node = Node::from_config(&config);
    info!(
        "node {} (difficulty={}, reward={}, peers={}, strict_validation={})",
        node.miner_address(),
        config.difficulty,
        config.reward,
        node.peers().len(),
        config.strict_validation
    );

    println!(
        "⛓️ Starting ledger node at http://{}:{}",
        config.host, config.port
    );

    let state = web::Data::new(AppState::new(node));

    let stopper = state.clone();
    actix_web::rt::spawn(async move {
        match actix_web::rt::signal::ctrl_c().await {
            Ok(()) => stopper.node.stop_mining(),
            Err(e) => warn!("cannot listen for shutdown signal: {e}"),
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
