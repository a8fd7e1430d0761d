use tracing::info;

use mercato_auth::JwtVerifier;
use mercato_market::config::MarketConfig;
use mercato_market::router::build_router;
use mercato_market::state::AppState;
use mercato_store::MemoryStore;

#[tokio::main]
async fn main() {
    mercato_core::tracing::init_tracing();

    let config = MarketConfig::from_env();

    let state = AppState {
        store: MemoryStore::new(),
        verifier: JwtVerifier::new(config.jwt_secret),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.market_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("market service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
