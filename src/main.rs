use dotenvy::dotenv;
use tracing::info;

use registrar::logging::init_tracing;
use registrar::router::init_router;
use registrar::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    let addr = state.server_config.bind_addr();
    let db = state.db.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    db.close().await;
    info!("Database pool closed, bye");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    info!("Shutdown signal received");
}
