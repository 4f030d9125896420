//! DocSearch HTTP server
//!
//! Actix-web search page and JSON API over a corpus loaded once at startup

pub mod page;
pub mod routes;
pub mod state;
pub mod types;

use actix_web::{web, App, HttpServer};
use docsearch_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Load the corpus and serve until shutdown
///
/// Missing or misaligned input files abort before the socket is bound.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::load(config)?);

    info!("Server listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
