use actix_web::{web, HttpResponse};
use docsearch_common::DocSearchError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

pub mod page;
pub mod search;
pub mod system;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(page::index)
        .service(search::search)
        .service(search::search_stats)
        .service(system::health);
}

/// JSON error body with the status the error maps to
pub(crate) fn error_response(err: &DocSearchError) -> HttpResponse {
    if err.is_client_error() {
        warn!("Rejected request: {}", err);
    } else {
        error!("Request failed: {}", err);
    }

    let status = actix_web::http::StatusCode::from_u16(err.status_code())
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}
