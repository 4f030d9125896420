use actix_web::{get, http::header::ContentType, http::StatusCode, web, HttpResponse};
use docsearch_common::DocSearchError;
use std::sync::Arc;
use tracing::error;

use crate::page::{render_page, PageView};
use crate::state::AppState;
use crate::types::PageQuery;

/// Search page; renders results when `q` is present
#[get("/")]
pub async fn index(
    query: web::Query<PageQuery>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let Some(q) = query.q.as_deref() else {
        return Ok(html(StatusCode::OK, render_page(&PageView::Empty)));
    };

    let top_k = state.top_k(query.top_k);
    match state.engine.search(q, top_k).await {
        Ok(results) => {
            let stats = state.engine.stats();
            let body = render_page(&PageView::Results {
                query: q,
                stats: &stats,
                results: &results,
                preview_chars: state.config.preview_chars,
            });
            Ok(html(StatusCode::OK, body))
        }
        Err(DocSearchError::InvalidInput(message)) => {
            let body = render_page(&PageView::Warning {
                query: q,
                message: &message,
            });
            Ok(html(StatusCode::OK, body))
        }
        Err(e) => {
            error!("Search failed: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = render_page(&PageView::Error {
                query: q,
                message: e.to_string(),
            });
            Ok(html(status, body))
        }
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}
