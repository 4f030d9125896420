use actix_web::{get, web, HttpResponse};
use docsearch_vector::EMPTY_QUERY_WARNING;
use std::sync::Arc;
use tracing::warn;

use crate::routes::error_response;
use crate::state::AppState;
use crate::types::{
    SearchQuery, SearchResponse, SearchResultItem, StatsResponse, WarningResponse,
};

#[get("/api/search")]
pub async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    if query.q.trim().is_empty() {
        warn!("Rejected blank search query");
        return Ok(HttpResponse::BadRequest().json(WarningResponse {
            warning: EMPTY_QUERY_WARNING.to_string(),
        }));
    }

    let top_k = state.top_k(query.top_k);
    let search_results = match state.engine.search(&query.q, top_k).await {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e)),
    };

    let preview_chars = state.config.preview_chars;
    let results: Vec<SearchResultItem> = search_results
        .iter()
        .map(|r| SearchResultItem::from_result(r, preview_chars))
        .collect();

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: query.q.clone(),
        count: results.len(),
        results,
    }))
}

#[get("/api/stats")]
pub async fn search_stats(state: web::Data<Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    let stats = state.engine.stats();
    let report = state.engine.context().load_report();
    let (embedding_rows, embedding_dim) = stats.embedding_shape;

    Ok(HttpResponse::Ok().json(StatsResponse {
        documents: stats.documents,
        embedding_rows,
        embedding_dim,
        skipped_lines: report.skipped,
        duplicate_ids: report.duplicates,
        encoder: stats.encoder,
        loaded_at: stats.loaded_at,
    }))
}
