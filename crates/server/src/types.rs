use docsearch_vector::SearchResult;
use serde::{Deserialize, Serialize};

/// Search query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    #[serde(default)]
    pub q: String,

    /// Top K results
    pub top_k: Option<usize>,
}

/// Search page query; a missing `q` renders the empty form
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub q: Option<String>,

    pub top_k: Option<usize>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResultItem>,
}

/// One ranked document
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub doc_id: String,
    pub score: f32,
    pub preview: String,
}

impl SearchResultItem {
    pub fn from_result(result: &SearchResult, preview_chars: usize) -> Self {
        Self {
            doc_id: result.doc_id.clone(),
            score: result.score,
            preview: result.preview(preview_chars),
        }
    }
}

/// Returned instead of results for a blank query
#[derive(Debug, Serialize)]
pub struct WarningResponse {
    pub warning: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Corpus statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub embedding_rows: usize,
    pub embedding_dim: usize,
    pub skipped_lines: usize,
    pub duplicate_ids: usize,
    pub encoder: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
