//! DocSearch vector search
//!
//! Document and embedding loading, cosine similarity and top-k ranking

mod documents;
mod embeddings;
mod engine;
mod similarity;
mod types;

pub use documents::{DocumentStore, LoadReport, DOCUMENT_DELIMITER};
pub use embeddings::EmbeddingStore;
pub use engine::{
    retrieve_top_k, SearchContext, SearchEngine, EMPTY_QUERY_WARNING, ZERO_TOP_K_WARNING,
};
pub use similarity::{cosine_similarities, cosine_similarity};
pub use types::{Document, SearchResult, SearchStats};
