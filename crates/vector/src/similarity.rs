use docsearch_common::{DocSearchError, Result};
use ndarray::{Array1, ArrayView1, Zip};

use crate::embeddings::EmbeddingStore;

/// Cosine similarity between two vectors
///
/// Returns 0.0 when the lengths differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Cosine similarity of `query` against every embedding row
pub fn cosine_similarities(query: ArrayView1<'_, f32>, store: &EmbeddingStore) -> Result<Array1<f32>> {
    if query.len() != store.dim() {
        return Err(DocSearchError::ranking(format!(
            "Query vector has {} dimensions, embeddings have {}",
            query.len(),
            store.dim()
        )));
    }

    let query_norm = query.dot(&query).sqrt();
    let dots = store.matrix().dot(&query);

    let mut scores = Array1::<f32>::zeros(store.rows());
    Zip::from(&mut scores)
        .and(&dots)
        .and(store.row_norms())
        .for_each(|score, &dot, &row_norm| {
            let denom = row_norm * query_norm;
            *score = if denom == 0.0 { 0.0 } else { dot / denom };
        });

    Ok(scores)
}
