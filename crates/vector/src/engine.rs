use chrono::{DateTime, Utc};
use docsearch_common::{AppConfig, DocSearchError, Result};
use docsearch_encoder::{QueryEncoder, RandomBaselineEncoder};
use ndarray::ArrayView1;
use std::sync::Arc;
use tracing::{debug, info};

use crate::documents::{DocumentStore, LoadReport};
use crate::embeddings::EmbeddingStore;
use crate::similarity::cosine_similarities;
use crate::types::{SearchResult, SearchStats};

/// Message shown when a search is submitted without query text
pub const EMPTY_QUERY_WARNING: &str = "Please enter a valid query!";

/// Message returned when fewer than one result is requested
pub const ZERO_TOP_K_WARNING: &str = "top_k must be at least 1";

/// Immutable corpus: documents plus their embedding rows
///
/// Row `i` of the embedding matrix belongs to the `i`-th document in
/// insertion order. Construction fails unless both sides have the same count.
#[derive(Debug)]
pub struct SearchContext {
    documents: DocumentStore,
    embeddings: EmbeddingStore,
    report: LoadReport,
    loaded_at: DateTime<Utc>,
}

impl SearchContext {
    /// Pair a document store with its embeddings
    pub fn new(documents: DocumentStore, embeddings: EmbeddingStore) -> Result<Self> {
        Self::with_report(documents, embeddings, LoadReport::default())
    }

    fn with_report(
        documents: DocumentStore,
        embeddings: EmbeddingStore,
        report: LoadReport,
    ) -> Result<Self> {
        if embeddings.rows() != documents.len() {
            return Err(DocSearchError::alignment(format!(
                "{} embedding rows for {} documents; every document needs exactly one row, in file order",
                embeddings.rows(),
                documents.len()
            )));
        }

        Ok(Self {
            documents,
            embeddings,
            report,
            loaded_at: Utc::now(),
        })
    }

    /// Load both files named in the configuration
    pub fn load(config: &AppConfig) -> Result<Self> {
        let embeddings = EmbeddingStore::load(&config.embeddings_path)?;
        let (documents, report) = DocumentStore::load(&config.documents_path)?;

        let context = Self::with_report(documents, embeddings, report)?;
        info!(
            "Search context ready - {} documents, embeddings shape {:?}",
            context.documents.len(),
            context.embeddings.shape()
        );
        Ok(context)
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn embeddings(&self) -> &EmbeddingStore {
        &self.embeddings
    }

    /// Line counts from loading the document file
    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Rank every document against `query` and keep the `k` best
///
/// Results are ordered by descending cosine similarity; equal scores keep
/// file order. Asking for more than the corpus holds returns everything.
pub fn retrieve_top_k(
    context: &SearchContext,
    query: ArrayView1<'_, f32>,
    k: usize,
) -> Result<Vec<SearchResult>> {
    let scores = cosine_similarities(query, context.embeddings())?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(k);

    order
        .into_iter()
        .map(|index| -> Result<SearchResult> {
            let (doc_id, content) = context.documents().get_index(index).ok_or_else(|| {
                DocSearchError::internal(format!("No document for embedding row {}", index))
            })?;
            Ok(SearchResult::new(
                doc_id.to_string(),
                scores[index],
                content.to_string(),
            ))
        })
        .collect()
}

/// Vector search engine
pub struct SearchEngine {
    context: Arc<SearchContext>,
    encoder: Arc<dyn QueryEncoder>,
}

impl SearchEngine {
    /// Create new search engine
    pub fn new(context: Arc<SearchContext>, encoder: Arc<dyn QueryEncoder>) -> Result<Self> {
        if encoder.dimension() != context.embeddings().dim() {
            return Err(DocSearchError::encoder(format!(
                "Encoder '{}' produces {} dimensions, embeddings have {}",
                encoder.name(),
                encoder.dimension(),
                context.embeddings().dim()
            )));
        }

        info!("Vector search engine initialized - encoder={}", encoder.name());

        Ok(Self { context, encoder })
    }

    /// Search engine using the random placeholder encoder
    pub fn with_random_baseline(context: Arc<SearchContext>) -> Result<Self> {
        let encoder = RandomBaselineEncoder::new(context.embeddings().dim())?;
        Self::new(context, Arc::new(encoder))
    }

    /// Search for similar documents
    ///
    /// Blank queries and `top_k == 0` are rejected before the encoder runs.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(DocSearchError::invalid_input(EMPTY_QUERY_WARNING));
        }
        if top_k == 0 {
            return Err(DocSearchError::invalid_input(ZERO_TOP_K_WARNING));
        }

        debug!(
            "Searching (query_chars={}, top_k={})",
            query.chars().count(),
            top_k
        );

        let query_embedding = self.encoder.encode(query).await?;
        let results = retrieve_top_k(&self.context, query_embedding.view(), top_k)?;

        info!(
            "Search completed - {} results from {} documents",
            results.len(),
            self.context.documents().len()
        );
        Ok(results)
    }

    /// Get corpus statistics
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            documents: self.context.documents().len(),
            embedding_shape: self.context.embeddings().shape(),
            encoder: self.encoder.name().to_string(),
            loaded_at: self.context.loaded_at(),
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ndarray::{array, Array1, Array2};
    use ndarray_npy::write_npy;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Encoder returning a fixed vector and counting calls
    struct FixedEncoder {
        vector: Array1<f32>,
        calls: AtomicUsize,
    }

    impl FixedEncoder {
        fn new(vector: Array1<f32>) -> Self {
            Self {
                vector,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QueryEncoder for FixedEncoder {
        async fn encode(&self, _query: &str) -> Result<Array1<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.vector.clone())
        }

        fn dimension(&self) -> usize {
            self.vector.len()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn cat_dog_context() -> SearchContext {
        let (documents, _) = DocumentStore::parse("doc1: The cat sat.\ndoc2: A dog ran.").unwrap();
        let embeddings =
            EmbeddingStore::from_array(array![[1.0f32, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0]])
                .unwrap();
        SearchContext::new(documents, embeddings).unwrap()
    }

    fn five_doc_context() -> SearchContext {
        let (documents, _) =
            DocumentStore::parse("a: alpha\nb: bravo\nc: charlie\nd: delta\ne: echo").unwrap();
        let embeddings = EmbeddingStore::from_array(array![
            [1.0f32, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.7, 0.7, 0.0],
            [0.0, 0.0, 1.0],
            [0.9, 0.1, 0.2],
        ])
        .unwrap();
        SearchContext::new(documents, embeddings).unwrap()
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let context = cat_dog_context();
        let query = array![1.0f32, 0.0, 0.0, 0.0];

        let results = retrieve_top_k(&context, query.view(), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "doc1");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[0].content, "The cat sat.");
    }

    #[test]
    fn test_top_k_sorted_descending() {
        let context = five_doc_context();
        let query = array![1.0f32, 0.2, 0.1];

        let results = retrieve_top_k(&context, query.view(), 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(results[0].doc_id, "e");
    }

    #[test]
    fn test_k_larger_than_corpus_returns_all() {
        let context = five_doc_context();
        let query = array![0.2f32, 0.3, 0.9];

        let results = retrieve_top_k(&context, query.view(), 50).unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(results[0].doc_id, "d");
    }

    #[test]
    fn test_k_zero_returns_nothing() {
        let context = five_doc_context();
        let query = array![1.0f32, 0.0, 0.0];
        assert!(retrieve_top_k(&context, query.view(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_file_order() {
        let (documents, _) = DocumentStore::parse("x: one\ny: two\nz: three").unwrap();
        let embeddings = EmbeddingStore::from_array(Array2::from_elem((3, 2), 1.0f32)).unwrap();
        let context = SearchContext::new(documents, embeddings).unwrap();
        let query = array![1.0f32, 1.0];

        let ids: Vec<String> = retrieve_top_k(&context, query.view(), 3)
            .unwrap()
            .into_iter()
            .map(|r| r.doc_id)
            .collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_query_dimension_mismatch_is_error() {
        let context = cat_dog_context();
        let query = array![1.0f32, 0.0];
        assert!(matches!(
            retrieve_top_k(&context, query.view(), 1),
            Err(DocSearchError::Ranking(_))
        ));
    }

    #[test]
    fn test_misaligned_counts_fail_fast() {
        let (documents, _) = DocumentStore::parse("doc1: only one").unwrap();
        let embeddings = EmbeddingStore::from_array(Array2::zeros((2, 4))).unwrap();

        let err = SearchContext::new(documents, embeddings).unwrap_err();
        assert!(matches!(err, DocSearchError::Alignment(_)));
        assert!(err.to_string().contains("2 embedding rows for 1 documents"));
    }

    #[test]
    fn test_encoder_dimension_must_match() {
        let context = Arc::new(cat_dog_context());
        let encoder = Arc::new(FixedEncoder::new(array![1.0f32, 0.0]));
        assert!(matches!(
            SearchEngine::new(context, encoder),
            Err(DocSearchError::Encoder(_))
        ));
    }

    #[tokio::test]
    async fn test_search_uses_encoder_output() {
        let encoder = Arc::new(FixedEncoder::new(array![0.0f32, 1.0, 0.0, 0.0]));
        let engine = SearchEngine::new(Arc::new(cat_dog_context()), encoder.clone()).unwrap();

        let results = engine.search("dogs", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, "doc2");
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_query_skips_encoder_and_ranker() {
        let encoder = Arc::new(FixedEncoder::new(array![1.0f32, 0.0, 0.0, 0.0]));
        let engine = SearchEngine::new(Arc::new(cat_dog_context()), encoder.clone()).unwrap();

        for query in ["", "   ", "\t\n"] {
            let err = engine.search(query, 10).await.unwrap_err();
            assert!(matches!(err, DocSearchError::InvalidInput(ref msg) if msg == EMPTY_QUERY_WARNING));
        }
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_top_k_rejected() {
        let encoder = Arc::new(FixedEncoder::new(array![1.0f32, 0.0, 0.0, 0.0]));
        let engine = SearchEngine::new(Arc::new(cat_dog_context()), encoder.clone()).unwrap();

        let err = engine.search("cats", 0).await.unwrap_err();
        assert!(matches!(err, DocSearchError::InvalidInput(ref msg) if msg == ZERO_TOP_K_WARNING));
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    }

    fn write_corpus(dir: &Path, doc_lines: &[&str], embeddings: &Array2<f32>) -> AppConfig {
        let documents_path = dir.join("documents.txt");
        let embeddings_path = dir.join("embeddings.npy");

        let mut file = File::create(&documents_path).unwrap();
        for line in doc_lines {
            writeln!(file, "{}", line).unwrap();
        }
        write_npy(&embeddings_path, embeddings).unwrap();

        AppConfig {
            documents_path,
            embeddings_path,
            ..Default::default()
        }
    }

    #[test]
    fn test_load_context_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_corpus(
            dir.path(),
            &["doc1: The cat sat.", "not a document", "doc2: A dog ran."],
            &array![[1.0f32, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );

        let context = SearchContext::load(&config).unwrap();
        assert_eq!(context.documents().len(), 2);
        assert_eq!(context.embeddings().shape(), (2, 3));
        assert_eq!(context.load_report().skipped, 1);

        let query = array![0.0f32, 1.0, 0.0];
        let results = retrieve_top_k(&context, query.view(), 1).unwrap();
        assert_eq!(results[0].doc_id, "doc2");
        assert_eq!(results[0].content, "A dog ran.");
    }

    #[test]
    fn test_load_context_missing_document_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_corpus(dir.path(), &["doc1: x"], &array![[1.0f32, 0.0]]);
        config.documents_path = dir.path().join("missing.txt");

        let err = SearchContext::load(&config).unwrap_err();
        assert!(matches!(err, DocSearchError::DocumentStore(_)));
    }

    #[test]
    fn test_load_context_misaligned_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_corpus(
            dir.path(),
            &["doc1: one", "doc2: two", "doc1: one again"],
            &array![[1.0f32, 0.0], [0.0, 1.0], [1.0, 1.0]],
        );

        // three rows, but the repeated ID leaves two documents
        let err = SearchContext::load(&config).unwrap_err();
        assert!(matches!(err, DocSearchError::Alignment(_)));
        assert!(err.to_string().contains("3 embedding rows for 2 documents"));
    }

    #[tokio::test]
    async fn test_random_baseline_scores_in_range() {
        let engine = SearchEngine::with_random_baseline(Arc::new(five_doc_context())).unwrap();

        let results = engine.search("anything", 10).await.unwrap();
        assert_eq!(results.len(), 5);
        // non-negative query and rows keep cosine within [0, 1]
        assert!(results.iter().all(|r| (-1e-6..=1.0 + 1e-6).contains(&r.score)));

        let stats = engine.stats();
        assert_eq!(stats.documents, 5);
        assert_eq!(stats.embedding_shape, (5, 3));
        assert_eq!(stats.encoder, "random-baseline");
    }
}
