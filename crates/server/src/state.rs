use docsearch_common::{AppConfig, Result};
use docsearch_vector::{SearchContext, SearchEngine};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Loaded corpus and query encoder
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, engine: SearchEngine) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
        }
    }

    /// Load both input files and wire up the random baseline encoder
    pub fn load(config: AppConfig) -> Result<Self> {
        let context = Arc::new(SearchContext::load(&config)?);
        let engine = SearchEngine::with_random_baseline(context)?;
        Ok(Self::new(config, engine))
    }

    /// Requested result count, falling back to the configured default
    pub fn top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.default_top_k)
    }
}
