/// DocSearch error types
#[derive(Debug, thiserror::Error)]
pub enum DocSearchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document file could not be read
    #[error("Document store error: {0}")]
    DocumentStore(String),

    /// Embedding file could not be read or has the wrong shape
    #[error("Embedding store error: {0}")]
    EmbeddingStore(String),

    /// Embedding rows and documents do not line up
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// Query encoder error
    #[error("Encoder error: {0}")]
    Encoder(String),

    /// Similarity ranking error
    #[error("Ranking error: {0}")]
    Ranking(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocSearchError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create document store error
    pub fn document_store<S: Into<String>>(msg: S) -> Self {
        Self::DocumentStore(msg.into())
    }

    /// Create embedding store error
    pub fn embedding_store<S: Into<String>>(msg: S) -> Self {
        Self::EmbeddingStore(msg.into())
    }

    /// Create alignment error
    pub fn alignment<S: Into<String>>(msg: S) -> Self {
        Self::Alignment(msg.into())
    }

    /// Create encoder error
    pub fn encoder<S: Into<String>>(msg: S) -> Self {
        Self::Encoder(msg.into())
    }

    /// Create ranking error
    pub fn ranking<S: Into<String>>(msg: S) -> Self {
        Self::Ranking(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl DocSearchError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Json(_) => 400,
            Self::Config(_)
            | Self::DocumentStore(_)
            | Self::EmbeddingStore(_)
            | Self::Alignment(_)
            | Self::Encoder(_)
            | Self::Ranking(_)
            | Self::Internal(_)
            | Self::Io(_)
            | Self::Other(_) => 500,
        }
    }

    /// Whether the error is the caller's fault rather than the server's
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
