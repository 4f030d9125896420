use async_trait::async_trait;
use docsearch_common::Result;
use ndarray::Array1;

/// Common trait for query encoders
#[async_trait]
pub trait QueryEncoder: Send + Sync {
    /// Encode query text into a vector of length [`QueryEncoder::dimension`]
    async fn encode(&self, query: &str) -> Result<Array1<f32>>;

    /// Length of the vectors this encoder produces
    fn dimension(&self) -> usize;

    /// Short name shown in stats and logs
    fn name(&self) -> &str;
}
