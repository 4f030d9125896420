use async_trait::async_trait;
use docsearch_common::{DocSearchError, Result};
use ndarray::Array1;
use rand::Rng;
use tracing::debug;

use crate::encoder_trait::QueryEncoder;

/// Placeholder encoder producing uniform random vectors in [0, 1)
///
/// The query text is ignored, so rankings carry no meaning. Replace with a
/// real sentence-embedding model before relying on the results.
#[derive(Debug, Clone)]
pub struct RandomBaselineEncoder {
    dimension: usize,
}

impl RandomBaselineEncoder {
    /// Create encoder for vectors of `dimension` components
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(DocSearchError::encoder(
                "Embedding dimension must be at least 1",
            ));
        }
        Ok(Self { dimension })
    }
}

#[async_trait]
impl QueryEncoder for RandomBaselineEncoder {
    async fn encode(&self, query: &str) -> Result<Array1<f32>> {
        debug!(
            "Random baseline encoding (query ignored, {} chars)",
            query.chars().count()
        );

        let mut rng = rand::thread_rng();
        let vector: Array1<f32> = (0..self.dimension).map(|_| rng.gen::<f32>()).collect();
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "random-baseline"
    }
}
