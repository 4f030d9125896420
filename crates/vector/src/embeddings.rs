use docsearch_common::{DocSearchError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_npy::{read_npy, ReadNpyError};
use std::path::Path;
use tracing::{debug, info};

/// Precomputed embedding matrix, one row per document
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    matrix: Array2<f32>,
    row_norms: Array1<f32>,
}

impl EmbeddingStore {
    /// Load a 2-D `.npy` array of float32 or float64 values
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading embeddings from {}", path.display());

        let matrix: Array2<f32> = match read_npy::<_, Array2<f32>>(path) {
            Ok(matrix) => matrix,
            Err(ReadNpyError::WrongDescriptor(descr)) => {
                debug!("Embeddings are not float32 ({:?}), retrying as float64", descr);
                let wide: Array2<f64> = read_npy(path).map_err(|e| npy_error(path, e))?;
                wide.mapv(|x| x as f32)
            }
            Err(e) => return Err(npy_error(path, e)),
        };

        let store = Self::from_array(matrix)?;
        info!("Embeddings shape: {:?}", store.shape());
        Ok(store)
    }

    /// Wrap an in-memory matrix
    pub fn from_array(matrix: Array2<f32>) -> Result<Self> {
        if matrix.ncols() == 0 {
            return Err(DocSearchError::embedding_store(
                "Embedding dimension must be at least 1",
            ));
        }

        // float64 values beyond the f32 range arrive here as inf
        if let Some(((row, col), value)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(DocSearchError::embedding_store(format!(
                "Non-finite embedding value {} at row {}, column {}",
                value, row, col
            )));
        }

        let row_norms = matrix.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        if let Some(row) = row_norms.iter().position(|norm| !norm.is_finite()) {
            return Err(DocSearchError::embedding_store(format!(
                "Embedding row {} is too large to normalize in f32",
                row
            )));
        }

        Ok(Self { matrix, row_norms })
    }

    /// Number of embedding rows
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Embedding dimensionality
    pub fn dim(&self) -> usize {
        self.matrix.ncols()
    }

    /// (rows, dimension)
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.rows()).then(|| self.matrix.row(index))
    }

    pub fn matrix(&self) -> ArrayView2<'_, f32> {
        self.matrix.view()
    }

    /// L2 norm of every row
    pub fn row_norms(&self) -> ArrayView1<'_, f32> {
        self.row_norms.view()
    }
}

fn npy_error(path: &Path, e: ReadNpyError) -> DocSearchError {
    DocSearchError::embedding_store(format!(
        "Failed to read embeddings {}: {}",
        path.display(),
        e
    ))
}
