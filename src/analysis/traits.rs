// Symmetric eigensolver trait — swap-ready abstraction.
//
// The PCA engine only needs eigenvalue/eigenvector pairs of a real symmetric
// matrix. The default implementation uses nalgebra; any other linear-algebra
// backend can be plugged in without touching the engine.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One eigenvalue and its unit eigenvector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenPair {
    pub value: f64,
    pub vector: DVector<f64>,
}

/// Decomposes a real symmetric matrix.
///
/// Implementations may return pairs in any order; callers sort them.
pub trait SymmetricEigensolver {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Vec<EigenPair>>;
}
