// nalgebra-backed symmetric eigensolver.

use nalgebra::linalg::SymmetricEigen;
use nalgebra::DMatrix;

use super::traits::{EigenPair, SymmetricEigensolver};
use crate::error::{Result, StyleError};

/// Default solver: nalgebra's symmetric QR algorithm.
#[derive(Debug, Clone, Copy)]
pub struct NalgebraEigensolver {
    /// Convergence threshold for off-diagonal elements
    pub epsilon: f64,
    /// Iteration cap; 0 means iterate until convergence
    pub max_iterations: usize,
}

impl Default for NalgebraEigensolver {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 0,
        }
    }
}

impl SymmetricEigensolver for NalgebraEigensolver {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Vec<EigenPair>> {
        if !matrix.is_square() {
            return Err(StyleError::EigenSolverFailed(format!(
                "matrix is {}x{}, expected square",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let eigen = SymmetricEigen::try_new(matrix.clone(), self.epsilon, self.max_iterations)
            .ok_or_else(|| {
                StyleError::EigenSolverFailed(format!(
                    "no convergence within {} iterations",
                    self.max_iterations
                ))
            })?;

        Ok(eigen
            .eigenvalues
            .iter()
            .zip(eigen.eigenvectors.column_iter())
            .map(|(&value, vector)| EigenPair {
                value,
                vector: vector.into_owned(),
            })
            .collect())
    }
}
