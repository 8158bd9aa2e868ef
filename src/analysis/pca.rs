// Principal component analysis over a frequency matrix.
//
// The frequency matrix is viewed as features (words) × samples (documents):
//   1. centre every word by subtracting its mean across documents
//   2. scatter = C · Cᵀ, a V × V matrix, deliberately not divided by N or N-1
//   3. eigendecompose the scatter matrix
//   4. sort eigenpairs by descending eigenvalue
//   5. project each document (a column of C) onto the top D eigenvectors
//
// Scaling the scatter matrix would only rescale eigenvalues; the projection
// depends on eigenvector directions alone.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::{info, warn};

use super::eigen::NalgebraEigensolver;
use super::matrix::FrequencyMatrix;
use super::traits::{EigenPair, SymmetricEigensolver};
use crate::error::{Result, StyleError};
use crate::text::sample::DocumentRecord;

/// Vocabulary size above which a slow-analysis warning is logged.
pub const DEFAULT_LARGE_VOCABULARY: usize = 2000;

/// Eigenvalues below this share of the largest one are treated as zero.
const RELATIVE_EIGENVALUE_TOLERANCE: f64 = 1e-9;

/// A largest eigenvalue at or below this means there is no variation at all.
const ABSOLUTE_EIGENVALUE_FLOOR: f64 = 1e-24;

pub struct PcaEngine {
    solver: Box<dyn SymmetricEigensolver>,
    large_vocabulary: usize,
}

impl Default for PcaEngine {
    fn default() -> Self {
        Self::new(Box::new(NalgebraEigensolver::default()))
    }
}

impl std::fmt::Debug for PcaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PcaEngine")
            .field("large_vocabulary", &self.large_vocabulary)
            .finish_non_exhaustive()
    }
}

impl PcaEngine {
    pub fn new(solver: Box<dyn SymmetricEigensolver>) -> Self {
        Self {
            solver,
            large_vocabulary: DEFAULT_LARGE_VOCABULARY,
        }
    }

    /// Log a warning when the vocabulary has more than `words` entries.
    pub fn with_large_vocabulary_warning(mut self, words: usize) -> Self {
        self.large_vocabulary = words;
        self
    }

    /// Centre, build the scatter matrix and decompose it.
    #[tracing::instrument(name = "pca_fit", level = "debug", skip_all, fields(documents = matrix.rows(), words = matrix.cols()))]
    pub fn fit(&self, matrix: &FrequencyMatrix) -> Result<PcaModel> {
        let vocabulary_size = matrix.cols();
        if vocabulary_size > self.large_vocabulary {
            warn!(
                words = vocabulary_size,
                documents = matrix.rows(),
                threshold = self.large_vocabulary,
                "Large vocabulary; scatter matrix and eigendecomposition may be slow"
            );
        }

        // Features × samples
        let features = matrix.as_matrix().transpose();
        let (centered, means) = center(&features);
        let scatter = scatter_matrix(&centered);

        let pairs = self.solver.decompose(&scatter)?;
        if pairs.len() != vocabulary_size {
            return Err(StyleError::EigenSolverFailed(format!(
                "expected {} eigenpairs, got {}",
                vocabulary_size,
                pairs.len()
            )));
        }
        if pairs.iter().any(|p| !p.value.is_finite()) {
            return Err(StyleError::EigenSolverFailed(
                "non-finite eigenvalue".to_string(),
            ));
        }
        let eigenpairs = sort_eigenpairs(pairs);

        Ok(PcaModel {
            records: matrix.records().to_vec(),
            centered,
            means,
            eigenpairs,
        })
    }

    /// `fit` followed by `reduce_dimensions`.
    pub fn analyze(&self, matrix: &FrequencyMatrix, dimensions: usize) -> Result<PcaResult> {
        self.fit(matrix)?.reduce_dimensions(dimensions)
    }
}

/// Subtract each row's mean from that row. Returns the centred matrix and
/// the per-row means.
pub fn center(features: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let means = features.column_mean();
    let mut centered = features.clone();
    for mut column in centered.column_iter_mut() {
        column -= &means;
    }
    (centered, means)
}

/// `centered · centeredᵀ`, unnormalized.
pub fn scatter_matrix(centered: &DMatrix<f64>) -> DMatrix<f64> {
    centered * centered.transpose()
}

/// Sort by descending eigenvalue and fix each eigenvector's sign so its
/// largest-magnitude component is positive.
///
/// The sort is stable, so equal eigenvalues keep solver order.
pub fn sort_eigenpairs(mut pairs: Vec<EigenPair>) -> Vec<EigenPair> {
    pairs.sort_by(|a, b| b.value.total_cmp(&a.value));
    for pair in pairs.iter_mut().filter(|p| !p.vector.is_empty()) {
        if pair.vector[pair.vector.iamax()] < 0.0 {
            pair.vector.neg_mut();
        }
    }
    pairs
}

/// A fitted decomposition, ready to project documents.
#[derive(Debug, Clone)]
pub struct PcaModel {
    records: Vec<DocumentRecord>,
    centered: DMatrix<f64>,
    means: DVector<f64>,
    eigenpairs: Vec<EigenPair>,
}

impl PcaModel {
    /// All eigenpairs, largest eigenvalue first.
    pub fn eigenpairs(&self) -> &[EigenPair] {
        &self.eigenpairs
    }

    /// Per-word means removed during centring.
    pub fn means(&self) -> &DVector<f64> {
        &self.means
    }

    /// Number of eigenvalues distinguishable from zero.
    ///
    /// Centring N documents leaves at most N - 1 independent directions, so
    /// the count never exceeds that even when rounding noise survives the
    /// relative tolerance.
    pub fn nontrivial_axes(&self) -> usize {
        let largest = match self.eigenpairs.first() {
            Some(pair) if pair.value > ABSOLUTE_EIGENVALUE_FLOOR => pair.value,
            _ => return 0,
        };
        let tolerance = largest * RELATIVE_EIGENVALUE_TOLERANCE;
        let rank_bound = self.records.len().saturating_sub(1);
        self.eigenpairs
            .iter()
            .take_while(|p| p.value > tolerance)
            .count()
            .min(rank_bound)
    }

    /// Project every document onto the top `dimensions` axes.
    pub fn reduce_dimensions(&self, dimensions: usize) -> Result<PcaResult> {
        let documents = self.records.len();
        if dimensions == 0 {
            return Err(StyleError::InvalidDimensions {
                requested: 0,
                reason: "at least one dimension is required".to_string(),
            });
        }
        if dimensions > documents {
            return Err(StyleError::InvalidDimensions {
                requested: dimensions,
                reason: format!("only {documents} documents are in the corpus"),
            });
        }
        let available = self.nontrivial_axes();
        if available == 0 {
            return Err(StyleError::DegenerateScatter);
        }
        if dimensions > available {
            return Err(StyleError::InvalidDimensions {
                requested: dimensions,
                reason: format!("only {available} non-trivial principal axes exist"),
            });
        }

        let axes = &self.eigenpairs[..dimensions];
        let projections = self
            .records
            .iter()
            .zip(self.centered.column_iter())
            .map(|(record, column)| Projection {
                record: record.clone(),
                coordinates: axes.iter().map(|axis| column.dot(&axis.vector)).collect(),
            })
            .collect();

        let total: f64 = self
            .eigenpairs
            .iter()
            .map(|p| p.value.max(0.0))
            .sum();
        let explained_variance = axes.iter().map(|axis| axis.value / total).collect();

        info!(
            documents,
            words = self.means.len(),
            dimensions,
            "PCA projection complete"
        );

        Ok(PcaResult {
            dimensions,
            eigenpairs: self.eigenpairs.clone(),
            explained_variance,
            projections,
        })
    }
}

/// One document's coordinates on the principal axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PcaResult {
    pub dimensions: usize,
    /// Every eigenpair of the scatter matrix, largest eigenvalue first
    #[serde(skip)]
    pub eigenpairs: Vec<EigenPair>,
    /// Share of total scatter captured by each selected axis
    pub explained_variance: Vec<f64>,
    /// Per-document coordinates, in corpus order
    pub projections: Vec<Projection>,
}

impl PcaResult {
    /// Eigenvalues of the selected axes.
    pub fn axis_eigenvalues(&self) -> Vec<f64> {
        self.eigenpairs[..self.dimensions]
            .iter()
            .map(|p| p.value)
            .collect()
    }

    pub fn projection(&self, name: &str) -> Option<&Projection> {
        self.projections.iter().find(|p| p.record.name == name)
    }
}
