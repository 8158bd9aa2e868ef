// Unit tests for the analysis layer.
//
// Tests frequency matrix construction, the PCA engine's dimension and
// degeneracy checks, projection geometry on small hand-checkable corpora,
// and that any SymmetricEigensolver can be plugged in regardless of the
// order it returns eigenpairs in.

use nalgebra::DMatrix;

use stylometer::analysis::eigen::NalgebraEigensolver;
use stylometer::analysis::matrix::FrequencyMatrix;
use stylometer::analysis::pca::PcaEngine;
use stylometer::analysis::traits::{EigenPair, SymmetricEigensolver};
use stylometer::corpus::collection::Corpus;
use stylometer::corpus::vocabulary::{select, VocabularyMode};
use stylometer::text::sample::TextSample;
use stylometer::{ErrorKind, Result, StyleError};

fn corpus(docs: &[(&str, &str, &str)]) -> Corpus {
    let mut corpus = Corpus::new();
    for (name, author, text) in docs {
        corpus
            .add(TextSample::new(*name, *author, *name, text, None).unwrap())
            .unwrap();
    }
    corpus
}

fn union_matrix(docs: &[(&str, &str, &str)]) -> FrequencyMatrix {
    let corpus = corpus(docs);
    let vocabulary = select(&VocabularyMode::Union, &corpus).unwrap();
    FrequencyMatrix::build(&corpus, &vocabulary).unwrap()
}

// ============================================================
// FrequencyMatrix
// ============================================================

#[test]
fn matrix_rows_sum_to_one_under_union() {
    let m = union_matrix(&[
        ("d1", "a", "the quick brown fox"),
        ("d2", "b", "jumps over the lazy dog the end"),
    ]);
    for i in 0..m.rows() {
        let sum: f64 = m.row(i).iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

#[test]
fn matrix_columns_follow_vocabulary_order() {
    let m = union_matrix(&[("d1", "a", "b a")]);
    assert_eq!(m.vocabulary().words(), &["a", "b"]);
    assert_eq!(m.row(0), vec![0.5, 0.5]);
}

// ============================================================
// PcaEngine — dimension and degeneracy checks
// ============================================================

#[test]
fn pca_zero_dimensions_rejected() {
    let m = union_matrix(&[("d1", "a", "x y"), ("d2", "b", "z w")]);
    let err = PcaEngine::default().analyze(&m, 0).unwrap_err();
    assert!(matches!(err, StyleError::InvalidDimensions { requested: 0, .. }));
    assert_eq!(err.kind(), ErrorKind::Numeric);
}

#[test]
fn pca_more_dimensions_than_documents_rejected() {
    let m = union_matrix(&[("d1", "a", "x y"), ("d2", "b", "z w")]);
    let err = PcaEngine::default().analyze(&m, 3).unwrap_err();
    assert!(matches!(err, StyleError::InvalidDimensions { requested: 3, .. }));
}

#[test]
fn pca_two_documents_have_one_axis() {
    let m = union_matrix(&[("d1", "a", "x y"), ("d2", "b", "z w")]);
    let err = PcaEngine::default().analyze(&m, 2).unwrap_err();
    assert!(matches!(err, StyleError::InvalidDimensions { requested: 2, .. }));
}

#[test]
fn pca_identical_profiles_are_degenerate() {
    let m = union_matrix(&[("d1", "a", "x y"), ("d2", "b", "y x")]);
    let err = PcaEngine::default().analyze(&m, 1).unwrap_err();
    assert!(matches!(err, StyleError::DegenerateScatter));
}

#[test]
fn pca_single_document_is_degenerate() {
    let m = union_matrix(&[("d1", "a", "only one document here")]);
    let err = PcaEngine::default().analyze(&m, 1).unwrap_err();
    assert!(matches!(err, StyleError::DegenerateScatter));
}

// ============================================================
// PcaEngine — projection geometry
// ============================================================

#[test]
fn pca_disjoint_documents_project_symmetrically() {
    // Frequencies [.5, .5, 0, 0] and [0, 0, .5, .5]; centred vectors are
    // ±[.25, .25, -.25, -.25] with norm 0.5
    let m = union_matrix(&[("d1", "a", "a b"), ("d2", "b", "c d")]);
    let result = PcaEngine::default().analyze(&m, 1).unwrap();

    let p1 = result.projection("d1").unwrap().coordinates[0];
    let p2 = result.projection("d2").unwrap().coordinates[0];
    assert!((p1.abs() - 0.5).abs() < 1e-9);
    assert!((p1 + p2).abs() < 1e-9);
    assert!(((p1 - p2).abs() - 1.0).abs() < 1e-9);
    assert!((result.explained_variance[0] - 1.0).abs() < 1e-9);
}

#[test]
fn pca_projections_are_centred() {
    let m = union_matrix(&[
        ("d1", "a", "a a b"),
        ("d2", "b", "b b c"),
        ("d3", "c", "c c a"),
    ]);
    let result = PcaEngine::default().analyze(&m, 2).unwrap();
    assert_eq!(result.projections.len(), 3);
    for axis in 0..2 {
        let sum: f64 = result.projections.iter().map(|p| p.coordinates[axis]).sum();
        assert!(sum.abs() < 1e-9);
    }
}

#[test]
fn pca_explained_variance_is_descending() {
    let m = union_matrix(&[
        ("d1", "a", "a a a a b"),
        ("d2", "b", "b b c"),
        ("d3", "c", "c a d d"),
        ("d4", "d", "d e e e"),
    ]);
    let result = PcaEngine::default().analyze(&m, 3).unwrap();
    let ev = &result.explained_variance;
    assert_eq!(ev.len(), 3);
    assert!(ev[0] >= ev[1] && ev[1] >= ev[2]);
    assert!(ev.iter().sum::<f64>() <= 1.0 + 1e-9);

    let values = result.axis_eigenvalues();
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn pca_projections_follow_corpus_order() {
    let m = union_matrix(&[("zeta", "b", "a b"), ("alpha", "a", "c d")]);
    let result = PcaEngine::default().analyze(&m, 1).unwrap();
    let names: Vec<&str> = result.projections.iter().map(|p| p.record.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn pca_result_serializes_flat_records() {
    let m = union_matrix(&[("d1", "a", "a b"), ("d2", "b", "c d")]);
    let result = PcaEngine::default().analyze(&m, 1).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["dimensions"], 1);
    assert_eq!(json["projections"][0]["name"], "d1");
    assert_eq!(json["projections"][0]["author"], "a");
    assert!(json["projections"][0]["coordinates"].is_array());
    assert!(json.get("eigenpairs").is_none());
}

// ============================================================
// SymmetricEigensolver — pluggable backends
// ============================================================

/// Returns nalgebra's pairs in ascending eigenvalue order with flipped signs.
struct AscendingSolver;

impl SymmetricEigensolver for AscendingSolver {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Vec<EigenPair>> {
        let mut pairs = NalgebraEigensolver::default().decompose(matrix)?;
        pairs.sort_by(|a, b| a.value.total_cmp(&b.value));
        for pair in &mut pairs {
            pair.vector = -pair.vector.clone();
        }
        Ok(pairs)
    }
}

/// Always returns the wrong number of pairs.
struct ShortSolver;

impl SymmetricEigensolver for ShortSolver {
    fn decompose(&self, _matrix: &DMatrix<f64>) -> Result<Vec<EigenPair>> {
        Ok(Vec::new())
    }
}

#[test]
fn engine_sorts_and_normalizes_any_solver_output() {
    let m = union_matrix(&[
        ("d1", "a", "a a b"),
        ("d2", "b", "b b c"),
        ("d3", "c", "c c a d"),
    ]);
    let reference = PcaEngine::default().analyze(&m, 2).unwrap();
    let plugged = PcaEngine::new(Box::new(AscendingSolver)).analyze(&m, 2).unwrap();

    for (r, p) in reference.projections.iter().zip(&plugged.projections) {
        assert_eq!(r.record, p.record);
        for (a, b) in r.coordinates.iter().zip(&p.coordinates) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }
}

#[test]
fn engine_rejects_incomplete_decomposition() {
    let m = union_matrix(&[("d1", "a", "a b"), ("d2", "b", "c d")]);
    let err = PcaEngine::new(Box::new(ShortSolver)).analyze(&m, 1).unwrap_err();
    assert!(matches!(err, StyleError::EigenSolverFailed(_)));
}

#[test]
fn nalgebra_solver_rejects_non_square_matrix() {
    let err = NalgebraEigensolver::default()
        .decompose(&DMatrix::zeros(2, 3))
        .unwrap_err();
    assert!(matches!(err, StyleError::EigenSolverFailed(_)));
}
