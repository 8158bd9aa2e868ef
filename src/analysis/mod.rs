// Analysis — frequency matrices and principal component analysis.

pub mod eigen;
pub mod matrix;
pub mod pca;
pub mod traits;
