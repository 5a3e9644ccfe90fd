//! Matrix decompositions.

mod eigen;

pub use eigen::eigen_hermitian;
