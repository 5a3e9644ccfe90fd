//! Tensor operations used to assemble and rotate block operators.

mod kron;
mod linalg;
mod outer;
mod permutedims;

pub use kron::{add_scaled, kron, merge_pairs, pair_product};
pub use linalg::{change_of_basis, matmul, matvec};
pub use outer::outer;
pub use permutedims::{permutedims, transpose};
