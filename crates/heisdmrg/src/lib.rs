//! heisdmrg - density matrix renormalization group for the Heisenberg chain
//!
//! Computes ground-state energies of the open spin-1/2 antiferromagnetic
//! Heisenberg chain with the two-phase DMRG algorithm: an infinite-system
//! phase grows mirrored blocks to half the chain, then finite-system
//! half-sweeps move the system/environment boundary back and forth.
//!
//! # Architecture
//!
//! ```text
//! engine      → infinite-system growth, finite-system sweeps
//!   ├── superblock / density / block   → assembly, truncation, rotation
//!   ├── solver                         → Lanczos, exact diagonalization
//!   └── store                          → in-memory or JSON-on-disk blocks
//! operations / decomposition           → dense kernels over faer
//! tensor / backend                     → column-major storage, faer views
//! ```
//!
//! # Example
//!
//! ```
//! use heisdmrg::{Dmrg, DmrgConfig};
//! use heisdmrg::solver::LanczosSolver;
//! use heisdmrg::store::MemoryStore;
//!
//! let config = DmrgConfig::new(8, 10, 2);
//! let mut dmrg = Dmrg::new(config, MemoryStore::new(), LanczosSolver::default()).unwrap();
//! let measurements = dmrg.run_with(|m| println!("{m}")).unwrap();
//!
//! // four growth steps, then half-sweeps of two and three steps
//! assert_eq!(measurements.len(), 9);
//! ```

pub mod backend;
pub mod block;
pub mod config;
pub mod decomposition;
pub mod density;
pub mod engine;
pub mod error;
pub mod measurement;
pub mod operations;
pub mod scalar;
pub mod solver;
pub mod spin;
pub mod store;
pub mod superblock;
pub mod tensor;

pub use block::Block;
pub use config::DmrgConfig;
pub use engine::Dmrg;
pub use error::{DmrgError, Result};
pub use measurement::{Measurement, Stage};
pub use scalar::Scalar;
pub use tensor::{DenseTensor, Matrix};
