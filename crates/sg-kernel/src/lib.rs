//! `sg-kernel` - single-precision GEMM kernels over strided matrix views.
//!
//! This crate provides:
//! - `MatrixView` / `MatrixViewMut`: strided views into flat `f32` buffers
//! - `Matrix`: an owned row-major buffer handing out those views
//! - A `GemmBackend` trait for interchangeable GEMM implementations
//! - `ScalarBackend`: triple-loop reference kernel, any shape
//! - `BlockedBackend`: register-blocked SIMD kernel for lane-aligned shapes
//! - `CpuBackend`: routes each call to the blocked or scalar kernel
//! - `OracleBackend`: trusted reference via the `matrixmultiply` crate

pub mod backend;
pub mod cpu;
pub mod error;
pub mod matrix;
pub mod oracle;
pub mod shape;
pub mod view;

// Re-export primary types at the crate root for convenience.
pub use backend::GemmBackend;
pub use cpu::{BlockedBackend, CpuBackend, Isa, ScalarBackend, DEFAULT_LANES};
pub use error::{GemmError, Result};
pub use matrix::Matrix;
pub use oracle::OracleBackend;
pub use shape::GemmShape;
pub use view::{MatrixView, MatrixViewMut};
