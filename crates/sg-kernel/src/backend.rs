use std::fmt::Debug;

use crate::error::{GemmError, Result};
use crate::matrix::Matrix;
use crate::view::{MatrixView, MatrixViewMut};

/// Trait for interchangeable single-precision GEMM implementations
/// (reference loops, blocked SIMD kernels, external libraries).
///
/// Implementations read `a` and `b` and write only to `c`. They never keep
/// references past the call.
pub trait GemmBackend: Debug {
    /// Returns the name of this backend (e.g., "scalar", "blocked").
    fn name(&self) -> &str;

    /// Matrix multiplication: C := A @ B.
    ///
    /// - `a`: view of shape [m, k]
    /// - `b`: view of shape [k, n]
    /// - `c`: view of shape [m, n]; every logical element is overwritten,
    ///   prior contents do not contribute.
    fn gemm(&self, a: &MatrixView<'_>, b: &MatrixView<'_>, c: &mut MatrixViewMut<'_>)
        -> Result<()>;

    /// Multiplies two owned matrices into a freshly allocated result.
    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols() != b.rows() {
            return Err(GemmError::MatmulMismatch {
                m: a.rows(),
                k: a.cols(),
                k2: b.rows(),
                n: b.cols(),
            });
        }
        let mut c = Matrix::try_zeros(a.rows(), b.cols())?;
        self.gemm(&a.view(), &b.view(), &mut c.view_mut())?;
        Ok(c)
    }
}
