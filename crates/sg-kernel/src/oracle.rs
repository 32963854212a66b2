use crate::backend::GemmBackend;
use crate::error::Result;
use crate::shape::GemmShape;
use crate::view::{MatrixView, MatrixViewMut};

/// Trusted reference GEMM backed by the `matrixmultiply` crate.
///
/// Used as the oracle the blocked kernel is checked against. Any other
/// implementation of the standard `C := alpha * A @ B + beta * C` contract
/// could stand in for it.
#[derive(Debug, Clone, Default)]
pub struct OracleBackend;

impl OracleBackend {
    pub fn new() -> Self {
        OracleBackend
    }

    /// Row-major, no-transpose SGEMM: `C := alpha * A @ B + beta * C`.
    ///
    /// When `beta == 0` the prior contents of C are ignored, NaNs included.
    pub fn sgemm(
        &self,
        alpha: f32,
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        beta: f32,
        c: &mut MatrixViewMut<'_>,
    ) -> Result<()> {
        let GemmShape { m, n, k } = GemmShape::from_views(a, b, c)?;
        if m == 0 || n == 0 {
            return Ok(());
        }

        // Lossless: view construction rejects strides above `isize::MAX`.
        let (rsa, rsb, rsc) = (a.stride() as isize, b.stride() as isize, c.stride() as isize);
        // SAFETY: the views guarantee that every (row, col) inside their
        // logical shapes is in bounds at the given row stride with unit
        // column stride, and C does not alias A or B (it is borrowed
        // mutably).
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                alpha,
                a.as_ptr(),
                rsa,
                1,
                b.as_ptr(),
                rsb,
                1,
                beta,
                c.as_mut_ptr(),
                rsc,
                1,
            );
        }
        Ok(())
    }
}

impl GemmBackend for OracleBackend {
    fn name(&self) -> &str {
        "matrixmultiply"
    }

    fn gemm(
        &self,
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        c: &mut MatrixViewMut<'_>,
    ) -> Result<()> {
        self.sgemm(1.0, a, b, 0.0, c)
    }
}
