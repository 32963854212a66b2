use crate::error::{GemmError, Result};
use crate::view::{MatrixView, MatrixViewMut};
use std::fmt;

/// Logical dimensions of one GEMM call: A is `m x k`, B is `k x n`, C is
/// `m x n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GemmShape {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

impl GemmShape {
    pub fn new(m: usize, n: usize, k: usize) -> Self {
        GemmShape { m, n, k }
    }

    /// Derives the shape from operand views, checking that the inner
    /// dimensions agree and that C has room for exactly `m x n` results.
    pub fn from_views(
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        c: &MatrixViewMut<'_>,
    ) -> Result<Self> {
        let (m, k) = (a.rows(), a.cols());
        let (k2, n) = (b.rows(), b.cols());
        if k != k2 {
            return Err(GemmError::MatmulMismatch { m, k, k2, n });
        }
        if c.rows() != m || c.cols() != n {
            return Err(GemmError::OutputMismatch {
                expected: (m, n),
                got: (c.rows(), c.cols()),
            });
        }
        Ok(GemmShape { m, n, k })
    }

    /// Returns true if every dimension is a multiple of `lanes`.
    pub fn is_block_aligned(&self, lanes: usize) -> bool {
        lanes > 0 && self.m % lanes == 0 && self.n % lanes == 0 && self.k % lanes == 0
    }

    /// Fails with [`GemmError::NotBlockAligned`] unless
    /// [`is_block_aligned`](Self::is_block_aligned) holds.
    pub fn ensure_block_aligned(&self, lanes: usize) -> Result<()> {
        if self.is_block_aligned(lanes) {
            Ok(())
        } else {
            Err(GemmError::NotBlockAligned {
                m: self.m,
                n: self.n,
                k: self.k,
                lanes,
            })
        }
    }

    /// Floating-point operations for one call (one multiply and one add per
    /// inner-product term).
    pub fn flops(&self) -> f64 {
        2.0 * self.m as f64 * self.n as f64 * self.k as f64
    }
}

impl fmt::Display for GemmShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}] @ [{}x{}]", self.m, self.k, self.k, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_views() {
        let a = vec![0.0; 6];
        let b = vec![0.0; 12];
        let mut c = vec![0.0; 8];
        let av = MatrixView::contiguous(&a, 2, 3).unwrap();
        let bv = MatrixView::contiguous(&b, 3, 4).unwrap();
        let cv = MatrixViewMut::contiguous(&mut c, 2, 4).unwrap();
        let s = GemmShape::from_views(&av, &bv, &cv).unwrap();
        assert_eq!(s, GemmShape::new(2, 4, 3));
    }

    #[test]
    fn test_inner_mismatch() {
        let a = vec![0.0; 6];
        let b = vec![0.0; 8];
        let mut c = vec![0.0; 8];
        let av = MatrixView::contiguous(&a, 2, 3).unwrap();
        let bv = MatrixView::contiguous(&b, 2, 4).unwrap();
        let cv = MatrixViewMut::contiguous(&mut c, 2, 4).unwrap();
        assert!(matches!(
            GemmShape::from_views(&av, &bv, &cv),
            Err(GemmError::MatmulMismatch { m: 2, k: 3, k2: 2, n: 4 })
        ));
    }

    #[test]
    fn test_output_mismatch() {
        let a = vec![0.0; 6];
        let b = vec![0.0; 12];
        let mut c = vec![0.0; 6];
        let av = MatrixView::contiguous(&a, 2, 3).unwrap();
        let bv = MatrixView::contiguous(&b, 3, 4).unwrap();
        let cv = MatrixViewMut::contiguous(&mut c, 2, 3).unwrap();
        assert!(matches!(
            GemmShape::from_views(&av, &bv, &cv),
            Err(GemmError::OutputMismatch { .. })
        ));
    }

    #[test]
    fn test_block_alignment() {
        assert!(GemmShape::new(128, 256, 1024).is_block_aligned(8));
        assert!(GemmShape::new(0, 8, 8).is_block_aligned(8));
        assert!(!GemmShape::new(8, 12, 8).is_block_aligned(8));
        assert!(!GemmShape::new(8, 8, 8).is_block_aligned(0));
        assert!(matches!(
            GemmShape::new(8, 8, 9).ensure_block_aligned(8),
            Err(GemmError::NotBlockAligned { k: 9, lanes: 8, .. })
        ));
    }

    #[test]
    fn test_display_and_flops() {
        let s = GemmShape::new(2, 4, 3);
        assert_eq!(s.to_string(), "[2x3] @ [3x4]");
        assert_eq!(s.flops(), 48.0);
    }
}
