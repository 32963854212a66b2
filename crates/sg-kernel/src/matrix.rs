use crate::error::{GemmError, Result};
use crate::view::{required_len, MatrixView, MatrixViewMut};

/// An owned row-major `f32` matrix.
///
/// The buffer may be wider than the logical matrix (`stride > cols`), which
/// is useful for exercising kernels on padded layouts. Kernels never see a
/// `Matrix` directly; they work on the views returned by [`Matrix::view`] and
/// [`Matrix::view_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    stride: usize,
}

/// Element count of a dense `rows x cols` matrix.
///
/// # Panics
/// Panics on overflow, matching `Vec`'s own capacity overflow.
fn dense_len(rows: usize, cols: usize) -> usize {
    match rows.checked_mul(cols) {
        Some(len) => len,
        None => panic!("capacity overflow: {rows}x{cols} matrix"),
    }
}

impl Matrix {
    /// Create a densely packed matrix from row-major data.
    ///
    /// # Errors
    /// Returns an error if `data.len() != rows * cols`.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        let required = rows.checked_mul(cols).ok_or(GemmError::LayoutOverflow {
            rows,
            cols,
            stride: cols,
        })?;
        if data.len() != required {
            return Err(GemmError::BufferTooSmall {
                required,
                got: data.len(),
            });
        }
        Ok(Matrix {
            data,
            rows,
            cols,
            stride: cols,
        })
    }

    /// Create a matrix over a padded buffer with the given row stride.
    pub fn with_stride(data: Vec<f32>, rows: usize, cols: usize, stride: usize) -> Result<Self> {
        MatrixView::new(&data, rows, cols, stride)?;
        Ok(Matrix {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; dense_len(rows, cols)],
            rows,
            cols,
            stride: cols,
        }
    }

    /// Like [`Matrix::zeros`], but reports allocation failure instead of
    /// aborting.
    ///
    /// # Errors
    /// Returns [`GemmError::AllocationFailed`] when the element count
    /// overflows or the allocator refuses the request.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        let elements = rows
            .checked_mul(cols)
            .ok_or(GemmError::AllocationFailed { elements: usize::MAX })?;
        let mut data = Vec::new();
        data.try_reserve_exact(elements)
            .map_err(|_| GemmError::AllocationFailed { elements })?;
        data.resize(elements, 0.0);
        Ok(Matrix {
            data,
            rows,
            cols,
            stride: cols,
        })
    }

    /// Zero-filled matrix whose rows are `stride` elements apart.
    pub fn zeros_with_stride(rows: usize, cols: usize, stride: usize) -> Result<Self> {
        if stride < cols {
            return Err(GemmError::StrideTooSmall { stride, cols });
        }
        Ok(Matrix {
            data: vec![0.0; required_len(rows, cols, stride)?],
            rows,
            cols,
            stride,
        })
    }

    /// Create a matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![1.0; dense_len(rows, cols)],
            rows,
            cols,
            stride: cols,
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    /// Build a matrix by evaluating `f(row, col)` for every element.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(dense_len(rows, cols));
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Matrix {
            data,
            rows,
            cols,
            stride: cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the underlying buffer, padding included.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Element at (`r`, `c`), or `None` outside the logical region.
    pub fn get(&self, r: usize, c: usize) -> Option<f32> {
        self.view().get(r, c)
    }

    pub fn view(&self) -> MatrixView<'_> {
        // Layout was validated when the matrix was built.
        MatrixView::new(&self.data, self.rows, self.cols, self.stride)
            .unwrap_or_else(|e| unreachable!("matrix layout invariant broken: {e}"))
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_> {
        MatrixViewMut::new(&mut self.data, self.rows, self.cols, self.stride)
            .unwrap_or_else(|e| unreachable!("matrix layout invariant broken: {e}"))
    }

    /// Logical elements in row-major order, padding stripped.
    pub fn to_vec(&self) -> Vec<f32> {
        self.view().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        let m = Matrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.stride(), 3);
        assert_eq!(m.get(1, 0), Some(4.0));
    }

    #[test]
    fn test_new_length_mismatch() {
        assert!(Matrix::new(vec![1.0, 2.0], 2, 3).is_err());
    }

    #[test]
    fn test_new_overflowing_shape() {
        assert!(matches!(
            Matrix::new(vec![1.0; 4], usize::MAX, 2),
            Err(GemmError::LayoutOverflow { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_zeros_overflow_panics() {
        let _ = Matrix::zeros(usize::MAX, 2);
    }

    #[test]
    fn test_zeros_with_stride_overflow() {
        assert!(matches!(
            Matrix::zeros_with_stride(3, 1, 1 << 63),
            Err(GemmError::LayoutOverflow { .. })
        ));
    }

    #[test]
    fn test_zeros_ones() {
        assert_eq!(Matrix::zeros(2, 3).data(), &[0.0; 6]);
        assert_eq!(Matrix::ones(1, 3).data(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_try_zeros() {
        let m = Matrix::try_zeros(4, 8).unwrap();
        assert_eq!(m.data().len(), 32);
        assert!(m.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_try_zeros_overflow() {
        assert!(matches!(
            Matrix::try_zeros(usize::MAX, 2),
            Err(GemmError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_identity() {
        let i = Matrix::identity(3);
        assert_eq!(i.to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_with_stride_strips_padding() {
        let m = Matrix::with_stride(vec![1.0, 2.0, 0.0, 3.0, 4.0], 2, 2, 3).unwrap();
        assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(Matrix::with_stride(vec![1.0; 4], 2, 2, 3).is_err());
    }

    #[test]
    fn test_zeros_with_stride() {
        let m = Matrix::zeros_with_stride(3, 4, 6).unwrap();
        assert_eq!(m.data().len(), 16);
        assert!(Matrix::zeros_with_stride(3, 4, 2).is_err());
    }

    #[test]
    fn test_view_mut_round_trip() {
        let mut m = Matrix::zeros(2, 2);
        m.view_mut().set(0, 1, 7.0);
        assert_eq!(m.get(0, 1), Some(7.0));
    }
}
