use crate::error::{GemmError, Result};

/// Number of buffer elements a `rows x cols` region with row `stride` spans.
///
/// The last row only needs `cols` elements, so a padded buffer does not have
/// to carry trailing padding after its final row.
///
/// # Errors
/// Returns [`GemmError::LayoutOverflow`] if the span does not fit in `usize`
/// or `stride` exceeds `isize::MAX`, the largest row step a pointer offset
/// can express.
pub fn required_len(rows: usize, cols: usize, stride: usize) -> Result<usize> {
    if stride > isize::MAX as usize {
        return Err(GemmError::LayoutOverflow { rows, cols, stride });
    }
    if rows == 0 || cols == 0 {
        return Ok(0);
    }
    (rows - 1)
        .checked_mul(stride)
        .and_then(|span| span.checked_add(cols))
        .ok_or(GemmError::LayoutOverflow { rows, cols, stride })
}

fn check_layout(len: usize, rows: usize, cols: usize, stride: usize) -> Result<()> {
    if stride < cols {
        return Err(GemmError::StrideTooSmall { stride, cols });
    }
    let required = required_len(rows, cols, stride)?;
    if len < required {
        return Err(GemmError::BufferTooSmall { required, got: len });
    }
    Ok(())
}

fn check_region(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    parent_rows: usize,
    parent_cols: usize,
) -> Result<()> {
    let rows_fit = row.checked_add(rows).is_some_and(|end| end <= parent_rows);
    let cols_fit = col.checked_add(cols).is_some_and(|end| end <= parent_cols);
    if rows_fit && cols_fit {
        Ok(())
    } else {
        Err(GemmError::OutOfBounds {
            row,
            col,
            rows,
            cols,
            parent_rows,
            parent_cols,
        })
    }
}

/// Read-only view of a row-major matrix inside a flat `f32` buffer.
///
/// Consecutive rows start `stride` elements apart, and `stride` may exceed
/// the logical width `cols`. That makes a block of a larger matrix
/// addressable without copying it.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixView<'a> {
    /// Create a view over `data`.
    ///
    /// # Errors
    /// Returns an error if `stride < cols` or if `data` is too short to hold
    /// `rows` rows at the given stride.
    pub fn new(data: &'a [f32], rows: usize, cols: usize, stride: usize) -> Result<Self> {
        check_layout(data.len(), rows, cols, stride)?;
        Ok(MatrixView {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// View over a densely packed `rows x cols` buffer.
    pub fn contiguous(data: &'a [f32], rows: usize, cols: usize) -> Result<Self> {
        Self::new(data, rows, cols, cols)
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

    /// Returns true when rows follow each other without padding.
    pub fn is_contiguous(&self) -> bool {
        self.stride == self.cols || self.rows <= 1
    }

    /// Returns the `cols` logical elements of row `i`.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f32] {
        assert!(i < self.rows, "row {} out of range for {} rows", i, self.rows);
        if self.cols == 0 {
            return &[];
        }
        let start = i * self.stride;
        &self.data[start..start + self.cols]
    }

    /// Element at (`r`, `c`), or `None` outside the logical region.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<f32> {
        if r < self.rows && c < self.cols {
            Some(self.data[r * self.stride + c])
        } else {
            None
        }
    }

    /// A `rows x cols` block starting at (`row`, `col`), sharing this view's
    /// buffer and stride.
    pub fn submatrix(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<Self> {
        check_region(row, col, rows, cols, self.rows, self.cols)?;
        let offset = if rows == 0 || cols == 0 {
            0
        } else {
            row * self.stride + col
        };
        let end = offset + required_len(rows, cols, self.stride)?;
        Ok(MatrixView {
            data: &self.data[offset..end],
            rows,
            cols,
            stride: self.stride,
        })
    }

    /// Pointer to element (0, 0).
    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Copies the logical elements into a new row-major vector.
    pub fn to_vec(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            out.extend_from_slice(self.row(i));
        }
        out
    }
}

/// Mutable counterpart of [`MatrixView`], used for GEMM outputs.
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f32],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixViewMut<'a> {
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize, stride: usize) -> Result<Self> {
        check_layout(data.len(), rows, cols, stride)?;
        Ok(MatrixViewMut {
            data,
            rows,
            cols,
            stride,
        })
    }

    pub fn contiguous(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self> {
        Self::new(data, rows, cols, cols)
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

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> MatrixView<'_> {
        MatrixView {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
        }
    }

    /// Mutable slice over the `cols` logical elements of row `i`.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        assert!(i < self.rows, "row {} out of range for {} rows", i, self.rows);
        if self.cols == 0 {
            return &mut [];
        }
        let start = i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<f32> {
        self.as_view().get(r, c)
    }

    /// Writes `value` at (`r`, `c`).
    ///
    /// # Panics
    /// Panics if the position is outside the logical region.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: f32) {
        assert!(
            r < self.rows && c < self.cols,
            "({}, {}) out of range for {}x{}",
            r,
            c,
            self.rows,
            self.cols
        );
        self.data[r * self.stride + c] = value;
    }

    /// Sets every logical element to `value`; padding is left untouched.
    pub fn fill(&mut self, value: f32) {
        for i in 0..self.rows {
            self.row_mut(i).fill(value);
        }
    }

    pub fn submatrix_mut(
        &mut self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_>> {
        check_region(row, col, rows, cols, self.rows, self.cols)?;
        let offset = if rows == 0 || cols == 0 {
            0
        } else {
            row * self.stride + col
        };
        let end = offset + required_len(rows, cols, self.stride)?;
        Ok(MatrixViewMut {
            data: &mut self.data[offset..end],
            rows,
            cols,
            stride: self.stride,
        })
    }

    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.data.as_mut_ptr()
    }
}
