use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GemmError {
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    MatmulMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("output shape mismatch: expected {expected:?}, got {got:?}")]
    OutputMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("buffer too small: view needs {required} elements, buffer has {got}")]
    BufferTooSmall { required: usize, got: usize },
    #[error("layout of {rows}x{cols} at row stride {stride} overflows the address space")]
    LayoutOverflow {
        rows: usize,
        cols: usize,
        stride: usize,
    },
    #[error("row stride {stride} is smaller than row width {cols}")]
    StrideTooSmall { stride: usize, cols: usize },
    #[error("region [{row}.., {col}..] of size {rows}x{cols} exceeds parent {parent_rows}x{parent_cols}")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
        parent_rows: usize,
        parent_cols: usize,
    },
    #[error("shape m={m} n={n} k={k} is not a multiple of the lane width {lanes}")]
    NotBlockAligned {
        m: usize,
        n: usize,
        k: usize,
        lanes: usize,
    },
    #[error("failed to allocate {elements} f32 elements")]
    AllocationFailed { elements: usize },
}

pub type Result<T> = std::result::Result<T, GemmError>;
