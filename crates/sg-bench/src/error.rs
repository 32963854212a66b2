use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "tolerance exceeded at ({row}, {col}): {reference}={expected}, {candidate}={actual} \
         (|diff| > {tolerance})"
    )]
    ToleranceExceeded {
        reference: String,
        candidate: String,
        row: usize,
        col: usize,
        expected: f32,
        actual: f32,
        tolerance: f32,
    },
    #[error("output shape differs: {reference} produced {expected:?}, {candidate} produced {actual:?}")]
    ShapeDiffers {
        reference: String,
        candidate: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("gemm error: {0}")]
    Gemm(#[from] sg_kernel::GemmError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
