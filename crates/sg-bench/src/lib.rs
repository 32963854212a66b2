//! `sg-bench` - verification and latency harness for `sg-kernel` backends.
//!
//! Generates uniform random inputs, runs a reference and a candidate GEMM on
//! them, checks every output element against an absolute tolerance and
//! reports the mean per-call latency of each.

pub mod config;
pub mod error;
pub mod fill;
pub mod harness;
pub mod timing;
pub mod verify;

pub use config::{HarnessConfig, ABS_TOLERANCE, AVERAGING_WIDTH};
pub use error::{HarnessError, Result};
pub use fill::{fill_uniform, make_rng};
pub use harness::{Harness, IterationReport};
pub use timing::{LatencyAccumulator, LatencyReport};
pub use verify::{check_close, max_abs_diff, Mismatch};
