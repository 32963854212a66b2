use sg_kernel::{GemmShape, DEFAULT_LANES};

use crate::error::{HarnessError, Result};

/// Calls per backend averaged into one latency report.
pub const AVERAGING_WIDTH: usize = 30;

/// Largest accepted elementwise difference between reference and candidate.
pub const ABS_TOLERANCE: f32 = 1e-3;

/// Settings for one harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Rows of A and C.
    pub m: usize,
    /// Columns of B and C.
    pub n: usize,
    /// Columns of A, rows of B.
    pub k: usize,
    /// Outer repetitions; one pair of report lines each.
    pub iterations: usize,
    /// Inner repetitions averaged per report.
    pub averaging_width: usize,
    /// Largest accepted absolute difference per output element.
    pub tolerance: f32,
    /// Seed for the input fill. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            m: 128,
            n: 256,
            k: 1024,
            iterations: 10,
            averaging_width: AVERAGING_WIDTH,
            tolerance: ABS_TOLERANCE,
            seed: None,
        }
    }
}

impl HarnessConfig {
    pub fn with_shape(mut self, m: usize, n: usize, k: usize) -> Self {
        self.m = m;
        self.n = n;
        self.k = k;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_averaging_width(mut self, width: usize) -> Self {
        self.averaging_width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn shape(&self) -> GemmShape {
        GemmShape::new(self.m, self.n, self.k)
    }

    /// Block width every dimension must be a multiple of. Fixed to the tile
    /// size of the blocked backend [`Harness::new`](crate::Harness::new)
    /// benchmarks.
    pub fn lanes(&self) -> usize {
        DEFAULT_LANES
    }

    /// Checks the settings before any buffer is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.m == 0 || self.n == 0 || self.k == 0 {
            return Err(HarnessError::InvalidConfig(format!(
                "dimensions must be non-zero, got m={} n={} k={}",
                self.m, self.n, self.k
            )));
        }
        if !self.shape().is_block_aligned(self.lanes()) {
            return Err(HarnessError::InvalidConfig(format!(
                "m={} n={} k={} must all be multiples of the lane width {}",
                self.m,
                self.n,
                self.k,
                self.lanes()
            )));
        }
        if self.iterations == 0 {
            return Err(HarnessError::InvalidConfig(
                "iterations must be > 0".to_string(),
            ));
        }
        if self.averaging_width == 0 {
            return Err(HarnessError::InvalidConfig(
                "averaging width must be > 0".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = HarnessConfig::default();
        assert_eq!((c.m, c.n, c.k), (128, 256, 1024));
        assert_eq!(c.averaging_width, 30);
        assert_eq!(c.tolerance, 1e-3);
        assert_eq!(c.lanes(), 8);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = HarnessConfig::default()
            .with_shape(8, 16, 24)
            .with_iterations(2)
            .with_averaging_width(3)
            .with_seed(7);
        assert_eq!(c.shape(), GemmShape::new(8, 16, 24));
        assert_eq!(c.iterations, 2);
        assert_eq!(c.averaging_width, 3);
        assert_eq!(c.seed, Some(7));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_unaligned_shape() {
        let c = HarnessConfig::default().with_shape(128, 250, 1024);
        assert!(matches!(c.validate(), Err(HarnessError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_shape_off_the_blocked_tile() {
        // 12 is a multiple of 4 but not of the 8-wide tile the harness runs.
        let c = HarnessConfig::default().with_shape(12, 16, 16);
        assert!(matches!(c.validate(), Err(HarnessError::InvalidConfig(_))));
        assert!(HarnessConfig::default().with_shape(16, 16, 16).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert!(HarnessConfig::default().with_shape(0, 8, 8).validate().is_err());
        assert!(HarnessConfig::default().with_iterations(0).validate().is_err());
        assert!(HarnessConfig::default()
            .with_averaging_width(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let mut c = HarnessConfig::default();
        c.tolerance = f32::NAN;
        assert!(c.validate().is_err());
        c.tolerance = -1.0;
        assert!(c.validate().is_err());
    }
}
