use sg_kernel::{BlockedBackend, GemmBackend, Matrix, OracleBackend};
use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::fill::{fill_uniform, make_rng};
use crate::timing::{LatencyAccumulator, LatencyReport};
use crate::verify::{check_close, Mismatch};

/// Latency of both implementations over one outer iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    pub iteration: usize,
    pub reference: LatencyReport,
    pub candidate: LatencyReport,
}

/// Drives a reference and a candidate GEMM on the same random inputs,
/// checks that they agree and measures how long each takes.
///
/// The harness owns every buffer for its whole lifetime; backends only see
/// borrowed views during a call.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    reference: Box<dyn GemmBackend>,
    candidate: Box<dyn GemmBackend>,
    a: Matrix,
    b: Matrix,
    reference_out: Matrix,
    candidate_out: Matrix,
    iterations_done: usize,
}

impl Harness {
    /// Oracle (`matrixmultiply`) as reference, blocked kernel as candidate.
    pub fn new(config: HarnessConfig) -> Result<Self> {
        Self::with_backends(
            config,
            Box::new(OracleBackend::new()),
            Box::new(BlockedBackend::new()),
        )
    }

    /// Validates `config`, allocates A, B and both outputs, and fills A and B
    /// with uniform values in [0, 1).
    pub fn with_backends(
        config: HarnessConfig,
        reference: Box<dyn GemmBackend>,
        candidate: Box<dyn GemmBackend>,
    ) -> Result<Self> {
        config.validate()?;
        let (m, n, k) = (config.m, config.n, config.k);

        let mut a = Matrix::try_zeros(m, k)?;
        let mut b = Matrix::try_zeros(k, n)?;
        let reference_out = Matrix::try_zeros(m, n)?;
        let candidate_out = Matrix::try_zeros(m, n)?;

        let mut rng = make_rng(config.seed);
        fill_uniform(&mut rng, &mut a.view_mut());
        fill_uniform(&mut rng, &mut b.view_mut());

        info!(
            shape = %config.shape(),
            reference = reference.name(),
            candidate = candidate.name(),
            iterations = config.iterations,
            averaging_width = config.averaging_width,
            "harness ready"
        );

        Ok(Harness {
            config,
            reference,
            candidate,
            a,
            b,
            reference_out,
            candidate_out,
            iterations_done: 0,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Report tag for a backend, e.g. `[blocked]`.
    fn tag(backend: &dyn GemmBackend) -> String {
        format!("[{}]", backend.name())
    }

    /// One outer iteration: `averaging_width` rounds of reference call,
    /// candidate call, comparison.
    ///
    /// # Errors
    /// Stops at the first element outside tolerance and returns
    /// [`HarnessError::ToleranceExceeded`]; backend failures propagate as
    /// [`HarnessError::Gemm`].
    pub fn run_iteration(&mut self) -> Result<IterationReport> {
        let mut reference_time = LatencyAccumulator::new();
        let mut candidate_time = LatencyAccumulator::new();

        for round in 0..self.config.averaging_width {
            let (a, b) = (self.a.view(), self.b.view());

            let mut out = self.reference_out.view_mut();
            reference_time.time(|| self.reference.gemm(&a, &b, &mut out))?;

            let mut out = self.candidate_out.view_mut();
            candidate_time.time(|| self.candidate.gemm(&a, &b, &mut out))?;

            if let Err(mismatch) = check_close(
                &self.reference_out.view(),
                &self.candidate_out.view(),
                self.config.tolerance,
            ) {
                let err = self.mismatch_error(mismatch);
                error!(iteration = self.iterations_done, round, "{}", err);
                return Err(err);
            }
        }

        let report = IterationReport {
            iteration: self.iterations_done,
            reference: reference_time.report(Self::tag(self.reference.as_ref())),
            candidate: candidate_time.report(Self::tag(self.candidate.as_ref())),
        };
        debug!(
            iteration = report.iteration,
            reference_ms = report.reference.mean_ms,
            candidate_ms = report.candidate.mean_ms,
            "iteration complete"
        );
        self.iterations_done += 1;
        Ok(report)
    }

    /// Runs `config.iterations` outer iterations, handing each report to
    /// `on_report` as soon as it is available.
    pub fn run<F>(&mut self, mut on_report: F) -> Result<Vec<IterationReport>>
    where
        F: FnMut(&IterationReport),
    {
        let mut reports = Vec::with_capacity(self.config.iterations);
        for _ in 0..self.config.iterations {
            let report = self.run_iteration()?;
            on_report(&report);
            reports.push(report);
        }
        Ok(reports)
    }

    fn mismatch_error(&self, mismatch: Mismatch) -> HarnessError {
        let reference = self.reference.name().to_string();
        let candidate = self.candidate.name().to_string();
        match mismatch {
            Mismatch::Shape { expected, actual } => HarnessError::ShapeDiffers {
                reference,
                candidate,
                expected,
                actual,
            },
            Mismatch::Element {
                row,
                col,
                expected,
                actual,
            } => HarnessError::ToleranceExceeded {
                reference,
                candidate,
                row,
                col,
                expected,
                actual,
                tolerance: self.config.tolerance,
            },
        }
    }
}
