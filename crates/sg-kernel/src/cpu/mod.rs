//! CPU GEMM kernels.
//!
//! The vector lane types behind the blocked kernel stay private to the
//! crate. Their AVX2 instructions are only sound once the CPU has been
//! checked, which [`Isa::detect`] does before [`BlockedBackend`] uses them:
//!
//! ```compile_fail
//! use sg_kernel::cpu::lane::Avx2Lane;
//! ```

pub mod blocked;
pub(crate) mod lane;
pub(crate) mod prefetch;
pub mod scalar;

pub use blocked::{BlockedBackend, Isa, DEFAULT_LANES, PREFETCH_DISTANCE};
pub use scalar::ScalarBackend;

use crate::backend::GemmBackend;
use crate::error::Result;
use crate::shape::GemmShape;
use crate::view::{MatrixView, MatrixViewMut};

/// Pure-Rust CPU backend that accepts any shape.
///
/// Block-aligned shapes go to the blocked SIMD kernel, everything else to the
/// scalar reference kernel.
#[derive(Debug, Clone)]
pub struct CpuBackend {
    blocked: BlockedBackend,
    scalar: ScalarBackend,
}

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend {
            blocked: BlockedBackend::new(),
            scalar: ScalarBackend::new(),
        }
    }

    /// The backend that would handle `shape`.
    pub fn route(&self, shape: &GemmShape) -> &dyn GemmBackend {
        if shape.is_block_aligned(self.blocked.lanes()) {
            &self.blocked
        } else {
            &self.scalar
        }
    }

    pub fn isa(&self) -> Isa {
        self.blocked.isa()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GemmBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn gemm(
        &self,
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        c: &mut MatrixViewMut<'_>,
    ) -> Result<()> {
        let shape = GemmShape::from_views(a, b, c)?;
        self.route(&shape).gemm(a, b, c)
    }
}
