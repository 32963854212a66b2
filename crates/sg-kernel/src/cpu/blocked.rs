//! Register-blocked SIMD GEMM.
//!
//! The output is cut into `LANES x LANES` tiles. Each tile keeps one vector
//! accumulator per tile row and walks the whole reduction dimension once:
//! per step it broadcasts one element of A for every tile row, loads one
//! `LANES`-wide segment of a B row and issues `LANES` fused multiply-adds.
//! The single B load is shared by every row of the tile. Prefetch hints run
//! a few reduction steps ahead along B, which is the strided, latency-bound
//! operand.

#[cfg(target_arch = "x86_64")]
use super::lane::Avx2Lane;
use super::lane::{PortableLane, SimdLane};
use super::prefetch::prefetch_read;
use crate::backend::GemmBackend;
use crate::error::Result;
use crate::shape::GemmShape;
use crate::view::{MatrixView, MatrixViewMut};

/// Lane width used when none is given; matches one AVX2 register of `f32`.
pub const DEFAULT_LANES: usize = 8;

/// How many B rows ahead of the current reduction step get prefetched.
pub const PREFETCH_DISTANCE: usize = 4;

/// Instruction set the blocked kernel runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isa {
    /// 256-bit AVX2 registers with FMA3.
    Avx2Fma,
    /// Array-backed lanes left to the auto-vectorizer.
    Portable,
}

impl Isa {
    /// Best instruction set available on the running CPU.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
                return Isa::Avx2Fma;
            }
        }
        Isa::Portable
    }

    pub fn name(&self) -> &'static str {
        match self {
            Isa::Avx2Fma => "avx2+fma",
            Isa::Portable => "portable",
        }
    }
}

/// Blocked SIMD GEMM backend with `LANES x LANES` output tiles.
///
/// Requires `m`, `n` and `k` to be multiples of `LANES`; other shapes are
/// rejected with [`GemmError::NotBlockAligned`](crate::GemmError) before C is
/// touched. Use [`CpuBackend`](super::CpuBackend) to route such shapes to the
/// scalar kernel instead.
#[derive(Debug, Clone)]
pub struct BlockedBackend<const LANES: usize = DEFAULT_LANES> {
    isa: Isa,
}

impl BlockedBackend<DEFAULT_LANES> {
    /// Blocked backend on the best instruction set the CPU supports.
    pub fn new() -> Self {
        BlockedBackend { isa: Isa::detect() }
    }

    /// Blocked backend that never uses platform intrinsics.
    pub fn portable() -> Self {
        BlockedBackend { isa: Isa::Portable }
    }
}

impl Default for BlockedBackend<DEFAULT_LANES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LANES: usize> BlockedBackend<LANES> {
    /// Blocked backend with a non-default lane width, on portable lanes.
    pub fn with_portable_lanes() -> Self {
        BlockedBackend { isa: Isa::Portable }
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    /// Tile edge length.
    pub fn lanes(&self) -> usize {
        LANES
    }
}

impl<const LANES: usize> GemmBackend for BlockedBackend<LANES> {
    fn name(&self) -> &str {
        "blocked"
    }

    fn gemm(
        &self,
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        c: &mut MatrixViewMut<'_>,
    ) -> Result<()> {
        let shape = GemmShape::from_views(a, b, c)?;
        shape.ensure_block_aligned(LANES)?;

        match self.isa {
            #[cfg(target_arch = "x86_64")]
            Isa::Avx2Fma if LANES == 8 => {
                // SAFETY: the private `isa` field only holds `Avx2Fma` when
                // `Isa::detect` confirmed avx2 and fma support.
                unsafe { gemm_avx2(a, b, c, shape) }
            }
            _ => gemm_tiles::<LANES, PortableLane<LANES>>(a, b, c, shape),
        }
        Ok(())
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
unsafe fn gemm_avx2(
    a: &MatrixView<'_>,
    b: &MatrixView<'_>,
    c: &mut MatrixViewMut<'_>,
    shape: GemmShape,
) {
    gemm_tiles::<8, Avx2Lane>(a, b, c, shape)
}

/// Tile loop shared by every lane type.
///
/// Expects `shape` to come from `GemmShape::from_views(a, b, c)` and to be
/// aligned to `N`.
#[inline(always)]
#[allow(clippy::needless_range_loop)]
fn gemm_tiles<const N: usize, L: SimdLane<N>>(
    a: &MatrixView<'_>,
    b: &MatrixView<'_>,
    c: &mut MatrixViewMut<'_>,
    shape: GemmShape,
) {
    let GemmShape { m, n, k } = shape;

    for i in (0..m).step_by(N) {
        let a_rows: [&[f32]; N] = std::array::from_fn(|r| &a.row(i + r)[..k]);

        for j in (0..n).step_by(N) {
            for l in 0..PREFETCH_DISTANCE.min(k) {
                prefetch_read(&b.row(l)[j..]);
            }

            let mut acc = [L::zero(); N];

            for l in 0..k {
                if l + PREFETCH_DISTANCE < k {
                    prefetch_read(&b.row(l + PREFETCH_DISTANCE)[j..]);
                }

                let a_bcast: [L; N] = std::array::from_fn(|r| L::splat(a_rows[r][l]));
                let b_seg = L::load(&b.row(l)[j..j + N]);

                for r in 0..N {
                    acc[r] = L::fmadd(a_bcast[r], b_seg, acc[r]);
                }
            }

            for r in 0..N {
                acc[r].store(&mut c.row_mut(i + r)[j..j + N]);
            }
        }
    }
}
