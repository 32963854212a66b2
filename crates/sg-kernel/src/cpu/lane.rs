//! Fixed-width `f32` vector lanes used by the blocked kernel.
//!
//! A lane of width `N` models one vector register. The blocked kernel only
//! needs five operations: zero, broadcast, load, store and fused
//! multiply-add, so any vector facility that provides them can back it.

/// One vector register holding `N` single-precision values.
pub trait SimdLane<const N: usize>: Copy {
    /// All lanes zero.
    fn zero() -> Self;

    /// Broadcast `value` into every lane.
    fn splat(value: f32) -> Self;

    /// Load the first `N` elements of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < N`.
    fn load(src: &[f32]) -> Self;

    /// Store all lanes into the first `N` elements of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < N`.
    fn store(self, dst: &mut [f32]);

    /// `a * b + acc`, lane by lane.
    fn fmadd(a: Self, b: Self, acc: Self) -> Self;
}

/// Portable lane backed by a plain array.
///
/// Any width works. With optimisations on, the per-lane loops compile to
/// whatever vector instructions the target offers. `fmadd` rounds the product
/// before adding unless the compiler contracts it, so results can differ
/// from [`Avx2Lane`] in the last bits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct PortableLane<const N: usize>(pub [f32; N]);

impl<const N: usize> SimdLane<N> for PortableLane<N> {
    #[inline(always)]
    fn zero() -> Self {
        PortableLane([0.0; N])
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        PortableLane([value; N])
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        let mut out = [0.0; N];
        out.copy_from_slice(&src[..N]);
        PortableLane(out)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        dst[..N].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn fmadd(a: Self, b: Self, acc: Self) -> Self {
        let mut out = acc.0;
        for ((o, x), y) in out.iter_mut().zip(a.0).zip(b.0) {
            *o += x * y;
        }
        PortableLane(out)
    }
}

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2Lane;

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::SimdLane;
    use std::arch::x86_64::*;

    /// Eight `f32` lanes in one 256-bit YMM register.
    ///
    /// The methods issue AVX and FMA3 instructions unconditionally. The type
    /// is crate-private and only instantiated by the blocked kernel's
    /// `#[target_feature(enable = "avx2,fma")]` entry point, which is reached
    /// only after `Isa::detect` confirmed both features.
    #[derive(Debug, Clone, Copy)]
    #[repr(transparent)]
    pub struct Avx2Lane(__m256);

    impl SimdLane<8> for Avx2Lane {
        #[inline(always)]
        fn zero() -> Self {
            // SAFETY: only reached after AVX2 detection (see type docs).
            unsafe { Avx2Lane(_mm256_setzero_ps()) }
        }

        #[inline(always)]
        fn splat(value: f32) -> Self {
            // SAFETY: as above.
            unsafe { Avx2Lane(_mm256_set1_ps(value)) }
        }

        #[inline(always)]
        fn load(src: &[f32]) -> Self {
            let src = &src[..8];
            // SAFETY: `src` holds exactly 8 readable f32s; unaligned load.
            unsafe { Avx2Lane(_mm256_loadu_ps(src.as_ptr())) }
        }

        #[inline(always)]
        fn store(self, dst: &mut [f32]) {
            let dst = &mut dst[..8];
            // SAFETY: `dst` holds exactly 8 writable f32s; unaligned store.
            unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
        }

        #[inline(always)]
        fn fmadd(a: Self, b: Self, acc: Self) -> Self {
            // SAFETY: only reached after FMA detection (see type docs).
            unsafe { Avx2Lane(_mm256_fmadd_ps(a.0, b.0, acc.0)) }
        }
    }
}
