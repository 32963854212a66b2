/// Hint that the cache line holding `data[0]` will be read soon.
///
/// Purely a performance hint: it never faults and never changes results. On
/// targets without an explicit prefetch instruction this is a no-op.
#[inline(always)]
pub fn prefetch_read(data: &[f32]) {
    #[cfg(target_arch = "x86_64")]
    {
        use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
        // SAFETY: prefetch is a hint with no memory-safety requirements, and
        // SSE is part of the x86_64 baseline.
        unsafe { _mm_prefetch::<_MM_HINT_T0>(data.as_ptr().cast::<i8>()) }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = data;
}
