use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sg_kernel::MatrixViewMut;

/// Overwrites every logical element of `view` with an independent sample
/// from the uniform distribution on [0, 1). Stride padding is not touched.
pub fn fill_uniform<R: Rng + ?Sized>(rng: &mut R, view: &mut MatrixViewMut<'_>) {
    for i in 0..view.rows() {
        for v in view.row_mut(i) {
            *v = rng.gen::<f32>();
        }
    }
}

/// RNG for input generation: seeded when a seed is given, from OS entropy
/// otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
