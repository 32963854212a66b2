use crate::backend::GemmBackend;
use crate::error::Result;
use crate::shape::GemmShape;
use crate::view::{MatrixView, MatrixViewMut};

/// Triple-loop reference GEMM.
///
/// Each output element is the dot product of one row of A and one column of
/// B, summed in a single `f32` accumulator in increasing reduction order.
/// There are no shape or alignment requirements, which makes this the
/// correctness baseline and the fallback for shapes the blocked kernel
/// rejects.
#[derive(Debug, Clone, Default)]
pub struct ScalarBackend;

impl ScalarBackend {
    pub fn new() -> Self {
        ScalarBackend
    }
}

impl GemmBackend for ScalarBackend {
    fn name(&self) -> &str {
        "scalar"
    }

    fn gemm(
        &self,
        a: &MatrixView<'_>,
        b: &MatrixView<'_>,
        c: &mut MatrixViewMut<'_>,
    ) -> Result<()> {
        let GemmShape { m, n, k } = GemmShape::from_views(a, b, c)?;

        for i in 0..m {
            let a_row = a.row(i);
            let c_row = c.row_mut(i);
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..k {
                    sum += a_row[p] * b.row(p)[j];
                }
                c_row[j] = sum;
            }
        }
        Ok(())
    }
}
