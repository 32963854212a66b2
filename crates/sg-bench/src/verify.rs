use sg_kernel::MatrixView;

/// First disagreement found between two outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mismatch {
    /// The outputs have different logical shapes.
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// `|expected - actual| <= tolerance` does not hold at (`row`, `col`).
    Element {
        row: usize,
        col: usize,
        expected: f32,
        actual: f32,
    },
}

/// Elementwise absolute-tolerance comparison in row-major order.
///
/// A NaN on either side always counts as a mismatch.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn check_close(
    expected: &MatrixView<'_>,
    actual: &MatrixView<'_>,
    tolerance: f32,
) -> Result<(), Mismatch> {
    let (er, ec) = (expected.rows(), expected.cols());
    let (ar, ac) = (actual.rows(), actual.cols());
    if (er, ec) != (ar, ac) {
        return Err(Mismatch::Shape {
            expected: (er, ec),
            actual: (ar, ac),
        });
    }

    for row in 0..er {
        let (e_row, a_row) = (expected.row(row), actual.row(row));
        for (col, (&e, &a)) in e_row.iter().zip(a_row).enumerate() {
            // Negated so NaN fails.
            if !((e - a).abs() <= tolerance) {
                return Err(Mismatch::Element {
                    row,
                    col,
                    expected: e,
                    actual: a,
                });
            }
        }
    }
    Ok(())
}

/// Largest absolute elementwise difference; NaN if any pair involves NaN.
pub fn max_abs_diff(expected: &MatrixView<'_>, actual: &MatrixView<'_>) -> f32 {
    let mut worst = 0.0f32;
    for row in 0..expected.rows().min(actual.rows()) {
        for (&e, &a) in expected.row(row).iter().zip(actual.row(row)) {
            let d = (e - a).abs();
            if d.is_nan() {
                return f32::NAN;
            }
            worst = worst.max(d);
        }
    }
    worst
}
