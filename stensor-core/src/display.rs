use std::fmt;

use crate::{DType, IndexArray, Tensor, TensorCore};

/// Printed integer digits of `v` (at least the leading `0`), plus one for a minus sign.
fn digits(v: f64) -> usize {
    let magnitude = v.abs().trunc();
    let n = if magnitude < 1.0 {
        1
    } else {
        magnitude.log10().floor() as usize + 1
    };
    if v < 0.0 {
        n + 1
    } else {
        n
    }
}

impl<T: DType> fmt::Display for TensorCore<T> {
    /// Nested brackets following the shape, four fractional digits, one row of
    /// the innermost dimension per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.to_vec().map_err(|_| fmt::Error)?;
        let width = values
            .iter()
            .map(|v| digits(v.to_f64()))
            .max()
            .unwrap_or(0)
            + 5;

        let n = self.n_dim();
        if n == 0 {
            return writeln!(f, "{:>width$.4}", values[0].to_f64());
        }

        let shape = self.shape().dims();
        let mut idx = IndexArray::zeros(n);
        let mut open = n;
        for v in values {
            write!(f, "{}{}", " ".repeat(n - open), "[".repeat(open))?;
            write!(f, "{:>width$.4}", v.to_f64())?;

            // Count the dimensions that wrap around on this step.
            open = 0;
            for d in (0..n).rev() {
                if idx[d] + 1 < shape[d] {
                    idx[d] += 1;
                    break;
                }
                idx[d] = 0;
                open += 1;
            }

            if open == 0 {
                write!(f, ", ")?;
            } else {
                writeln!(f, "{}", "]".repeat(open))?;
            }
        }
        Ok(())
    }
}

impl<T: DType> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.core(), f)
    }
}
