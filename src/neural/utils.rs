use crate::matrix::Matrix1;
use crate::prelude::*;

/// Index of the largest entry; the first one wins on ties.
/// Returns None for an empty vector.
pub fn argmax(output: &Matrix1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in output.iter().enumerate() {
        match best {
            Some((_, max)) if x <= max => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

pub fn squared_error(output: &Matrix1<f64>, target: &Matrix1<f64>) -> Result<f64> {
    let diff = (target - output)?;
    Ok(diff.iter().map(|d| d * d).sum())
}
