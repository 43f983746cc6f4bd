use ndarray::ArrayView1;

use crate::error::{KnnError, Result};
use crate::record::Record;

pub fn euclidean(first: ArrayView1<f64>, second: ArrayView1<f64>) -> Result<f64> {
    if first.len() != second.len() {
        return Err(KnnError::DimensionMismatch {
            left: first.len(),
            right: second.len(),
        });
    }

    let squared: f64 = first
        .iter()
        .zip(second.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum();

    Ok(squared.sqrt())
}

pub fn between(first: &Record, second: &Record) -> Result<f64> {
    euclidean(first.features(), second.features())
}
