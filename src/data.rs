use ndarray::{Array1, Array2};

use crate::error::{MlError, Result};

/// Anything that can be described by a fixed-width feature vector.
///
/// Implementations must return the same vector on every call during a run.
pub trait DataPoint {
    fn features(&self) -> Array1<f64>;
}

/// A data point that also carries the expected output of a supervised model.
pub trait SupervisedDataPoint: DataPoint {
    fn target(&self) -> Array1<f64>;
}

/// An ordered source of data points.
///
/// Order is preserved by training so that sample indices stay meaningful,
/// clustering does not depend on it.
pub trait DataSet {
    type Point: DataPoint;

    fn data_points(&self) -> Vec<Self::Point>;
}

impl DataPoint for Array1<f64> {
    fn features(&self) -> Array1<f64> {
        self.clone()
    }
}

impl DataPoint for Vec<f64> {
    fn features(&self) -> Array1<f64> {
        Array1::from_vec(self.clone())
    }
}

impl<P: DataPoint + Clone> DataSet for Vec<P> {
    type Point = P;

    fn data_points(&self) -> Vec<P> {
        self.clone()
    }
}

/// A tabular supervised sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub features: Array1<f64>,
    pub target: Array1<f64>,
}

impl Row {
    pub fn new(features: Vec<f64>, target: Vec<f64>) -> Self {
        Self {
            features: Array1::from_vec(features),
            target: Array1::from_vec(target),
        }
    }
}

impl DataPoint for Row {
    fn features(&self) -> Array1<f64> {
        self.features.clone()
    }
}

impl SupervisedDataPoint for Row {
    fn target(&self) -> Array1<f64> {
        self.target.clone()
    }
}

fn stack_rows(rows: Vec<Array1<f64>>, what: &'static str) -> Result<Array2<f64>> {
    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Err(MlError::EmptyDataset),
    };

    let mut matrix = Array2::zeros((rows.len(), width));
    for (mut dst, row) in matrix.outer_iter_mut().zip(rows.iter()) {
        if row.len() != width {
            return Err(MlError::DimensionMismatch {
                what,
                expected: width,
                got: row.len(),
            });
        }
        dst.assign(row);
    }

    Ok(matrix)
}

/// Collects the feature vectors of `points` as the rows of a matrix.
///
/// Fails on an empty slice or when the widths disagree with the first point.
pub fn feature_matrix<P: DataPoint>(points: &[P]) -> Result<Array2<f64>> {
    stack_rows(points.iter().map(|p| p.features()).collect(), "feature vector")
}

/// Collects the target vectors of `points` as the rows of a matrix.
pub fn target_matrix<P: SupervisedDataPoint>(points: &[P]) -> Result<Array2<f64>> {
    stack_rows(points.iter().map(|p| p.target()).collect(), "target vector")
}
