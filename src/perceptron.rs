use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::config::{rng_from_seed, PerceptronConfig, TrainingMode};
use crate::data::{feature_matrix, target_matrix, DataPoint, DataSet, SupervisedDataPoint};
use crate::error::{MlError, Result};
use crate::graddesc::{BaseUpdater, BatchProvider, Function, Optimizer, SampleSource, StochasticProvider};

/// Sign with zero left at zero.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn same_sign(predicted: ArrayView1<f64>, target: ArrayView1<f64>) -> bool {
    predicted.iter().zip(target.iter()).all(|(p, t)| p * t > 0.0)
}

fn weight_view(params: ArrayView1<f64>, shape: (usize, usize)) -> Option<ArrayView2<f64>> {
    params.into_shape(shape).ok()
}

/// Appends the constant bias feature to every row.
fn with_bias(features: &Array2<f64>) -> Array2<f64> {
    let (n, width) = features.dim();
    let mut x = Array2::ones((n, width + 1));
    x.slice_mut(s![.., ..width]).assign(features);
    x
}

/// Perceptron objective for one sample.
///
/// Holds the prediction made with the parameters in place when it was built.
#[derive(Debug, Clone)]
pub struct PerceptronStep {
    x: Array1<f64>,
    predicted: Array1<f64>,
    target: Array1<f64>,
    shape: (usize, usize),
}

impl Function for PerceptronStep {
    fn input_size(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    /// `-(predicted * W^T x)`, pairing the cached prediction with the candidate weights.
    fn loss(&self, params: ArrayView1<f64>) -> Array1<f64> {
        match weight_view(params, self.shape) {
            Some(weights) => -(&self.predicted * &weights.t().dot(&self.x)),
            None => Array1::from_elem(self.target.len(), f64::NAN),
        }
    }

    fn gradient(&self, _params: ArrayView1<f64>) -> Array1<f64> {
        if same_sign(self.predicted.view(), self.target.view()) {
            return Array1::zeros(self.input_size());
        }

        // column j of the weight matrix moves along -target[j] * x
        let cols = self.shape.1;
        Array1::from_shape_fn(self.input_size(), |i| -self.target[i % cols] * self.x[i / cols])
    }
}

/// Training samples plus the current prediction for each of them.
#[derive(Debug, Clone)]
struct PerceptronSamples {
    x: Array2<f64>,
    y: Array2<f64>,
    predicted: Array2<f64>,
    shape: (usize, usize),
}

impl PerceptronSamples {
    fn new(x: Array2<f64>, y: Array2<f64>) -> Self {
        let shape = (x.ncols(), y.ncols());
        let predicted = Array2::zeros(y.dim());
        Self {
            x,
            y,
            predicted,
            shape,
        }
    }

    fn misclassified(&self) -> usize {
        self.predicted
            .outer_iter()
            .zip(self.y.outer_iter())
            .filter(|(p, t)| !same_sign(*p, *t))
            .count()
    }
}

impl SampleSource for PerceptronSamples {
    type Function = PerceptronStep;

    fn len(&self) -> usize {
        self.x.nrows()
    }

    fn function(&self, index: usize) -> PerceptronStep {
        PerceptronStep {
            x: self.x.row(index).to_owned(),
            predicted: self.predicted.row(index).to_owned(),
            target: self.y.row(index).to_owned(),
            shape: self.shape,
        }
    }

    fn refresh(&mut self, params: ArrayView1<f64>) {
        let Some(weights) = weight_view(params, self.shape) else {
            log::warn!(
                "ignoring parameter vector of length {}, expected {}",
                params.len(),
                self.shape.0 * self.shape.1
            );
            return;
        };
        self.predicted = self.x.dot(&weights).mapv(sign);
    }

    fn input_size(&self) -> usize {
        self.shape.0 * self.shape.1
    }
}

/// Multi-class sign perceptron trained by gradient descent.
///
/// The weight matrix has one row per feature plus a final bias row, and one
/// column per target dimension.
#[derive(Debug, Clone, Default)]
pub struct Perceptron {
    config: PerceptronConfig,
    weights: Option<Array2<f64>>,
}

impl Perceptron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PerceptronConfig) -> Self {
        Self {
            config,
            weights: None,
        }
    }

    pub fn config(&self) -> &PerceptronConfig {
        &self.config
    }

    pub fn weights(&self) -> Option<&Array2<f64>> {
        self.weights.as_ref()
    }

    /// Learns the weight matrix from scratch.
    ///
    /// # Errors
    /// Returns an error for an empty dataset, for feature or target vectors of
    /// inconsistent width, or for an invalid configuration. Previously trained
    /// weights are kept when training fails.
    pub fn train<D>(&mut self, dataset: &D) -> Result<()>
    where
        D: DataSet,
        D::Point: SupervisedDataPoint,
    {
        self.config.validate()?;

        let points = dataset.data_points();
        let x = with_bias(&feature_matrix(&points)?);
        let y = target_matrix(&points)?;
        let mut samples = PerceptronSamples::new(x, y);
        let shape = samples.shape;

        let mut rng = rng_from_seed(self.config.seed);
        let initial = Array2::random_using(shape, Uniform::new(0.1, 0.11), &mut rng);
        let initial: Array1<f64> = initial.iter().copied().collect();
        samples.refresh(initial.view());

        log::info!(
            "Training perceptron on {} samples: {} features, {} outputs, {:?} mode",
            samples.len(),
            shape.0 - 1,
            shape.1,
            self.config.mode
        );

        let lr = self.config.learning_rate;
        let steps = self.config.max_steps;
        let (params, samples) = match self.config.mode {
            TrainingMode::Stochastic => {
                let mut op = Optimizer::new(StochasticProvider::new(samples), BaseUpdater, lr, steps);
                let params = op.optimize(initial);
                (params, op.into_provider().into_source())
            }
            TrainingMode::Batch => {
                let mut op = Optimizer::new(BatchProvider::new(samples), BaseUpdater, lr, steps);
                let params = op.optimize(initial);
                (params, op.into_provider().into_source())
            }
        };

        log::info!("Perceptron misclassifies {} training samples", samples.misclassified());

        let len = params.len();
        let weights = Array2::from_shape_vec(shape, params.to_vec()).map_err(|_| {
            MlError::DimensionMismatch {
                what: "weight vector",
                expected: shape.0 * shape.1,
                got: len,
            }
        })?;
        self.weights = Some(weights);
        Ok(())
    }

    /// Signs of `W^T [features, 1]`, zeros passed through.
    pub fn predict(&self, features: ArrayView1<f64>) -> Result<Array1<f64>> {
        let weights = self.weights.as_ref().ok_or(MlError::NotTrained)?;
        let expected = weights.nrows() - 1;
        if features.len() != expected {
            return Err(MlError::DimensionMismatch {
                what: "model features",
                expected,
                got: features.len(),
            });
        }

        let mut x = Array1::ones(expected + 1);
        x.slice_mut(s![..expected]).assign(&features);
        Ok(weights.t().dot(&x).mapv(sign))
    }

    /// Number of samples whose prediction differs in sign from the target in any dimension.
    pub fn misclassified<D>(&self, dataset: &D) -> Result<usize>
    where
        D: DataSet,
        D::Point: SupervisedDataPoint,
    {
        let mut count = 0;
        for point in dataset.data_points() {
            let predicted = self.predict(point.features().view())?;
            let target = point.target();
            if predicted.len() != target.len() {
                return Err(MlError::DimensionMismatch {
                    what: "target vector",
                    expected: predicted.len(),
                    got: target.len(),
                });
            }
            if !same_sign(predicted.view(), target.view()) {
                count += 1;
            }
        }
        Ok(count)
    }
}
