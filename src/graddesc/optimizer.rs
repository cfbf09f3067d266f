use ndarray::Array1;

use super::function::Function;
use super::provider::EpochProvider;
use super::updater::Updater;

/// Runs a fixed number of gradient-descent epochs.
///
/// There is no early stopping: the loop always performs `max_steps` epochs.
#[derive(Debug)]
pub struct Optimizer<P, U> {
    provider: P,
    updater: U,
    learning_rate: f64,
    max_steps: usize,
}

impl<P: EpochProvider, U: Updater> Optimizer<P, U> {
    pub fn new(provider: P, updater: U, learning_rate: f64, max_steps: usize) -> Self {
        Self {
            provider,
            updater,
            learning_rate,
            max_steps,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Descends from `initial` and returns the parameters after the last epoch.
    ///
    /// A provider without samples leaves `initial` untouched.
    pub fn optimize(&mut self, initial: Array1<f64>) -> Array1<f64> {
        if self.provider.total_size() == 0 {
            log::warn!("Epoch provider has no samples, skipping gradient descent");
            return initial;
        }

        log::info!(
            "Starting gradient descent: {} parameters, {} samples, {} steps, learning rate {}",
            initial.len(),
            self.provider.total_size(),
            self.max_steps,
            self.learning_rate
        );

        let mut params = initial;
        for epoch in 0..self.max_steps {
            let function = self.provider.epoch(epoch);
            debug_assert_eq!(function.input_size(), params.len());

            let gradient = function.gradient(params.view());
            params = self
                .updater
                .update(params, gradient.view(), self.learning_rate);

            self.provider.after_update(params.view());
            self.provider.epoch_end(params.view());

            if log::log_enabled!(log::Level::Debug) {
                let norm = gradient.dot(&gradient).sqrt();
                log::debug!("epoch {}: gradient norm {}", epoch, norm);
            }
        }

        log::info!("Finished gradient descent after {} steps", self.max_steps);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graddesc::function::tests::Quadratic;
    use crate::graddesc::{BatchProvider, SampleSource, StochasticProvider, BaseUpdater};
    use ndarray::{array, ArrayView1};

    struct Targets {
        targets: Vec<Array1<f64>>,
        updates: Vec<Array1<f64>>,
    }

    impl SampleSource for Targets {
        type Function = Quadratic;

        fn len(&self) -> usize {
            self.targets.len()
        }

        fn function(&self, index: usize) -> Quadratic {
            Quadratic {
                target: self.targets[index].clone(),
            }
        }

        fn refresh(&mut self, params: ArrayView1<f64>) {
            self.updates.push(params.to_owned());
        }

        fn input_size(&self) -> usize {
            2
        }
    }

    fn targets() -> Targets {
        Targets {
            targets: vec![array![1., 1.], array![3., -1.]],
            updates: vec![],
        }
    }

    #[test]
    fn batch_descent_reaches_the_mean() {
        // sum of (w - t_i)^2 is minimised at the mean of the targets
        let mut optimizer = Optimizer::new(BatchProvider::new(targets()), BaseUpdater, 0.1, 200);
        let params = optimizer.optimize(array![0., 0.]);

        assert!((params[0] - 2.0).abs() < 1e-6);
        assert!(params[1].abs() < 1e-6);
    }

    #[test]
    fn runs_exactly_max_steps_and_reports_every_update() {
        let mut optimizer = Optimizer::new(StochasticProvider::new(targets()), BaseUpdater, 0.5, 3);
        let params = optimizer.optimize(array![0., 0.]);

        // lr 0.5 on (w - t)^2 jumps straight to the visited target
        let source = optimizer.into_provider().into_source();
        assert_eq!(
            source.updates,
            vec![array![1., 1.], array![3., -1.], array![1., 1.]]
        );
        assert_eq!(params, array![1., 1.]);
    }

    #[test]
    fn empty_source_returns_initial() {
        let empty = Targets {
            targets: vec![],
            updates: vec![],
        };
        let mut stochastic = Optimizer::new(StochasticProvider::new(empty), BaseUpdater, 0.1, 3);
        assert_eq!(stochastic.optimize(array![1., 2.]), array![1., 2.]);
        assert!(stochastic.provider().source().updates.is_empty());

        let empty = Targets {
            targets: vec![],
            updates: vec![],
        };
        let mut batch = Optimizer::new(BatchProvider::new(empty), BaseUpdater, 0.1, 3);
        assert_eq!(batch.optimize(array![1., 2.]), array![1., 2.]);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let mut optimizer = Optimizer::new(StochasticProvider::new(targets()), BaseUpdater, 0.5, 0);
        assert_eq!(optimizer.optimize(array![7., 7.]), array![7., 7.]);
        assert!(optimizer.provider().source().updates.is_empty());
    }
}
