use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::function::{Batch, Function};

/// Supplies the objective for each optimizer epoch and observes parameter changes.
pub trait EpochProvider {
    type Function: Function;

    /// Number of samples the provider draws from.
    fn total_size(&self) -> usize;

    fn epoch(&mut self, index: usize) -> Self::Function;

    /// Called with the new parameters right after every update.
    fn after_update(&mut self, _params: ArrayView1<f64>) {}

    /// Called once at the end of every epoch.
    fn epoch_end(&mut self, _params: ArrayView1<f64>) {}
}

/// Builds one per-sample [`Function`] on demand.
///
/// Sources may cache values derived from the parameters (predictions for
/// instance); `refresh` is where that cache gets rebuilt.
pub trait SampleSource {
    type Function: Function;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objective for the sample at `index`, built from the current cache.
    fn function(&self, index: usize) -> Self::Function;

    fn refresh(&mut self, params: ArrayView1<f64>);

    fn input_size(&self) -> usize;
}

/// Every epoch sees the whole dataset at once.
#[derive(Debug)]
pub struct BatchProvider<S> {
    source: S,
}

impl<S: SampleSource> BatchProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S> EpochProvider for BatchProvider<S>
where
    S: SampleSource,
    S::Function: Sync,
{
    type Function = Batch<S::Function>;

    fn total_size(&self) -> usize {
        self.source.len()
    }

    fn epoch(&mut self, _index: usize) -> Self::Function {
        let parts = (0..self.source.len())
            .map(|idx| self.source.function(idx))
            .collect();
        Batch::new(self.source.input_size(), parts)
    }

    fn after_update(&mut self, params: ArrayView1<f64>) {
        self.source.refresh(params);
    }
}

/// Order in which a [`StochasticProvider`] visits samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrder {
    /// Epoch `i` uses sample `i mod N`.
    #[default]
    Sequential,
    /// A seeded permutation, reshuffled after every full pass.
    Shuffled { seed: u64 },
}

/// Every epoch sees a single sample.
#[derive(Debug)]
pub struct StochasticProvider<S> {
    source: S,
    order: SampleOrder,
    permutation: Vec<usize>,
    rng: Option<StdRng>,
    epochs_done: usize,
}

impl<S: SampleSource> StochasticProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_order(source, SampleOrder::Sequential)
    }

    pub fn with_order(source: S, order: SampleOrder) -> Self {
        let mut permutation: Vec<usize> = (0..source.len()).collect();
        let rng = match order {
            SampleOrder::Sequential => None,
            SampleOrder::Shuffled { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                permutation.shuffle(&mut rng);
                Some(rng)
            }
        };

        Self {
            source,
            order,
            permutation,
            rng,
            epochs_done: 0,
        }
    }

    pub fn order(&self) -> SampleOrder {
        self.order
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Sample index visited by epoch `index`.
    pub fn sample_index(&self, index: usize) -> usize {
        self.permutation[index % self.permutation.len()]
    }
}

impl<S: SampleSource> EpochProvider for StochasticProvider<S> {
    type Function = S::Function;

    fn total_size(&self) -> usize {
        self.source.len()
    }

    fn epoch(&mut self, index: usize) -> Self::Function {
        self.source.function(self.sample_index(index))
    }

    fn after_update(&mut self, params: ArrayView1<f64>) {
        self.source.refresh(params);
    }

    fn epoch_end(&mut self, _params: ArrayView1<f64>) {
        self.epochs_done += 1;
        if self.epochs_done % self.permutation.len().max(1) != 0 {
            return;
        }
        if let Some(rng) = self.rng.as_mut() {
            self.permutation.shuffle(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graddesc::function::tests::Quadratic;
    use itertools::Itertools;
    use ndarray::{array, Array1};

    struct Targets {
        targets: Vec<Array1<f64>>,
        refreshed: usize,
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

        fn refresh(&mut self, _params: ArrayView1<f64>) {
            self.refreshed += 1;
        }

        fn input_size(&self) -> usize {
            1
        }
    }

    fn source() -> Targets {
        Targets {
            targets: vec![array![0.], array![1.], array![2.]],
            refreshed: 0,
        }
    }

    #[test]
    fn sequential_wraps_around() {
        let mut provider = StochasticProvider::new(source());

        assert_eq!(provider.total_size(), 3);
        assert_eq!(provider.epoch(4).target, array![1.]);
        assert_eq!(provider.sample_index(5), 2);
    }

    #[test]
    fn shuffled_visits_every_sample_each_pass() {
        let mut provider = StochasticProvider::with_order(source(), SampleOrder::Shuffled { seed: 5 });
        let params = array![0.];

        for _ in 0..3 {
            let pass = (0..3)
                .map(|i| {
                    let idx = provider.sample_index(i);
                    provider.epoch_end(params.view());
                    idx
                })
                .sorted()
                .collect_vec();
            assert_eq!(pass, vec![0, 1, 2]);
        }
    }

    #[test]
    fn hooks_refresh_the_source() {
        let mut provider = BatchProvider::new(source());
        let params = array![0.];

        let batch = provider.epoch(0);
        provider.after_update(params.view());
        provider.after_update(params.view());

        assert_eq!(batch.len(), 3);
        assert_eq!(provider.source().refreshed, 2);
    }
}
