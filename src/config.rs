use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{MlError, Result};
use crate::initialization::Initialization;

/// Configuration for the k-means engine
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assignment passes per restart
    pub max_iters: usize,

    /// Seed for centroid initialization, `None` draws one from the OS
    pub seed: Option<u64>,

    /// Starting centroid policy
    pub init: Initialization,

    /// Number of independent restarts, the lowest inertia wins.
    ///
    /// A single random start on well separated pairs can settle in a local
    /// minimum that splits both pairs, several restarts make that unlikely.
    pub n_init: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 300,
            seed: None,
            init: Initialization::Random,
            n_init: 10,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_init(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Checks the settings that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(MlError::InvalidClusterCount(self.k));
        }
        if self.n_init == 0 {
            return Err(MlError::InvalidConfig("n_init must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Whether the optimizer sees one sample or the whole dataset per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingMode {
    #[default]
    Stochastic,
    Batch,
}

/// Configuration for perceptron training
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptronConfig {
    pub learning_rate: f64,

    /// Number of optimizer epochs
    pub max_steps: usize,

    /// Seed for the initial weights, `None` draws one from the OS
    pub seed: Option<u64>,

    pub mode: TrainingMode,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            max_steps: 100,
            seed: None,
            mode: TrainingMode::Stochastic,
        }
    }
}

impl PerceptronConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: TrainingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MlError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
