//! Iterative gradient descent driven by pluggable epoch providers.
//!
//! An [`Optimizer`] owns the parameter vector for the whole run. Every epoch it
//! asks its [`EpochProvider`] for a [`Function`], evaluates the gradient at the
//! current parameters, lets an [`Updater`] produce the next parameters and then
//! hands those back to the provider through its hooks.

mod function;
mod optimizer;
mod provider;
mod updater;

pub use function::{Batch, Function};
pub use optimizer::Optimizer;
pub use provider::{BatchProvider, EpochProvider, SampleOrder, SampleSource, StochasticProvider};
pub use updater::{BaseUpdater, MomentumUpdater, Updater};
