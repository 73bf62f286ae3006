use log::trace;
use ndarray::Zip;

use super::{Optimizer, StateStore};
use crate::{
    arch::Layer,
    error::Result,
    tensor::{Tensor, check_names, check_shape, grad_for},
};

/// RMSProp: scales each step by a running estimate of the gradient's magnitude.
#[derive(Debug, Clone)]
pub struct RmsProp {
    learning_rate: f32,
    decay: f32,
    epsilon: f32,
    cache: StateStore,
}

impl RmsProp {
    pub const DEFAULT_LEARNING_RATE: f32 = 1e-2;
    pub const DEFAULT_DECAY: f32 = 0.99;
    pub const DEFAULT_EPSILON: f32 = 1e-8;

    /// Creates a new `RmsProp` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `decay` - How much of the previous squared gradient average survives each update.
    /// * `epsilon` - Added to the cache before taking its square root so it's never zero.
    ///
    /// # Returns
    /// A new `RmsProp` instance.
    pub fn new(learning_rate: f32, decay: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            decay,
            epsilon,
            cache: StateStore::new("cache"),
        }
    }

    /// Returns the decaying average of the squared gradients of a parameter.
    pub fn cache(&self, name: &str) -> Option<&Tensor> {
        self.cache.get(name)
    }
}

impl Default for RmsProp {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_LEARNING_RATE,
            Self::DEFAULT_DECAY,
            Self::DEFAULT_EPSILON,
        )
    }
}

impl Optimizer for RmsProp {
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        let Self {
            learning_rate: lr,
            decay,
            epsilon: eps,
            ..
        } = *self;

        let (params, grads) = layer.params_and_grads();
        trace!("rmsprop over {} parameters", params.len());

        check_names(params, grads)?;

        for (name, param) in params.iter_mut() {
            let grad = grad_for(name, param, grads)?;
            let cache = self.cache.get_or_init(name, param.shape());
            check_shape(name, "cache", cache, param)?;

            Zip::from(param).and(cache).and(grad).for_each(|p, c, &g| {
                *c = decay * *c + (1. - decay) * g.powi(2);
                *p -= lr * g / (*c + eps).sqrt();
            });
        }

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
