use log::trace;
use ndarray::Zip;

use super::{Optimizer, StateStore};
use crate::{
    arch::Layer,
    error::Result,
    tensor::{Tensor, check_names, check_shape, grad_for},
};

/// Gradient descent accumulating a decaying sum of past scaled gradients (the velocity).
#[derive(Debug, Clone)]
pub struct GradientDescentWithMomentum {
    learning_rate: f32,
    momentum: f32,
    velocity: StateStore,
}

impl GradientDescentWithMomentum {
    pub const DEFAULT_LEARNING_RATE: f32 = 1e-4;
    pub const DEFAULT_MOMENTUM: f32 = 0.0;

    /// Creates a new `GradientDescentWithMomentum` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - How much of the previous velocity survives each update.
    ///
    /// # Returns
    /// A new `GradientDescentWithMomentum` instance.
    pub fn new(learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: StateStore::new("velocity"),
        }
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    /// Returns the current velocity of a parameter, if it was ever updated.
    pub fn velocity(&self, name: &str) -> Option<&Tensor> {
        self.velocity.get(name)
    }
}

impl Default for GradientDescentWithMomentum {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEARNING_RATE, Self::DEFAULT_MOMENTUM)
    }
}

impl Optimizer for GradientDescentWithMomentum {
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        let lr = self.learning_rate;
        let mu = self.momentum;
        let (params, grads) = layer.params_and_grads();
        trace!("momentum descent over {} parameters", params.len());

        check_names(params, grads)?;

        for (name, param) in params.iter_mut() {
            let grad = grad_for(name, param, grads)?;
            let velocity = self.velocity.get_or_init(name, param.shape());
            check_shape(name, "velocity", velocity, param)?;

            Zip::from(param)
                .and(velocity)
                .and(grad)
                .for_each(|p, v, &g| {
                    *v = mu * *v - lr * g;
                    *p += *v;
                });
        }

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
