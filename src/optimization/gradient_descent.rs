use log::trace;

use super::Optimizer;
use crate::{
    arch::Layer,
    error::Result,
    tensor::{check_names, grad_for},
};

/// Plain stochastic gradient descent, it keeps no state between calls.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    pub const DEFAULT_LEARNING_RATE: f32 = 1e-4;

    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEARNING_RATE)
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        let lr = self.learning_rate;
        let (params, grads) = layer.params_and_grads();
        trace!("gradient descent over {} parameters", params.len());

        check_names(params, grads)?;

        for (name, param) in params.iter_mut() {
            let grad = grad_for(name, param, grads)?;
            param.scaled_add(-lr, grad);
        }

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
