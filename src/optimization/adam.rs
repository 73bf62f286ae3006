use log::trace;
use ndarray::Zip;

use super::{Optimizer, StateStore};
use crate::{
    arch::Layer,
    error::Result,
    tensor::{Tensor, check_names, check_shape, grad_for},
};

/// Adam: adaptive moment estimation with bias correction.
///
/// The step counter `t` is bumped once per [`Optimizer::update`] call, that is, once per layer.
/// Within a single [`Optimizer::step`] the layers updated later see a larger `t` and hence a
/// slightly different bias correction than the earlier ones.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    first_moment: StateStore,
    second_moment: StateStore,
}

impl Adam {
    pub const DEFAULT_LEARNING_RATE: f32 = 1e-3;
    pub const DEFAULT_BETA1: f32 = 0.9;
    pub const DEFAULT_BETA2: f32 = 0.999;
    pub const DEFAULT_EPSILON: f32 = 1e-8;

    /// Creates a new `Adam` optimizer with its step counter at zero.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    ///
    /// # Returns
    /// A new `Adam` instance.
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            t: 0,
            first_moment: StateStore::new("mt"),
            second_moment: StateStore::new("vt"),
        }
    }

    /// Starts the step counter at `t` instead of zero.
    pub fn with_initial_step(mut self, t: u64) -> Self {
        self.t = t;
        self
    }

    /// Returns the amount of `update` calls plus the initial step, saturating at `u64::MAX`.
    pub fn t(&self) -> u64 {
        self.t
    }

    /// Returns the first moment estimate of `name`, if it was updated already.
    pub fn first_moment(&self, name: &str) -> Option<&Tensor> {
        self.first_moment.get(name)
    }

    /// Returns the second moment estimate of `name`, if it was updated already.
    pub fn second_moment(&self, name: &str) -> Option<&Tensor> {
        self.second_moment.get(name)
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_LEARNING_RATE,
            Self::DEFAULT_BETA1,
            Self::DEFAULT_BETA2,
            Self::DEFAULT_EPSILON,
        )
    }
}

impl Optimizer for Adam {
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        self.t = self.t.saturating_add(1);

        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epsilon: eps,
            t,
            ..
        } = *self;

        // Past `i32::MAX` the powers have long underflowed to zero.
        let exp = i32::try_from(t).unwrap_or(i32::MAX);
        let bc1 = 1. - b1.powi(exp);
        let bc2 = 1. - b2.powi(exp);

        let (params, grads) = layer.params_and_grads();
        trace!(t = t; "adam over {} parameters", params.len());

        check_names(params, grads)?;

        for (name, param) in params.iter_mut() {
            let grad = grad_for(name, param, grads)?;
            let m = self.first_moment.get_or_init(name, param.shape());
            check_shape(name, "first moment", m, param)?;
            let v = self.second_moment.get_or_init(name, param.shape());
            check_shape(name, "second moment", v, param)?;

            Zip::from(param)
                .and(m)
                .and(v)
                .and(grad)
                .for_each(|p, m, v, &g| {
                    *m = b1 * *m + (1. - b1) * g;
                    *v = b2 * *v + (1. - b2) * g.powi(2);
                    let m_hat = *m / bc1;
                    let v_hat = *v / bc2;
                    *p -= lr * m_hat / (v_hat + eps).sqrt();
                });
        }

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
