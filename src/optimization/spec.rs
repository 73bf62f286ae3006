use log::info;
use serde::{Deserialize, Serialize};

use super::{Adam, GradientDescent, GradientDescentWithMomentum, Optimizer, RmsProp};

/// The specification for the `Optimizer` trait.
///
/// Every field may be omitted, in which case it takes the default of its optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerSpec {
    GradientDescent {
        #[serde(default = "defaults::sgd_learning_rate")]
        learning_rate: f32,
    },
    GradientDescentWithMomentum {
        #[serde(default = "defaults::sgdm_learning_rate")]
        learning_rate: f32,
        #[serde(default = "defaults::momentum")]
        momentum: f32,
    },
    RmsProp {
        #[serde(default = "defaults::rms_prop_learning_rate")]
        learning_rate: f32,
        #[serde(default = "defaults::decay")]
        decay: f32,
        #[serde(default = "defaults::rms_prop_epsilon")]
        epsilon: f32,
    },
    Adam {
        #[serde(default = "defaults::adam_learning_rate")]
        learning_rate: f32,
        #[serde(default = "defaults::beta1")]
        beta1: f32,
        #[serde(default = "defaults::beta2")]
        beta2: f32,
        #[serde(default = "defaults::adam_epsilon")]
        epsilon: f32,
        #[serde(default)]
        t: u64,
    },
}

mod defaults {
    use super::*;

    pub fn sgd_learning_rate() -> f32 {
        GradientDescent::DEFAULT_LEARNING_RATE
    }

    pub fn sgdm_learning_rate() -> f32 {
        GradientDescentWithMomentum::DEFAULT_LEARNING_RATE
    }

    pub fn momentum() -> f32 {
        GradientDescentWithMomentum::DEFAULT_MOMENTUM
    }

    pub fn rms_prop_learning_rate() -> f32 {
        RmsProp::DEFAULT_LEARNING_RATE
    }

    pub fn decay() -> f32 {
        RmsProp::DEFAULT_DECAY
    }

    pub fn rms_prop_epsilon() -> f32 {
        RmsProp::DEFAULT_EPSILON
    }

    pub fn adam_learning_rate() -> f32 {
        Adam::DEFAULT_LEARNING_RATE
    }

    pub fn beta1() -> f32 {
        Adam::DEFAULT_BETA1
    }

    pub fn beta2() -> f32 {
        Adam::DEFAULT_BETA2
    }

    pub fn adam_epsilon() -> f32 {
        Adam::DEFAULT_EPSILON
    }
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self::Adam {
            learning_rate: Adam::DEFAULT_LEARNING_RATE,
            beta1: Adam::DEFAULT_BETA1,
            beta2: Adam::DEFAULT_BETA2,
            epsilon: Adam::DEFAULT_EPSILON,
            t: 0,
        }
    }
}

/// Builds `Optimizer`s given a specification.
pub struct OptimizerBuilder;

impl OptimizerBuilder {
    /// Creates a new `OptimizerBuilder`.
    ///
    /// # Returns
    /// A new `OptimizerBuilder` instance.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Optimizer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification of the optimizer.
    ///
    /// # Returns
    /// A boxed optimizer with no auxiliary state yet.
    pub fn build(&self, spec: OptimizerSpec) -> Box<dyn Optimizer> {
        info!("building optimizer from {spec:?}");

        match spec {
            OptimizerSpec::GradientDescent { learning_rate } => {
                Box::new(GradientDescent::new(learning_rate))
            }
            OptimizerSpec::GradientDescentWithMomentum {
                learning_rate,
                momentum,
            } => Box::new(GradientDescentWithMomentum::new(learning_rate, momentum)),
            OptimizerSpec::RmsProp {
                learning_rate,
                decay,
                epsilon,
            } => Box::new(RmsProp::new(learning_rate, decay, epsilon)),
            OptimizerSpec::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
                t,
            } => Box::new(Adam::new(learning_rate, beta1, beta2, epsilon).with_initial_step(t)),
        }
    }
}

impl Default for OptimizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
