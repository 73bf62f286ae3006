use log::debug;

use crate::{
    arch::{Layer, Network},
    error::Result,
};

/// Defines the strategy for updating a layer's parameters based on its gradients.
///
/// The `Optimizer` trait is responsible for the mathematical transition of parameters from state `t`
/// to `t+1`, keeping whatever per-parameter state its algorithm needs between calls.
pub trait Optimizer {
    /// Updates every parameter of `layer` in place using its gradients.
    ///
    /// # Arguments
    /// * `layer` - The layer whose parameters are going to be modified.
    ///
    /// # Returns
    /// An error if a parameter has no gradient, a gradient has no parameter or shapes don't
    /// match. Parameters updated before a shape failure stay updated.
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()>;

    /// Returns the learning rate this optimizer was built with.
    fn learning_rate(&self) -> f32;

    /// Makes a step over the whole network, updating each of its layers once, in order.
    ///
    /// # Arguments
    /// * `net` - The network to optimize.
    ///
    /// # Returns
    /// The first error found while updating a layer, the remaining layers are left untouched.
    fn step(&mut self, net: &mut dyn Network) -> Result<()> {
        let layers = net.layers_mut();

        if layers.is_empty() {
            debug!("network exposes no layers, nothing to update");
            return Ok(());
        }

        for layer in layers {
            self.update(layer)?;
        }

        Ok(())
    }
}

impl<T: Optimizer + ?Sized> Optimizer for Box<T> {
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        (**self).update(layer)
    }

    fn learning_rate(&self) -> f32 {
        (**self).learning_rate()
    }

    fn step(&mut self, net: &mut dyn Network) -> Result<()> {
        (**self).step(net)
    }
}
