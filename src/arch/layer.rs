use crate::tensor::{GradSet, ParamSet, Tensor};

/// A unit of a network that owns named parameters and their gradients.
///
/// The gradients are refreshed by the backward pass before an optimizer runs; the optimizer only
/// reads them and mutates the parameters in place.
pub trait Layer {
    /// Returns the layer's parameters.
    fn params(&self) -> &ParamSet;

    /// Returns the layer's gradients.
    fn grads(&self) -> &GradSet;

    /// Borrows the parameters mutably alongside the gradients.
    ///
    /// # Returns
    /// A tuple containing the mutable parameters and the read-only gradients.
    fn params_and_grads(&mut self) -> (&mut ParamSet, &GradSet);
}

impl<T: Layer + ?Sized> Layer for Box<T> {
    fn params(&self) -> &ParamSet {
        (**self).params()
    }

    fn grads(&self) -> &GradSet {
        (**self).grads()
    }

    fn params_and_grads(&mut self) -> (&mut ParamSet, &GradSet) {
        (**self).params_and_grads()
    }
}

/// A plain layer holding its parameters and gradients in two maps.
#[derive(Debug, Clone, Default)]
pub struct ParamLayer {
    params: ParamSet,
    grads: GradSet,
}

impl ParamLayer {
    /// Creates a new empty `ParamLayer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter to the layer.
    ///
    /// # Arguments
    /// * `name` - The parameter's name, unique within this layer.
    /// * `value` - The parameter's initial value.
    ///
    /// # Returns
    /// The layer with the new parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: Tensor) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Sets the gradient of a parameter, replacing the previous one.
    pub fn set_grad(&mut self, name: impl Into<String>, grad: Tensor) {
        self.grads.insert(name.into(), grad);
    }

    /// Returns the parameter called `name`, if any.
    pub fn param(&self, name: &str) -> Option<&Tensor> {
        self.params.get(name)
    }

    /// Returns the current gradient of `name`, if any.
    pub fn grad(&self, name: &str) -> Option<&Tensor> {
        self.grads.get(name)
    }

    /// Fills every gradient with zeros, keeping their shapes.
    pub fn zero_grad(&mut self) {
        self.grads.values_mut().for_each(|g| g.fill(0.));
    }
}

impl Layer for ParamLayer {
    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn grads(&self) -> &GradSet {
        &self.grads
    }

    fn params_and_grads(&mut self) -> (&mut ParamSet, &GradSet) {
        (&mut self.params, &self.grads)
    }
}
