use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::{OptimErr, Result};

/// A dense n-dimensional buffer of `f32`s, the unit every optimizer works on.
pub type Tensor = ArrayD<f32>;

/// The learnable parameters of a layer, keyed by name.
pub type ParamSet = BTreeMap<String, Tensor>;

/// The gradients of a layer, keyed by the name of the parameter they belong to.
pub type GradSet = BTreeMap<String, Tensor>;

/// Checks that `params` and `grads` name exactly the same parameters.
///
/// # Returns
/// `MissingGradient` for the first parameter without a gradient, otherwise `UnknownParameter`
/// for the first gradient without a parameter.
pub(crate) fn check_names(params: &ParamSet, grads: &GradSet) -> Result<()> {
    if let Some(name) = params.keys().find(|name| !grads.contains_key(*name)) {
        return Err(OptimErr::MissingGradient { name: name.clone() });
    }

    if let Some(name) = grads.keys().find(|name| !params.contains_key(*name)) {
        return Err(OptimErr::UnknownParameter { name: name.clone() });
    }

    Ok(())
}

/// Fetches the gradient for `name` and checks it has the same shape as `param`.
///
/// # Arguments
/// * `name` - The parameter's name.
/// * `param` - The parameter itself.
/// * `grads` - The layer's gradients.
///
/// # Returns
/// The matching gradient, or an error if it's missing or has the wrong shape.
pub(crate) fn grad_for<'a>(name: &str, param: &Tensor, grads: &'a GradSet) -> Result<&'a Tensor> {
    let grad = grads.get(name).ok_or_else(|| OptimErr::MissingGradient {
        name: name.to_string(),
    })?;

    check_shape(name, "gradient", grad, param)?;
    Ok(grad)
}

/// Checks that `got` has the same shape as `expected`.
pub(crate) fn check_shape(
    name: &str,
    what: &'static str,
    got: &Tensor,
    expected: &Tensor,
) -> Result<()> {
    if got.shape() != expected.shape() {
        return Err(OptimErr::ShapeMismatch {
            name: name.to_string(),
            what,
            got: got.shape().to_vec(),
            expected: expected.shape().to_vec(),
        });
    }

    Ok(())
}
