use approx::assert_abs_diff_eq;
use layer_optim::{
    OptimErr, Result, Tensor,
    arch::{Architecture, Layer, Network, ParamLayer},
    optimization::{Adam, GradientDescent, GradientDescentWithMomentum, Optimizer},
    tensor::{GradSet, ParamSet},
};
use ndarray::arr1;

fn scalar_layer(name: &str, w: f32, g: f32) -> ParamLayer {
    let mut layer = ParamLayer::new().with_param(name, arr1(&[w]).into_dyn());
    layer.set_grad(name, arr1(&[g]).into_dyn());
    layer
}

fn value(layer: &ParamLayer, name: &str) -> f32 {
    layer.param(name).unwrap()[0]
}

/// Records the order in which layers are handed to `update`.
struct Recorder {
    seen: Vec<String>,
}

impl Optimizer for Recorder {
    fn update(&mut self, layer: &mut dyn Layer) -> Result<()> {
        self.seen.extend(layer.params().keys().cloned());
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        0.
    }
}

#[test]
fn sequential_updates_layers_in_list_order() {
    let mut net = Architecture::sequential([scalar_layer("l1", 1., 1.), scalar_layer("l2", 1., 1.)]);
    let mut recorder = Recorder { seen: Vec::new() };

    recorder.step(&mut net).unwrap();

    assert_eq!(recorder.seen, ["l1", "l2"]);
}

#[test]
fn staged_updates_present_stages_in_fixed_order() {
    let mut net = Architecture::staged(
        Some(scalar_layer("pre", 1., 1.)),
        Some(scalar_layer("rnn", 1., 1.)),
        Some(scalar_layer("post", 1., 1.)),
    );
    let mut recorder = Recorder { seen: Vec::new() };
    recorder.step(&mut net).unwrap();
    assert_eq!(recorder.seen, ["pre", "rnn", "post"]);

    let mut net = Architecture::staged(None, Some(scalar_layer("rnn", 1., 1.)), None);
    let mut recorder = Recorder { seen: Vec::new() };
    recorder.step(&mut net).unwrap();
    assert_eq!(recorder.seen, ["rnn"]);
}

#[test]
fn unstructured_network_is_a_silent_no_op() {
    let mut net = Architecture::<ParamLayer>::Unstructured;
    let mut adam = Adam::default();

    adam.step(&mut net).unwrap();

    assert_eq!(adam.t(), 0);
}

#[test]
fn sgd_step_over_two_layers() {
    let mut net = Architecture::sequential([scalar_layer("a", 1., 2.), scalar_layer("b", 0., -1.)]);
    let mut sgd = GradientDescent::new(0.1);

    sgd.step(&mut net).unwrap();

    let Architecture::Sequential { layers } = &net else {
        panic!("layout changed");
    };
    assert_abs_diff_eq!(value(&layers[0], "a"), 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(value(&layers[1], "b"), 0.1, epsilon = 1e-6);
}

#[test]
fn momentum_scenario_over_two_steps() {
    let mut net = Architecture::sequential([scalar_layer("w", 1., 2.)]);
    let mut sgdm = GradientDescentWithMomentum::new(0.1, 0.9);

    sgdm.step(&mut net).unwrap();
    assert_abs_diff_eq!(sgdm.velocity("w").unwrap()[0], -0.2, epsilon = 1e-6);

    sgdm.step(&mut net).unwrap();
    assert_abs_diff_eq!(sgdm.velocity("w").unwrap()[0], -0.38, epsilon = 1e-6);

    let Architecture::Sequential { layers } = &net else {
        panic!("layout changed");
    };
    assert_abs_diff_eq!(value(&layers[0], "w"), 0.42, epsilon = 1e-6);
}

#[test]
fn adam_counter_moves_once_per_layer_not_per_step() {
    let layers = [
        scalar_layer("a", 1., 1.),
        scalar_layer("b", 1., 1.),
        scalar_layer("c", 1., 1.),
    ];
    let mut net = Architecture::sequential(layers);
    let mut adam = Adam::default();

    adam.step(&mut net).unwrap();
    assert_eq!(adam.t(), 3);
    adam.step(&mut net).unwrap();
    assert_eq!(adam.t(), 6);
}

#[test]
fn adam_later_layers_see_a_different_bias_correction() {
    // Same parameter, same gradient, updated by the same step: only `t` differs.
    let mut net = Architecture::sequential([scalar_layer("a", 1., 0.5), scalar_layer("b", 1., 0.5)]);
    let mut adam = Adam::default();

    adam.step(&mut net).unwrap();
    adam.step(&mut net).unwrap();

    let Architecture::Sequential { layers } = &net else {
        panic!("layout changed");
    };
    assert_ne!(value(&layers[0], "a"), value(&layers[1], "b"));
}

#[test]
fn missing_gradient_stops_the_step() {
    let mut broken = ParamLayer::new().with_param("w", arr1(&[1.]).into_dyn());
    broken.set_grad("other", arr1(&[1.]).into_dyn());

    let mut net = Architecture::sequential([broken, scalar_layer("v", 1., 1.)]);
    let mut sgd = GradientDescent::new(0.1);

    let err = sgd.step(&mut net).unwrap_err();
    assert_eq!(err, OptimErr::MissingGradient { name: "w".into() });

    let Architecture::Sequential { layers } = &net else {
        panic!("layout changed");
    };
    assert_eq!(value(&layers[1], "v"), 1.);
}

#[test]
fn misnamed_gradient_stops_the_step() {
    let mut misnamed = scalar_layer("w", 1., 1.);
    misnamed.set_grad("typo", arr1(&[1.]).into_dyn());

    let mut net = Architecture::sequential([scalar_layer("u", 1., 1.), misnamed]);
    let mut adam = Adam::default();

    let err = adam.step(&mut net).unwrap_err();
    assert_eq!(err, OptimErr::UnknownParameter { name: "typo".into() });

    let Architecture::Sequential { layers } = &net else {
        panic!("layout changed");
    };
    assert_ne!(value(&layers[0], "u"), 1.);
    assert_eq!(value(&layers[1], "w"), 1.);
    assert_eq!(adam.first_moment("w"), None);
}

#[test]
fn boxed_layers_and_optimizers_compose() {
    let layers: Vec<Box<dyn Layer>> = vec![
        Box::new(scalar_layer("a", 1., 1.)),
        Box::new(scalar_layer("b", 2., 1.)),
    ];
    let mut net = Architecture::sequential(layers);
    let mut optimizer: Box<dyn Optimizer> = Box::new(GradientDescent::new(1.));

    optimizer.step(&mut net).unwrap();

    let params: Vec<f32> = net
        .layers_mut()
        .into_iter()
        .flat_map(|layer| layer.params().values().map(|p| p[0]).collect::<Vec<_>>())
        .collect();
    assert_eq!(params, [0., 1.]);
}

/// A layer adapter over externally owned maps, the way a foreign layer would plug in.
struct Borrowed<'a> {
    params: &'a mut ParamSet,
    grads: &'a GradSet,
}

impl Layer for Borrowed<'_> {
    fn params(&self) -> &ParamSet {
        &*self.params
    }

    fn grads(&self) -> &GradSet {
        self.grads
    }

    fn params_and_grads(&mut self) -> (&mut ParamSet, &GradSet) {
        (&mut *self.params, self.grads)
    }
}

#[test]
fn custom_layer_adapters_are_updated_in_place() {
    let mut params = ParamSet::new();
    params.insert("w".into(), Tensor::from_elem(vec![2, 2], 1.));
    let mut grads = GradSet::new();
    grads.insert("w".into(), Tensor::from_elem(vec![2, 2], 4.));

    let mut layer = Borrowed {
        params: &mut params,
        grads: &grads,
    };
    GradientDescent::new(0.25).update(&mut layer).unwrap();

    assert_eq!(params["w"], Tensor::zeros(vec![2, 2]));
}
