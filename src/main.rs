use std::{env, fs};

use anyhow::Context;
use layer_optim::{
    arch::{Layer, Network, ParamLayer},
    optimization::{OptimizerBuilder, OptimizerSpec},
};
use log::info;
use ndarray::{Array1, arr1};
use rand::Rng;

const EPOCHS: usize = 500;
const SAMPLES: usize = 21;
const LOG_EVERY: usize = 100;

/// A one-dimensional linear model `y = w * x + b` fitted with mean squared error.
struct Regressor {
    layer: ParamLayer,
}

impl Regressor {
    fn new<R: Rng>(rng: &mut R) -> Self {
        let layer = ParamLayer::new()
            .with_param("w", arr1(&[rng.random::<f32>() - 0.5]).into_dyn())
            .with_param("b", arr1(&[0.]).into_dyn());

        Self { layer }
    }

    fn coefs(&self) -> (f32, f32) {
        let params = self.layer.params();
        (params["w"][0], params["b"][0])
    }

    fn forward(&self, xs: &Array1<f32>) -> Array1<f32> {
        let (w, b) = self.coefs();
        xs.mapv(|x| w * x + b)
    }

    /// Computes the gradients of the loss and leaves them in the layer.
    ///
    /// # Returns
    /// The loss before the update.
    fn backward(&mut self, xs: &Array1<f32>, ys: &Array1<f32>) -> f32 {
        let n = xs.len() as f32;
        let err = self.forward(xs) - ys;

        let loss = err.mapv(|e| e.powi(2)).sum() / n;
        let dw = 2. * (&err * xs).sum() / n;
        let db = 2. * err.sum() / n;

        self.layer.set_grad("w", arr1(&[dw]).into_dyn());
        self.layer.set_grad("b", arr1(&[db]).into_dyn());
        loss
    }
}

impl Network for Regressor {
    fn layers_mut(&mut self) -> Vec<&mut dyn Layer> {
        vec![&mut self.layer as &mut dyn Layer]
    }
}

fn read_spec() -> anyhow::Result<OptimizerSpec> {
    let Some(path) = env::args().nth(1) else {
        return Ok(OptimizerSpec::default());
    };

    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid optimizer spec in {path}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let spec = read_spec()?;
    let mut optimizer = OptimizerBuilder::new().build(spec);
    let mut model = Regressor::new(&mut rand::rng());

    let xs = Array1::linspace(-1., 1., SAMPLES);
    let ys = xs.mapv(|x| 2. * x + 1.);

    for epoch in 0..EPOCHS {
        let loss = model.backward(&xs, &ys);
        optimizer.step(&mut model)?;

        if epoch % LOG_EVERY == 0 {
            info!(epoch = epoch, loss = loss; "training");
        }
    }

    let (w, b) = model.coefs();
    let loss = (model.forward(&xs) - &ys)
        .mapv(|e| e.powi(2))
        .mean()
        .unwrap_or_default();
    info!("finished after {EPOCHS} epochs: w={w}, b={b}, loss={loss}");
    println!("w: {w}\nb: {b}\nloss: {loss}");

    Ok(())
}
