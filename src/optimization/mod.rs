mod adam;
mod gradient_descent;
mod gradient_descent_with_momentum;
mod optimizer;
mod rms_prop;
mod spec;
mod state;

pub use adam::Adam;
pub use gradient_descent::GradientDescent;
pub use gradient_descent_with_momentum::GradientDescentWithMomentum;
pub use optimizer::Optimizer;
pub use rms_prop::RmsProp;
pub use spec::{OptimizerBuilder, OptimizerSpec};
pub use state::StateStore;
