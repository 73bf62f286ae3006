mod layer;
mod network;

pub use layer::{Layer, ParamLayer};
pub use network::{Architecture, Network};
