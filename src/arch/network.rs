use super::Layer;

/// Anything that can hand out its layers in the order an optimizer should update them.
pub trait Network {
    /// Returns the trainable layers, in update order.
    fn layers_mut(&mut self) -> Vec<&mut dyn Layer>;
}

/// The layout of a network.
///
/// A network declares its layout explicitly: either a flat list of layers (feed-forward models) or
/// three optional named stages (sequence models).
#[derive(Debug, Clone)]
pub enum Architecture<L> {
    /// A flat, ordered list of layers.
    Sequential { layers: Vec<L> },
    /// A sequence model made of up to three stages, updated as preprocess, rnn, postprocess.
    Staged {
        preprocess: Option<L>,
        rnn: Option<L>,
        postprocess: Option<L>,
    },
    /// A network exposing no trainable layers at all.
    Unstructured,
}

impl<L> Architecture<L> {
    /// Creates a new sequential `Architecture`.
    ///
    /// # Arguments
    /// * `layers` - The layers the network is composed of, in update order.
    pub fn sequential<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        Self::Sequential {
            layers: layers.into_iter().collect(),
        }
    }

    /// Creates a new staged `Architecture`, any stage may be absent.
    pub fn staged(preprocess: Option<L>, rnn: Option<L>, postprocess: Option<L>) -> Self {
        Self::Staged {
            preprocess,
            rnn,
            postprocess,
        }
    }
}

impl<L: Layer> Network for Architecture<L> {
    fn layers_mut(&mut self) -> Vec<&mut dyn Layer> {
        match self {
            Self::Sequential { layers } => layers
                .iter_mut()
                .map(|layer| layer as &mut dyn Layer)
                .collect(),
            Self::Staged {
                preprocess,
                rnn,
                postprocess,
            } => [preprocess, rnn, postprocess]
                .into_iter()
                .filter_map(|stage| stage.as_mut())
                .map(|layer| layer as &mut dyn Layer)
                .collect(),
            Self::Unstructured => Vec::new(),
        }
    }
}
