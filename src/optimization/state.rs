use std::collections::HashMap;

use log::debug;
use ndarray::IxDyn;

use crate::tensor::Tensor;

/// Per-parameter auxiliary state of an optimizer (velocity, cache, moment estimates).
///
/// Entries are created lazily the first time a parameter name is seen, zero-filled with the
/// parameter's shape, and live as long as the optimizer does. Names are the only key, so two
/// layers sharing a parameter name share its entry.
#[derive(Debug, Clone)]
pub struct StateStore {
    what: &'static str,
    entries: HashMap<String, Tensor>,
}

impl StateStore {
    /// Creates a new empty `StateStore`.
    ///
    /// # Arguments
    /// * `what` - What kind of state this store keeps, used when logging.
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            entries: HashMap::new(),
        }
    }

    /// Returns the entry for `name`, creating a zero tensor of `shape` if there's none yet.
    ///
    /// An existing entry is never reallocated nor reset, whatever `shape` is given.
    pub fn get_or_init(&mut self, name: &str, shape: &[usize]) -> &mut Tensor {
        let what = self.what;

        self.entries.entry(name.to_string()).or_insert_with(|| {
            debug!(what = what, name = name; "initializing auxiliary state with shape {shape:?}");
            Tensor::zeros(IxDyn(shape))
        })
    }

    /// Overwrites the entry for `name`.
    pub fn set(&mut self, name: &str, value: Tensor) {
        self.entries.insert(name.to_string(), value);
    }

    /// Returns the entry for `name` without creating it.
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.entries.get(name)
    }

    /// Returns the amount of parameters tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no parameter has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
