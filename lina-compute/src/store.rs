use crate::tensor::Tensor;
use levenshtein::levenshtein;
use log::debug;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The variables defined in a session, keyed by their case-sensitive names.
///
/// Saving a variable that already exists replaces it. Variables are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarStore {
    vars: HashMap<String, Tensor>,
}

impl VarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a variable, replacing any previous value with the same name.
    pub fn save(&mut self, name: impl Into<String>, tensor: Tensor) {
        let name = name.into();
        debug!("saving `{}` as a {} x {} {}", name, tensor.rows(), tensor.cols(), tensor.shape());
        self.vars.insert(name, tensor);
    }

    /// Returns the variable with the given name.
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.vars.get(name)
    }

    /// Returns true if a variable with the given name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns every variable in the store.
    pub fn all(&self) -> &HashMap<String, Tensor> {
        &self.vars
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Returns all variables with a name similar to the given name, in alphabetical order.
    pub fn similar(&self, name: &str) -> Vec<&str> {
        let mut names = self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}
