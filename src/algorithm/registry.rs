//! src/algorithm/registry.rs
//! Name -> algorithm lookup

use crate::algorithm::{Algorithm, ArgSurface, Fernet};
use std::collections::BTreeMap;

/// Registry of available algorithms, keyed by name.
///
/// Names are kept sorted so listings are stable.
#[derive(Default)]
pub struct Registry {
    algorithms: BTreeMap<String, Box<dyn Algorithm>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every algorithm shipped with this crate.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("fernet", Fernet);
        registry
    }

    /// Register `algorithm` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, algorithm: impl Algorithm + 'static) {
        self.algorithms.insert(name.into(), Box::new(algorithm));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Algorithm> {
        self.algorithms.get(name).map(|algorithm| &**algorithm)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.keys().map(String::as_str)
    }

    /// Collect the configuration surface of every registered algorithm.
    #[must_use]
    pub fn surface(&self) -> ArgSurface {
        let mut surface = ArgSurface::new();
        for (name, algorithm) in &self.algorithms {
            algorithm.register_args(name, &mut surface);
        }
        surface
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
