//! src/algorithm/args.rs
//! Per-algorithm configuration surface and collected raw values

use std::collections::BTreeMap;

/// One configuration field an algorithm wants exposed.
///
/// `id` is namespaced as `"<algorithm>.<field>"` and doubles as the long flag
/// name on the command line (`--fernet.key`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub id: String,
    pub help: String,
    pub repeatable: bool,
    pub group: String,
}

impl ArgSpec {
    #[must_use]
    pub fn new(namespace: &str, field: &str, help: impl Into<String>) -> Self {
        Self {
            id: format!("{namespace}.{field}"),
            help: help.into(),
            repeatable: false,
            group: namespace.to_string(),
        }
    }

    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}

/// Declarative collection of [`ArgSpec`]s filled by
/// [`Algorithm::register_args`](crate::Algorithm::register_args).
#[derive(Debug, Clone, Default)]
pub struct ArgSurface {
    specs: Vec<ArgSpec>,
}

impl ArgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: ArgSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    #[must_use]
    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }
}

/// Values supplied for declared arguments, keyed by [`ArgSpec::id`].
///
/// Values keep the order they were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    values: BTreeMap<String, Vec<String>>,
}

impl RawArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(id.into()).or_default().push(value.into());
        self
    }

    /// All values for `id`; empty if the argument was never supplied.
    #[must_use]
    pub fn get_all(&self, id: &str) -> &[String] {
        self.values.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }
}

impl<K, V> FromIterator<(K, V)> for RawArgs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = RawArgs::new();
        for (id, value) in iter {
            args.push(id, value);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_ids_are_namespaced() {
        let spec = ArgSpec::new("fernet", "key", "help").repeatable();
        assert_eq!(spec.id, "fernet.key");
        assert_eq!(spec.group, "fernet");
        assert!(spec.repeatable);
    }

    #[test]
    fn raw_args_preserve_order() {
        let args: RawArgs = [("fernet.key", "b"), ("fernet.key", "a")].into_iter().collect();
        assert_eq!(args.get_all("fernet.key"), ["b", "a"]);
        assert!(args.get_all("fernet.other").is_empty());
        assert!(!args.contains("fernet.other"));
    }
}
