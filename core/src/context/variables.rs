use crate::values::Value;

/// Variable bindings of one scope.
///
/// Backed by a persistent map: deriving a scope with [`Variables::with`] shares
/// structure with its parent and never changes what the parent sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    map: im::HashMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// A new scope with `name` bound to `value`.
    pub fn with(&self, name: impl Into<String>, value: Value) -> Self {
        Self {
            map: self.map.update(name.into(), value),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.map.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
