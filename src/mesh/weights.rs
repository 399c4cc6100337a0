use std::collections::BTreeMap;

/// Sparse per-vertex weights of one vertex group.
///
/// Keyed by vertex index; iteration is in ascending index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexWeights(BTreeMap<usize, f64>);

impl VertexWeights {
    /// Creates an empty weight mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of `vertex`, replacing any previous value.
    pub fn insert(&mut self, vertex: usize, weight: f64) -> Option<f64> {
        self.0.insert(vertex, weight)
    }

    /// Returns the weight stored for `vertex`.
    #[must_use]
    pub fn get(&self, vertex: usize) -> Option<f64> {
        self.0.get(&vertex).copied()
    }

    /// Iterates `(vertex, weight)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(&v, &w)| (v, w))
    }

    /// Number of stored entries, including zero weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if at least one vertex carries a positive weight.
    #[must_use]
    pub fn has_positive_weight(&self) -> bool {
        self.0.values().any(|&w| w > 0.0)
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize, f64) -> bool) {
        self.0.retain(|&v, &mut w| keep(v, w));
    }
}

impl FromIterator<(usize, f64)> for VertexWeights {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered collection of named vertex groups with their weights.
///
/// This is the flat value form of an object's vertex-group list: names are
/// unique and the insertion order is the group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupWeights {
    entries: Vec<(String, VertexWeights)>,
}

impl GroupWeights {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group, or replaces the weights of an existing group of the
    /// same name without changing its position.
    pub fn insert(&mut self, name: impl Into<String>, weights: VertexWeights) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = weights;
        } else {
            self.entries.push((name, weights));
        }
    }

    /// Returns the weights of the group called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VertexWeights> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| w)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Group names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates `(name, weights)` in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VertexWeights)> + '_ {
        self.entries.iter().map(|(n, w)| (n.as_str(), w))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, VertexWeights)> for GroupWeights {
    fn from_iter<I: IntoIterator<Item = (S, VertexWeights)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (name, weights) in iter {
            groups.insert(name, weights);
        }
        groups
    }
}

impl IntoIterator for GroupWeights {
    type Item = (String, VertexWeights);
    type IntoIter = std::vec::IntoIter<(String, VertexWeights)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut groups = GroupWeights::new();
        groups.insert("a", VertexWeights::from_iter([(0, 1.0)]));
        groups.insert("b", VertexWeights::new());
        groups.insert("a", VertexWeights::from_iter([(3, 0.25)]));

        assert_eq!(groups.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(groups.get("a").and_then(|w| w.get(3)), Some(0.25));
        assert_eq!(groups.get("a").map(VertexWeights::len), Some(1));
    }

    #[test]
    fn positive_weight_detection() {
        let zero = VertexWeights::from_iter([(0, 0.0), (1, 0.0)]);
        assert!(!zero.has_positive_weight());
        assert!(!VertexWeights::new().has_positive_weight());
        assert!(VertexWeights::from_iter([(0, 0.0), (4, 0.1)]).has_positive_weight());
    }
}
