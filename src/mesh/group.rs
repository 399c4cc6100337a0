use super::weights::VertexWeights;

slotmap::new_key_type! {
    /// Unique identifier for a vertex group in a [`super::SkinnedMesh`].
    pub struct GroupId;
}

/// Data associated with a vertex group.
///
/// The name is only changed through [`super::SkinnedMesh::rename_group`],
/// which keeps names unique within the mesh.
#[derive(Debug, Clone)]
pub struct GroupData {
    name: String,
    weights: VertexWeights,
}

impl GroupData {
    pub(super) fn new(name: String) -> Self {
        Self {
            name,
            weights: VertexWeights::new(),
        }
    }

    /// The group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's per-vertex weights.
    #[must_use]
    pub fn weights(&self) -> &VertexWeights {
        &self.weights
    }

    pub(super) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(super) fn weights_mut(&mut self) -> &mut VertexWeights {
        &mut self.weights
    }
}
