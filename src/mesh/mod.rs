pub mod group;
pub mod weights;

pub use group::{GroupData, GroupId};
pub use weights::{GroupWeights, VertexWeights};

use crate::error::GroupError;
use crate::math::{transform, Matrix4, Point3};
use slotmap::SlotMap;

/// A mesh object with an ordered list of named vertex groups.
///
/// Groups live in an arena and are referenced by typed IDs; `order` holds the
/// group list as the owning object presents it. Group names are unique at
/// every instant.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    positions: Vec<Point3>,
    world: Matrix4,
    groups: SlotMap<GroupId, GroupData>,
    order: Vec<GroupId>,
}

impl SkinnedMesh {
    /// Creates a mesh from local vertex positions with an identity world
    /// transform and no vertex groups.
    #[must_use]
    pub fn new(positions: Vec<Point3>) -> Self {
        Self {
            positions,
            world: Matrix4::identity(),
            groups: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Sets the object-to-world transform.
    #[must_use]
    pub fn with_world(mut self, world: Matrix4) -> Self {
        self.world = world;
        self
    }

    // --- Vertex data ---

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex positions in object space.
    #[must_use]
    pub fn local_positions(&self) -> &[Point3] {
        &self.positions
    }

    #[must_use]
    pub fn world(&self) -> &Matrix4 {
        &self.world
    }

    /// Vertex positions transformed into world space.
    #[must_use]
    pub fn world_positions(&self) -> Vec<Point3> {
        transform::to_world(&self.positions, &self.world)
    }

    // --- Group operations ---

    /// Appends an empty group named `name` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::DuplicateName`] if the name is already taken.
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<GroupId, GroupError> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(GroupError::DuplicateName(name));
        }
        let id = self.groups.insert(GroupData::new(name));
        self.order.push(id);
        Ok(id)
    }

    /// Returns a reference to the group data.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is not in the mesh.
    pub fn group(&self, id: GroupId) -> Result<&GroupData, GroupError> {
        self.groups
            .get(id)
            .ok_or_else(|| GroupError::NotFound(format!("{id:?}")))
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<GroupId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.groups.get(id).is_some_and(|g| g.name() == name))
    }

    /// Returns the group called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no group has that name.
    pub fn group_by_name(&self, name: &str) -> Result<&GroupData, GroupError> {
        self.find(name)
            .and_then(|id| self.groups.get(id))
            .ok_or_else(|| GroupError::NotFound(name.to_owned()))
    }

    /// Group IDs in list order.
    #[must_use]
    pub fn group_ids(&self) -> &[GroupId] {
        &self.order
    }

    /// Group names in list order.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.ordered().map(|g| g.name().to_owned()).collect()
    }

    /// Iterates the groups in list order.
    pub fn ordered(&self) -> impl Iterator<Item = &GroupData> + '_ {
        self.order.iter().filter_map(|&id| self.groups.get(id))
    }

    /// Snapshot of every group's name and weights, in list order.
    #[must_use]
    pub fn group_weights(&self) -> GroupWeights {
        self.ordered()
            .map(|g| (g.name().to_owned(), g.weights().clone()))
            .collect()
    }

    /// Renames a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is missing or another group already
    /// holds `name`.
    pub fn rename_group(&mut self, id: GroupId, name: impl Into<String>) -> Result<(), GroupError> {
        let name = name.into();
        if self.find(&name).is_some_and(|other| other != id) {
            return Err(GroupError::DuplicateName(name));
        }
        self.groups
            .get_mut(id)
            .ok_or_else(|| GroupError::NotFound(format!("{id:?}")))?
            .set_name(name);
        Ok(())
    }

    /// Sets the weight of `vertex` in a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is missing or `vertex` is not a vertex
    /// of this mesh.
    pub fn assign(&mut self, id: GroupId, vertex: usize, weight: f64) -> Result<(), GroupError> {
        let count = self.positions.len();
        if vertex >= count {
            return Err(GroupError::VertexOutOfRange { vertex, count });
        }
        self.groups
            .get_mut(id)
            .ok_or_else(|| GroupError::NotFound(format!("{id:?}")))?
            .weights_mut()
            .insert(vertex, weight);
        Ok(())
    }

    /// Removes a group and returns its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is not in the mesh.
    pub fn remove_group(&mut self, id: GroupId) -> Result<GroupData, GroupError> {
        let data = self
            .groups
            .remove(id)
            .ok_or_else(|| GroupError::NotFound(format!("{id:?}")))?;
        self.order.retain(|&other| other != id);
        Ok(data)
    }

    /// Removes every group.
    pub fn clear_groups(&mut self) {
        self.groups.clear();
        self.order.clear();
    }
}
