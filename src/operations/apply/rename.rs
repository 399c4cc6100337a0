use std::collections::HashSet;

use tracing::{info, warn};

use super::suffixed_name;
use crate::error::{GroupError, Result};
use crate::mesh::{GroupId, SkinnedMesh};
use crate::operations::matching::MatchResult;

/// Renames a mesh's vertex groups according to a [`MatchResult`].
///
/// Matched groups are first moved to temporary numeric names and only then
/// given their final names, so swaps and chains (`a → b`, `b → a`) never
/// collide. A final name still held by a group outside the plan is freed by
/// moving that group to the first unused `name.NNN`.
///
/// Each source name may appear at most once in the plan, as
/// [`crate::operations::matching::MatchGroups`] guarantees.
pub struct ApplyRenamePlan<'a> {
    plan: &'a MatchResult,
}

impl<'a> ApplyRenamePlan<'a> {
    #[must_use]
    pub fn new(plan: &'a MatchResult) -> Self {
        Self { plan }
    }

    /// Executes the renames on `mesh`, returning how many groups were renamed.
    ///
    /// # Errors
    ///
    /// Returns an error if a planned target group is not in the mesh. The
    /// mesh is left unchanged in that case.
    pub fn execute(&self, mesh: &mut SkinnedMesh) -> Result<usize> {
        let mut renames: Vec<(GroupId, &str)> = Vec::new();
        for (target, source) in self.plan.rename_plan() {
            let id = mesh
                .find(target)
                .ok_or_else(|| GroupError::NotFound(target.to_owned()))?;
            renames.push((id, source));
        }
        let finals: HashSet<&str> = renames.iter().map(|(_, name)| *name).collect();
        debug_assert!(
            finals.len() == renames.len(),
            "rename plan uses a source name more than once"
        );

        let mut reserved: HashSet<String> = mesh.group_names().into_iter().collect();
        reserved.extend(renames.iter().map(|(_, name)| (*name).to_owned()));

        for (i, (id, _)) in renames.iter().enumerate() {
            let base = i.to_string();
            let temp = if reserved.contains(&base) {
                suffixed_name(&base, |n| reserved.contains(n))
            } else {
                base
            };
            mesh.rename_group(*id, temp.clone())?;
            reserved.insert(temp);
        }

        for &(id, name) in &renames {
            if let Some(holder) = mesh.find(name) {
                let aside = suffixed_name(name, |n| finals.contains(n) || mesh.find(n).is_some());
                warn!(
                    group = name,
                    moved_to = %aside,
                    "name already taken, existing group renamed"
                );
                mesh.rename_group(holder, aside)?;
            }
            mesh.rename_group(id, name)?;
        }

        info!(renamed = renames.len(), "rename plan applied");
        Ok(renames.len())
    }
}
