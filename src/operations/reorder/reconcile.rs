use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{info, warn};

use crate::mesh::{GroupWeights, VertexWeights};

/// How a group ended up in the rebuilt list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderStatus {
    /// Named in the desired order and present on the target; weights restored.
    Matched,
    /// Named in the desired order but absent from the target; created empty.
    NewlyCreatedEmpty,
    /// Present on the target but not in the desired order; appended at the end.
    ExtraRetained,
}

impl fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matched => "matched",
            Self::NewlyCreatedEmpty => "created empty",
            Self::ExtraRetained => "extra, retained",
        })
    }
}

/// One group of the rebuilt list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderEntry {
    pub name: String,
    pub status: ReorderStatus,
    /// Restored weights (empty for newly created groups).
    pub weights: VertexWeights,
}

/// Rebuild plan produced by [`ReconcileOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderResult {
    /// Groups in their final order.
    pub entries: Vec<ReorderEntry>,
    /// Number of groups the target had before the rebuild.
    pub original_count: usize,
    /// Number of distinct names in the desired order.
    pub desired_count: usize,
    /// Weight entries dropped because their vertex index was out of range.
    pub skipped: usize,
}

impl ReorderResult {
    /// Final group names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of groups with the given status.
    #[must_use]
    pub fn count(&self, status: ReorderStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Converts the plan into the rebuilt group list.
    #[must_use]
    pub fn into_group_weights(self) -> GroupWeights {
        self.entries.into_iter().map(|e| (e.name, e.weights)).collect()
    }
}

impl fmt::Display for ReorderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<5} {:<30} {:<16}", "#", "group", "status")?;
        writeln!(f, "{}", "-".repeat(53))?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{:<5} {:<30} {:<16}", i + 1, entry.name, entry.status.to_string())?;
        }
        writeln!(f, "{}", "-".repeat(53))?;
        writeln!(f, "desired groups: {}", self.desired_count)?;
        writeln!(f, "original groups: {}", self.original_count)?;
        writeln!(f, "matched: {}", self.count(ReorderStatus::Matched))?;
        writeln!(f, "created empty: {}", self.count(ReorderStatus::NewlyCreatedEmpty))?;
        writeln!(f, "extra retained: {}", self.count(ReorderStatus::ExtraRetained))?;
        write!(f, "final groups: {}", self.entries.len())
    }
}

/// Rebuilds a target's vertex-group list in a desired name order.
///
/// Every target group's weights are snapshotted by name. The rebuilt list
/// holds each desired name once, in that order, with its weights restored if
/// the target had the group and empty otherwise, followed by the target
/// groups the order did not mention, in their original relative order. No
/// weight data is lost.
///
/// With [`ReconcileOrder::with_vertex_count`], weight entries whose vertex
/// index is out of range are dropped one by one and counted in
/// [`ReorderResult::skipped`].
pub struct ReconcileOrder<'a, S> {
    target: &'a GroupWeights,
    desired: &'a [S],
    vertex_count: Option<usize>,
}

impl<'a, S: AsRef<str>> ReconcileOrder<'a, S> {
    /// Creates a new `ReconcileOrder` operation.
    #[must_use]
    pub fn new(target: &'a GroupWeights, desired: &'a [S]) -> Self {
        Self {
            target,
            desired,
            vertex_count: None,
        }
    }

    /// Restricts restored weights to vertices `0..count`.
    #[must_use]
    pub fn with_vertex_count(mut self, count: usize) -> Self {
        self.vertex_count = Some(count);
        self
    }

    /// Executes the reconciliation, returning the rebuild plan.
    #[must_use]
    pub fn execute(&self) -> ReorderResult {
        let mut snapshot: Vec<(&str, Option<VertexWeights>)> = self
            .target
            .iter()
            .map(|(name, weights)| (name, Some(weights.clone())))
            .collect();
        let index: HashMap<&str, usize> = snapshot
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (*name, i))
            .collect();

        let mut result = ReorderResult {
            entries: Vec::with_capacity(self.desired.len() + snapshot.len()),
            original_count: snapshot.len(),
            desired_count: 0,
            skipped: 0,
        };

        let mut seen = HashSet::new();
        for name in self.desired {
            let name: &str = name.as_ref();
            if !seen.insert(name) {
                continue;
            }
            let restored = index.get(name).and_then(|&i| snapshot[i].1.take());
            let entry = match restored {
                Some(weights) => ReorderEntry {
                    name: name.to_owned(),
                    status: ReorderStatus::Matched,
                    weights: self.restore(name, weights, &mut result.skipped),
                },
                None => ReorderEntry {
                    name: name.to_owned(),
                    status: ReorderStatus::NewlyCreatedEmpty,
                    weights: VertexWeights::new(),
                },
            };
            result.entries.push(entry);
        }
        result.desired_count = seen.len();

        for (name, weights) in &mut snapshot {
            if let Some(weights) = weights.take() {
                let weights = self.restore(name, weights, &mut result.skipped);
                result.entries.push(ReorderEntry {
                    name: (*name).to_owned(),
                    status: ReorderStatus::ExtraRetained,
                    weights,
                });
            }
        }

        info!(
            matched = result.count(ReorderStatus::Matched),
            created = result.count(ReorderStatus::NewlyCreatedEmpty),
            extra = result.count(ReorderStatus::ExtraRetained),
            skipped = result.skipped,
            "vertex group order reconciled"
        );
        result
    }

    fn restore(
        &self,
        name: &str,
        mut weights: VertexWeights,
        skipped: &mut usize,
    ) -> VertexWeights {
        let Some(count) = self.vertex_count else {
            return weights;
        };
        weights.retain(|vertex, _| {
            let keep = vertex < count;
            if !keep {
                warn!(group = name, vertex, count, "weight entry out of range, skipped");
                *skipped += 1;
            }
            keep
        });
        weights
    }
}
