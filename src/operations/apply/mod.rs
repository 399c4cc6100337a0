mod prune;
mod rename;
mod reorder_groups;

pub use prune::RemoveEmptyGroups;
pub use rename::ApplyRenamePlan;
pub use reorder_groups::ReorderGroups;

/// Returns the first `base.NNN` (starting at `.001`) for which `taken` is
/// false.
fn suffixed_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    (1..)
        .map(|n| format!("{base}.{n:03}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_owned())
}
