mod reconcile;

pub use reconcile::{ReconcileOrder, ReorderEntry, ReorderResult, ReorderStatus};
