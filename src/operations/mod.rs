pub mod apply;
pub mod centroid;
pub mod matching;
pub mod reorder;
pub mod transfer;

pub use transfer::{TransferGroupNames, TransferReport};
