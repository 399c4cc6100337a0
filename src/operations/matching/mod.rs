mod face_count;
mod match_groups;
mod similarity_matrix;

pub use face_count::{slot_face_counts, MatchByFaceCount, SlotMatch};
pub use match_groups::{GroupMatch, MatchGroups, MatchParams, MatchResult};
pub use similarity_matrix::SimilarityMatrix;

/// Default minimum similarity for two groups to be considered the same.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.94;
