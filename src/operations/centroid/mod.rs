mod extract_centroids;
mod weight_stats;

pub use extract_centroids::{ExtractCentroids, GroupCentroid, GroupCentroids};
pub use weight_stats::{WeightStats, WeightSummary};
