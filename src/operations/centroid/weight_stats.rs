use std::fmt;

use crate::mesh::GroupWeights;

/// Counts of weighted and unweighted vertex groups on one object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightSummary {
    /// Number of groups.
    pub total: usize,
    /// Groups with at least one positive weight.
    pub with_weight: usize,
    /// Names of groups without any positive weight, in group order.
    pub empty: Vec<String>,
}

impl WeightSummary {
    /// Number of groups without any positive weight.
    #[must_use]
    pub fn zero_weight(&self) -> usize {
        self.empty.len()
    }
}

impl fmt::Display for WeightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {}, weighted {}, unweighted {}",
            self.total,
            self.with_weight,
            self.zero_weight()
        )
    }
}

/// Classifies an object's vertex groups by whether they carry weight.
pub struct WeightStats<'a> {
    groups: &'a GroupWeights,
}

impl<'a> WeightStats<'a> {
    #[must_use]
    pub fn new(groups: &'a GroupWeights) -> Self {
        Self { groups }
    }

    #[must_use]
    pub fn execute(&self) -> WeightSummary {
        let mut summary = WeightSummary {
            total: self.groups.len(),
            ..WeightSummary::default()
        };
        for (name, weights) in self.groups.iter() {
            if weights.has_positive_weight() {
                summary.with_weight += 1;
            } else {
                summary.empty.push(name.to_owned());
            }
        }
        summary
    }
}
