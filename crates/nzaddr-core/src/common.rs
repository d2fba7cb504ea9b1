// crates/nzaddr-core/src/common.rs

//! Count summaries shared by the loaders and the CLI.

use serde::{Deserialize, Serialize};

/// Row counts of a flattened hierarchy.
///
/// Returned by [`Hierarchy::stats`](crate::model::Hierarchy::stats); this is
/// the `(districts, suburbs)` pair printed at the end of a flatten run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    pub districts: usize,
    pub suburbs: usize,
}

/// How many suburbs carry a given spatial column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub total: u64,
    pub filled: u64,
}

impl Coverage {
    pub fn missing(&self) -> u64 {
        self.total.saturating_sub(self.filled)
    }

    /// Filled share in percent, `0.0` for an empty table.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.filled as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_of_empty_table_is_zero() {
        let c = Coverage { total: 0, filled: 0 };
        assert_eq!(c.percent(), 0.0);
        assert_eq!(c.missing(), 0);
    }

    #[test]
    fn coverage_percent_and_missing() {
        let c = Coverage {
            total: 8,
            filled: 6,
        };
        assert_eq!(c.percent(), 75.0);
        assert_eq!(c.missing(), 2);
    }
}
