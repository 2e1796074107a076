//! Comparison run results

use crate::diff::PairDiff;
use crate::moved::MovedPair;
use crate::reconcile::Insertion;
use devcmp_core::{ListSide, ObjectList};
use serde::Serialize;
use std::fmt;

/// Everything a finished comparison run produced
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// List A after reconciliation and sorting
    pub list_a: ObjectList,
    /// List B after reconciliation and sorting
    pub list_b: ObjectList,
    /// Placeholders in the order they were inserted
    pub insertions: Vec<Insertion>,
    pub differences: Vec<PairDiff>,
    pub moved: Vec<MovedPair>,
}

/// Counts for a one-line summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub entries: usize,
    pub missing_in_a: usize,
    pub missing_in_b: usize,
    pub differs: usize,
    pub moved: usize,
}

impl ComparisonSummary {
    pub fn missing(&self) -> usize {
        self.missing_in_a + self.missing_in_b
    }

    /// True when both lists held exactly the same objects
    pub fn is_identical(&self) -> bool {
        self.missing() == 0 && self.differs == 0 && self.moved == 0
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing, {} differs, {} moved",
            self.missing(),
            self.differs,
            self.moved
        )
    }
}

impl ComparisonReport {
    pub fn summary(&self) -> ComparisonSummary {
        let missing_in =
            |side: ListSide| self.insertions.iter().filter(|i| i.side == side).count();
        ComparisonSummary {
            entries: self.list_a.len(),
            missing_in_a: missing_in(ListSide::A),
            missing_in_b: missing_in(ListSide::B),
            differs: self.differences.len(),
            moved: self.moved.len(),
        }
    }

    /// Names inserted into `side` as placeholders
    pub fn missing_from(&self, side: ListSide) -> Vec<&str> {
        self.insertions
            .iter()
            .filter(|i| i.side == side)
            .map(|i| i.name.as_str())
            .collect()
    }

    /// Print a summary of the comparison
    pub fn print_summary(&self, label: &str) {
        let summary = self.summary();
        if summary.is_identical() {
            println!("✅ {} - identical ({} entries)", label, summary.entries);
            return;
        }

        println!("❌ {} - {} ({} entries)", label, summary, summary.entries);
        for insertion in &self.insertions {
            println!(
                "   [  MISSING] {} : absent from {}",
                insertion.name, insertion.side
            );
        }
        for diff in &self.differences {
            println!(
                "   [  DIFFERS] {} : {}",
                diff.name,
                diff.keys.join(", ")
            );
        }
        for pair in &self.moved {
            println!(
                "   [    MOVED] A#{} <-> B#{}",
                pair.index_a, pair.index_b
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcmp_core::NamedObject;

    #[test]
    fn test_summary_counts() {
        let report = ComparisonReport {
            list_a: vec![NamedObject::new("a"), NamedObject::new("b")],
            list_b: vec![NamedObject::new("a"), NamedObject::new("b")],
            insertions: vec![Insertion {
                side: ListSide::B,
                index: 1,
                name: "b".to_string(),
            }],
            differences: vec![PairDiff {
                index: 0,
                name: "a".to_string(),
                keys: vec!["colour".to_string()],
            }],
            moved: Vec::new(),
        };

        let summary = report.summary();
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.missing_in_b, 1);
        assert_eq!(summary.missing_in_a, 0);
        assert!(!summary.is_identical());
        assert_eq!(summary.to_string(), "1 missing, 1 differs, 0 moved");
        assert_eq!(report.missing_from(ListSide::B), vec!["b"]);
    }
}
