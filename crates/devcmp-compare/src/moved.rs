//! Cross-reference detection for entries at different positions

use devcmp_core::NamedObject;
use serde::Serialize;
use std::collections::BTreeSet;

/// A name that sits at `index_a` in list A and `index_b` in list B
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MovedPair {
    pub index_a: usize,
    pub index_b: usize,
}

/// Find names present in both lists at different indices
///
/// An entry counts as moved when the opposing list holds a different name at
/// the same index but carries the entry's name elsewhere. Both directions are
/// checked; the first match wins for duplicate names. After reconciliation and
/// sorting of uniquely named lists the result is empty.
pub fn find_moved(a: &[NamedObject], b: &[NamedObject]) -> BTreeSet<MovedPair> {
    let mut moved = BTreeSet::new();

    for (index_a, object) in a.iter().enumerate() {
        let Some(name) = object.name() else {
            continue;
        };
        if b.get(index_a).and_then(NamedObject::name) == Some(name) {
            continue;
        }
        if let Some(index_b) = position_of(b, name) {
            moved.insert(MovedPair { index_a, index_b });
        }
    }

    for (index_b, object) in b.iter().enumerate() {
        let Some(name) = object.name() else {
            continue;
        };
        if a.get(index_b).and_then(NamedObject::name) == Some(name) {
            continue;
        }
        if let Some(index_a) = position_of(a, name) {
            moved.insert(MovedPair { index_a, index_b });
        }
    }

    moved
}

fn position_of(list: &[NamedObject], name: &str) -> Option<usize> {
    list.iter().position(|object| object.name() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<NamedObject> {
        names.iter().map(|n| NamedObject::new(*n)).collect()
    }

    #[test]
    fn test_aligned_lists_have_no_moves() {
        let a = list(&["a", "b", "c"]);
        assert!(find_moved(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_swapped_entries() {
        let a = list(&["x", "y"]);
        let b = list(&["y", "x"]);
        let moved: Vec<MovedPair> = find_moved(&a, &b).into_iter().collect();
        assert_eq!(
            moved,
            vec![
                MovedPair {
                    index_a: 0,
                    index_b: 1
                },
                MovedPair {
                    index_a: 1,
                    index_b: 0
                },
            ]
        );
    }

    #[test]
    fn test_name_only_in_one_list_is_not_moved() {
        let a = list(&["a", "b"]);
        let b = list(&["a", "c"]);
        assert!(find_moved(&a, &b).is_empty());
    }

    #[test]
    fn test_duplicate_name_tie() {
        // Duplicate "dup" in A shifts "z" by one position relative to B.
        let a = list(&["dup", "dup", "z"]);
        let b = list(&["dup", "z", "dup"]);
        let moved = find_moved(&a, &b);
        assert!(moved.contains(&MovedPair {
            index_a: 2,
            index_b: 1
        }));
        assert!(moved.contains(&MovedPair {
            index_a: 1,
            index_b: 0
        }));
    }
}
