//! List reconciliation
//!
//! Makes two lists carry the same set of names by copying each entry missing
//! from one list into the other, at the index where it was found missing.

use devcmp_core::{validate_names, ListSide, NamedObject, ObjectList, ObjectResult};
use serde::Serialize;
use tracing::trace;

/// A placeholder copied into one list because the other list had it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    /// List that received the copy
    pub side: ListSide,
    /// Index the copy was inserted at, at the time of insertion
    pub index: usize,
    pub name: String,
}

/// Reconcile two lists and return the insertions in the order they happened
pub fn reconcile(a: &mut ObjectList, b: &mut ObjectList) -> ObjectResult<Vec<Insertion>> {
    let mut inserted = Vec::new();
    reconcile_with(a, b, |insertion| inserted.push(insertion.clone()))?;
    Ok(inserted)
}

/// Reconcile two lists, calling `on_insert` synchronously for every placeholder
///
/// Both lists are validated before anything is touched: an entry without a
/// name fails the whole call and leaves both lists unchanged.
///
/// Walks index `i` over the longer list. At each step a trailing gap is
/// padded from the other list, then `a[i]` is looked up anywhere in `b` and
/// spliced in at `i` when absent, then the same for `b[i]` in `a`. Afterwards
/// both lists have the same length and every name of one occurs in the other.
/// Name matching is case-sensitive and stops at the first match, so duplicate
/// names are tolerated but only their first occurrence counts.
///
/// Returns the number of insertions.
pub fn reconcile_with<F>(
    a: &mut ObjectList,
    b: &mut ObjectList,
    mut on_insert: F,
) -> ObjectResult<usize>
where
    F: FnMut(&Insertion),
{
    validate_names(a, ListSide::A)?;
    validate_names(b, ListSide::B)?;

    let mut count = 0;
    let mut i = 0;

    while i < a.len().max(b.len()) {
        if i >= a.len() {
            let copy = b[i].clone();
            insert_at(a, ListSide::A, i, copy, &mut on_insert);
            count += 1;
        } else if i >= b.len() {
            let copy = a[i].clone();
            insert_at(b, ListSide::B, i, copy, &mut on_insert);
            count += 1;
        }

        if !contains_name(b, name_of(&a[i])) {
            let copy = a[i].clone();
            insert_at(b, ListSide::B, i, copy, &mut on_insert);
            count += 1;
        }

        if !contains_name(a, name_of(&b[i])) {
            let copy = b[i].clone();
            insert_at(a, ListSide::A, i, copy, &mut on_insert);
            count += 1;
        }

        i += 1;
    }

    Ok(count)
}

fn insert_at<F>(
    list: &mut ObjectList,
    side: ListSide,
    index: usize,
    object: NamedObject,
    on_insert: &mut F,
) where
    F: FnMut(&Insertion),
{
    let insertion = Insertion {
        side,
        index,
        name: name_of(&object).to_string(),
    };
    trace!(side = %side, index, name = %insertion.name, "Inserting missing entry");
    list.insert(index, object);
    on_insert(&insertion);
}

// Names are validated on entry, and copies keep their name.
fn name_of(object: &NamedObject) -> &str {
    object.name().unwrap_or_default()
}

fn contains_name(list: &[NamedObject], name: &str) -> bool {
    list.iter().any(|object| object.name() == Some(name))
}
