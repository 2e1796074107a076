//! Alignment sort

use devcmp_core::{locale_cmp, NamedObject};

/// Sort a list by name in console order
///
/// The sort is stable, so entries with equal names keep their relative order
/// and sorting an already sorted list leaves it unchanged. Must only run after
/// reconciliation: reconciliation inserts by index and relies on the original
/// order.
pub fn sort_by_name(list: &mut [NamedObject]) {
    list.sort_by(|x, y| {
        locale_cmp(
            x.name().unwrap_or_default(),
            y.name().unwrap_or_default(),
        )
    });
}

/// Whether `list` is already in [`sort_by_name`] order
pub fn is_sorted_by_name(list: &[NamedObject]) -> bool {
    list.windows(2).all(|pair| {
        locale_cmp(
            pair[0].name().unwrap_or_default(),
            pair[1].name().unwrap_or_default(),
        )
        .is_le()
    })
}
