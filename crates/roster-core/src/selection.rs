//! The toggle rule that turns "choose this item" into the next selected set.

use crate::config::SelectionMode;

/// Compute the selected-key set that results from choosing `key`.
///
/// `selected` is the current set, `is_selected` whether `key`'s item is
/// currently selected. The rule:
///
/// - a selected item is removed, unless it is the only selection and
///   `allow_empty` is false;
/// - otherwise `Single` replaces the selection with `key`, and `Multiple`
///   adds `key` if it is not already there.
///
/// `SelectionMode::None` never changes the set.
///
/// ```
/// use roster_core::selection::toggle;
/// use roster_core::SelectionMode;
///
/// let current = vec!["a".to_string()];
/// // The last selection stays put when the list may not be empty.
/// assert_eq!(toggle(SelectionMode::Single, false, &current, "a", true), current);
/// assert!(toggle(SelectionMode::Single, true, &current, "a", true).is_empty());
/// ```
pub fn toggle(
    mode: SelectionMode,
    allow_empty: bool,
    selected: &[String],
    key: &str,
    is_selected: bool,
) -> Vec<String> {
    if mode == SelectionMode::None {
        return selected.to_vec();
    }

    if is_selected && (allow_empty || selected.len() > 1) {
        return selected.iter().filter(|k| *k != key).cloned().collect();
    }

    match mode {
        SelectionMode::Single => vec![key.to_string()],
        SelectionMode::Multiple if !is_selected => {
            let mut next = selected.to_vec();
            next.push(key.to_string());
            next
        }
        _ => selected.to_vec(),
    }
}
