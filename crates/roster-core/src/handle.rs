//! The presentation-side handle a registered item points back to.

use std::cmp::Ordering;

/// An opaque reference to the element that renders an item.
///
/// The [`ListManager`](crate::ListManager) never inspects a handle beyond
/// this trait. It uses handles for three things:
///
/// - identity, through [`PartialEq`], to find the item a widget is talking
///   about when it unregisters or relays a pointer event;
/// - visual ordering, through [`compare_order`](ItemHandle::compare_order),
///   so that navigation follows what the user sees rather than the order in
///   which rows happened to mount;
/// - side effects that only the presentation layer can realize:
///   [`commit`](ItemHandle::commit) and
///   [`scroll_into_view`](ItemHandle::scroll_into_view).
///
/// Handles are cloned when a deferred scroll captures them, so they should be
/// cheap to clone (an id, an `Rc`, an index into a shared tree).
pub trait ItemHandle: Clone + PartialEq {
    /// Compare the visual position of two handles.
    ///
    /// `Ordering::Less` means `self` is rendered before `other`.
    fn compare_order(&self, other: &Self) -> Ordering;

    /// Realize a "choose" on the element, as if the user clicked it.
    ///
    /// The widget usually answers by calling
    /// [`ListManager::select`](crate::ListManager::select) for this handle.
    fn commit(&self);

    /// Bring the element into view.
    fn scroll_into_view(&self);
}
