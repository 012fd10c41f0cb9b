//! Observer hooks fired by the manager on every observable state change.

use std::fmt;

use crate::item::Item;

/// Whether an `on_items_change` notification follows a registration or an
/// unregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsChange {
    Add,
    Remove,
}

type ActionHook = Box<dyn FnMut(&str)>;
type SelectionHook = Box<dyn FnMut(&[String])>;
type ItemsHook<H> = Box<dyn FnMut(&[Item<H>], ItemsChange)>;
type ActiveHook = Box<dyn FnMut(Option<&str>)>;

/// Notification hooks for a [`ListManager`](crate::ListManager).
///
/// Every hook is optional; an unset hook means the notification is not sent.
/// Hooks run synchronously inside the manager call that caused them and
/// cannot call back into the manager. Widgets typically push into an outbox
/// and act on it once the call returns.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use roster_core::Callbacks;
/// use roster_core::testing::TestHandle;
///
/// let actions = Rc::new(RefCell::new(Vec::new()));
/// let sink = actions.clone();
/// let callbacks: Callbacks<TestHandle> =
///     Callbacks::new().on_action(move |key| sink.borrow_mut().push(key.to_string()));
/// # drop(callbacks);
/// ```
pub struct Callbacks<H> {
    pub(crate) action: Option<ActionHook>,
    pub(crate) selection_change: Option<SelectionHook>,
    pub(crate) items_change: Option<ItemsHook<H>>,
    pub(crate) active_item_change: Option<ActiveHook>,
}

impl<H> Default for Callbacks<H> {
    fn default() -> Self {
        Self {
            action: None,
            selection_change: None,
            items_change: None,
            active_item_change: None,
        }
    }
}

impl<H> fmt::Debug for Callbacks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("action", &self.action.is_some())
            .field("selection_change", &self.selection_change.is_some())
            .field("items_change", &self.items_change.is_some())
            .field("active_item_change", &self.active_item_change.is_some())
            .finish()
    }
}

impl<H> Callbacks<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the item's key whenever an item is chosen, in every
    /// selection mode.
    pub fn on_action(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.action = Some(Box::new(f));
        self
    }

    /// Called with the proposed next set of selected keys.
    pub fn on_selection_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.selection_change = Some(Box::new(f));
        self
    }

    /// Called with the full item list after a registration or unregistration.
    pub fn on_items_change(mut self, f: impl FnMut(&[Item<H>], ItemsChange) + 'static) -> Self {
        self.items_change = Some(Box::new(f));
        self
    }

    /// Called with the key of the newly active item, or `None` when no item
    /// is active anymore.
    pub fn on_active_item_change(mut self, f: impl FnMut(Option<&str>) + 'static) -> Self {
        self.active_item_change = Some(Box::new(f));
        self
    }

    /// Replace every hook `other` supplies, keep the rest.
    pub(crate) fn merge(&mut self, other: Callbacks<H>) {
        if other.action.is_some() {
            self.action = other.action;
        }
        if other.selection_change.is_some() {
            self.selection_change = other.selection_change;
        }
        if other.items_change.is_some() {
            self.items_change = other.items_change;
        }
        if other.active_item_change.is_some() {
            self.active_item_change = other.active_item_change;
        }
    }

    pub(crate) fn action(&mut self, key: &str) {
        if let Some(f) = self.action.as_mut() {
            f(key);
        }
    }

    pub(crate) fn selection_change(&mut self, keys: &[String]) {
        if let Some(f) = self.selection_change.as_mut() {
            f(keys);
        }
    }

    pub(crate) fn items_change(&mut self, items: &[Item<H>], change: ItemsChange) {
        if let Some(f) = self.items_change.as_mut() {
            f(items, change);
        }
    }

    pub(crate) fn active_item_change(&mut self, key: Option<&str>) {
        if let Some(f) = self.active_item_change.as_mut() {
            f(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unset_hooks_are_silent() {
        let mut callbacks: Callbacks<()> = Callbacks::new();
        callbacks.action("a");
        callbacks.selection_change(&["a".to_string()]);
        callbacks.items_change(&[], ItemsChange::Add);
        callbacks.active_item_change(None);
    }

    #[test]
    fn merge_replaces_only_supplied_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        let a = log.clone();
        let mut callbacks: Callbacks<()> = Callbacks::new()
            .on_action(move |k| l.borrow_mut().push(format!("old action {k}")))
            .on_active_item_change(move |k| a.borrow_mut().push(format!("active {k:?}")));

        let l = log.clone();
        callbacks.merge(Callbacks::new().on_action(move |k| l.borrow_mut().push(format!("new action {k}"))));

        callbacks.action("x");
        callbacks.active_item_change(Some("y"));
        assert_eq!(
            *log.borrow(),
            vec!["new action x".to_string(), "active Some(\"y\")".to_string()]
        );
    }

    #[test]
    fn debug_lists_installed_hooks() {
        let callbacks: Callbacks<()> = Callbacks::new().on_action(|_| {});
        let out = format!("{callbacks:?}");
        assert!(out.contains("action: true"));
        assert!(out.contains("selection_change: false"));
    }
}
