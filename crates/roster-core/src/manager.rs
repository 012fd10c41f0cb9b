//! The list manager: registry, selection, activation and type-ahead for one
//! list-like widget.

use std::cell::RefCell;
use std::rc::Rc;

use crate::callbacks::{Callbacks, ItemsChange};
use crate::config::{AutoActivate, ListConfig, SelectionMode};
use crate::deferred::{Deferred, DeferredQueue};
use crate::handle::ItemHandle;
use crate::item::{Item, ItemArgs};
use crate::selection::toggle;
use crate::type_ahead::TypeAhead;

/// Tracks what is selected and what is active among a live set of items.
///
/// One manager backs one widget instance (a listbox, a menu, a select). The
/// widget registers a handle for every row it mounts, relays key and pointer
/// events as manager calls, and pushes its configuration in with
/// [`apply_config`](ListManager::apply_config).
///
/// # Ordering
///
/// Rows may mount in any order. After every registration the item list is
/// re-sorted by [`ItemHandle::compare_order`], so navigation always follows
/// visual order.
///
/// # Controlled selection
///
/// [`select`](ListManager::select) never changes `is_selected` flags itself.
/// It reports the proposed set through `on_selection_change`; the widget
/// stores it and reflects it back with `apply_config`.
///
/// # Deferred work
///
/// Re-applying the auto-activate policy after a batch of registrations and
/// scrolling a newly active row into view are postponed until
/// [`flush`](ListManager::flush), which the host calls once its current batch
/// of work (and painting) is done.
///
/// # Example
///
/// ```
/// use roster_core::testing::TestHandle;
/// use roster_core::{AutoActivate, ItemArgs, ListConfig, ListManager, SelectionMode};
///
/// let mut manager = ListManager::with_config(
///     ListConfig::new()
///         .with_selection_mode(SelectionMode::Single)
///         .with_auto_activate(AutoActivate::First),
/// );
/// manager.register(TestHandle::at(0), ItemArgs::new("apple").text("Apple"));
/// manager.register(TestHandle::at(1), ItemArgs::new("banana").text("Banana"));
/// manager.flush();
/// assert_eq!(manager.active_key(), Some("apple"));
///
/// manager.activate_next();
/// assert_eq!(manager.active_key(), Some("banana"));
/// ```
#[derive(Debug)]
pub struct ListManager<H: ItemHandle> {
    items: Vec<Item<H>>,
    config: ListConfig,
    callbacks: Callbacks<H>,
    type_ahead: TypeAhead,
    deferred: DeferredQueue<H>,
    releases: Rc<RefCell<Vec<H>>>,
}

impl<H: ItemHandle> Default for ListManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ItemHandle> ListManager<H> {
    /// Create an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    pub fn with_config(config: ListConfig) -> Self {
        Self {
            items: Vec::new(),
            type_ahead: TypeAhead::with_timeout(config.search_timeout),
            config,
            callbacks: Callbacks::default(),
            deferred: DeferredQueue::default(),
            releases: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Install callbacks at construction time.
    pub fn with_callbacks(mut self, callbacks: Callbacks<H>) -> Self {
        self.callbacks.merge(callbacks);
        self
    }

    // --- Queries ---

    /// Registered items in visual order.
    pub fn items(&self) -> &[Item<H>] {
        &self.items
    }

    /// Keys of the registered items in visual order.
    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(Item::key).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// The item registered with `handle`.
    pub fn by_handle(&self, handle: &H) -> Option<&Item<H>> {
        self.items.iter().find(|item| item.handle() == handle)
    }

    /// The first item registered under `key`.
    pub fn by_key(&self, key: &str) -> Option<&Item<H>> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn active_item(&self) -> Option<&Item<H>> {
        self.items.iter().find(|item| item.is_active())
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_item().map(Item::key)
    }

    /// Keys of every item whose `is_selected` flag is set, in visual order.
    pub fn selected_keys(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.key().to_string())
            .collect()
    }

    /// The current type-ahead query.
    pub fn search_query(&self) -> &str {
        self.type_ahead.query()
    }

    /// Whether [`flush`](ListManager::flush) has work to do.
    pub fn has_pending_work(&self) -> bool {
        !self.deferred.is_empty() || !self.releases.borrow().is_empty()
    }

    // --- Registration ---

    /// Register the row behind `handle`.
    ///
    /// With [`AutoActivate::First`] the very first enabled item becomes
    /// active immediately. Once more than one item is registered under any
    /// auto-activate policy, a single settle pass is scheduled for the next
    /// [`flush`](ListManager::flush).
    pub fn register(&mut self, handle: H, args: ItemArgs) {
        self.apply_releases();

        let first_of_list = self.config.auto_activate == AutoActivate::First && self.items.is_empty();
        let wants_active = (args.is_active || first_of_list) && !args.is_disabled;

        let item = Item::from_args(handle.clone(), args);
        tracing::debug!(key = item.key(), "register item");
        self.items.push(item);
        self.items
            .sort_by(|a, b| a.handle().compare_order(b.handle()));

        if wants_active {
            if let Some(idx) = self.index_of(&handle) {
                self.mark_active(idx);
            }
        }

        self.callbacks.items_change(&self.items, ItemsChange::Add);

        if self.config.auto_activate != AutoActivate::None
            && self.items.len() > 1
            && self.deferred.schedule_settle()
        {
            tracing::debug!(policy = %self.config.auto_activate, "settle scheduled");
        }
    }

    /// Remove the item registered with `handle`. Returns whether one was found.
    ///
    /// With [`AutoActivate::First`] the first enabled remaining item is
    /// activated. If the removed item was active and nothing took its place,
    /// `on_active_item_change(None)` fires.
    pub fn unregister(&mut self, handle: &H) -> bool {
        let Some(idx) = self.index_of(handle) else {
            return false;
        };
        let removed = self.items.remove(idx);
        tracing::debug!(key = removed.key(), "unregister item");

        if self.config.auto_activate == AutoActivate::First && !self.items.is_empty() {
            self.activate_first();
        }
        if removed.is_active() && self.active_index().is_none() {
            self.callbacks.active_item_change(None);
        }

        self.callbacks.items_change(&self.items, ItemsChange::Remove);
        true
    }

    pub(crate) fn release_queue(&self) -> Rc<RefCell<Vec<H>>> {
        self.releases.clone()
    }

    fn apply_releases(&mut self) {
        let released = std::mem::take(&mut *self.releases.borrow_mut());
        for handle in released {
            tracing::debug!("applying queued release");
            self.unregister(&handle);
        }
    }

    // --- Configuration ---

    /// Re-derive `is_selected`/`is_disabled` from the key sets and store the
    /// policy fields. Fires no notifications.
    pub fn apply_config(&mut self, config: &ListConfig) {
        for item in &mut self.items {
            item.set_selected(config.is_selected(item.key()));
            item.set_disabled(config.is_disabled(item.key()));
        }
        self.type_ahead.set_timeout(config.search_timeout);
        self.config = config.clone();
    }

    /// Replace every callback `callbacks` supplies; keep the others.
    pub fn apply_callbacks(&mut self, callbacks: Callbacks<H>) {
        self.callbacks.merge(callbacks);
    }

    // --- Selection ---

    /// Ask the active item's handle to commit itself. No-op without an
    /// active item.
    pub fn select_active(&self) {
        if let Some(item) = self.active_item() {
            tracing::trace!(key = item.key(), "commit active item");
            item.handle().commit();
        }
    }

    /// Choose the item registered with `handle`.
    ///
    /// Unless the selection mode is `None`, the item becomes active and the
    /// next selected set is reported through `on_selection_change`.
    /// `on_action` fires in every mode. Missing and disabled items are
    /// ignored.
    pub fn select(&mut self, handle: &H) {
        if let Some(idx) = self.index_of(handle) {
            self.select_index(idx);
        }
    }

    /// Choose the first item registered under `key`.
    pub fn select_key(&mut self, key: &str) {
        if let Some(idx) = self.items.iter().position(|item| item.key() == key) {
            self.select_index(idx);
        }
    }

    fn select_index(&mut self, idx: usize) {
        if self.items[idx].is_disabled() {
            tracing::trace!(key = self.items[idx].key(), "ignoring select of disabled item");
            return;
        }
        let mode = self.config.selection_mode;
        if mode != SelectionMode::None {
            self.activate_index(idx);
        }

        self.callbacks.action(self.items[idx].key());

        if mode != SelectionMode::None {
            let current = self.selected_keys();
            let item = &self.items[idx];
            let next = toggle(mode, self.config.allow_empty, &current, item.key(), item.is_selected());
            self.callbacks.selection_change(&next);
        }
    }

    // --- Activation ---

    /// Make the item registered with `handle` the active one.
    pub fn activate(&mut self, handle: &H) {
        if let Some(idx) = self.index_of(handle) {
            self.activate_index(idx);
        }
    }

    /// Make the first item registered under `key` the active one.
    pub fn activate_key(&mut self, key: &str) {
        if let Some(idx) = self.items.iter().position(|item| item.key() == key) {
            self.activate_index(idx);
        }
    }

    /// Clear the active item, as when focus leaves the list.
    pub fn deactivate(&mut self) {
        if let Some(idx) = self.active_index() {
            self.items[idx].set_active(false);
            tracing::trace!("deactivated");
            self.callbacks.active_item_change(None);
        }
    }

    /// Activate the next enabled item after the current position.
    pub fn activate_next(&mut self) {
        let start = self.current_position().map_or(0, |pos| pos + 1);
        if let Some(idx) = (start..self.items.len()).find(|&i| self.is_enabled(i)) {
            self.activate_index(idx);
        }
    }

    /// Activate the closest enabled item before the current position.
    pub fn activate_previous(&mut self) {
        let Some(pos) = self.current_position() else {
            return;
        };
        if let Some(idx) = (0..pos).rev().find(|&i| self.is_enabled(i)) {
            self.activate_index(idx);
        }
    }

    pub fn activate_first(&mut self) {
        if let Some(idx) = (0..self.items.len()).find(|&i| self.is_enabled(i)) {
            self.activate_index(idx);
        }
    }

    pub fn activate_last(&mut self) {
        if let Some(idx) = (0..self.items.len()).rev().find(|&i| self.is_enabled(i)) {
            self.activate_index(idx);
        }
    }

    /// Activate the first selected enabled item, or the first enabled item.
    pub fn activate_selected(&mut self) {
        match (0..self.items.len()).find(|&i| self.is_enabled(i) && self.items[i].is_selected()) {
            Some(idx) => self.activate_index(idx),
            None => self.activate_first(),
        }
    }

    /// The active item, or else the first selected one.
    fn current_position(&self) -> Option<usize> {
        self.active_index()
            .or_else(|| self.items.iter().position(Item::is_selected))
    }

    fn active_index(&self) -> Option<usize> {
        self.items.iter().position(Item::is_active)
    }

    fn index_of(&self, handle: &H) -> Option<usize> {
        self.items.iter().position(|item| item.handle() == handle)
    }

    fn is_enabled(&self, idx: usize) -> bool {
        !self.items[idx].is_disabled()
    }

    fn activate_index(&mut self, idx: usize) {
        if self.mark_active(idx) {
            self.deferred.schedule_scroll(self.items[idx].handle().clone());
        }
    }

    /// Move the active flag to `idx` and notify. Returns false if it was
    /// already there.
    fn mark_active(&mut self, idx: usize) -> bool {
        if self.items[idx].is_active() {
            return false;
        }
        if let Some(prev) = self.active_index() {
            self.items[prev].set_active(false);
        }
        self.items[idx].set_active(true);
        tracing::trace!(key = self.items[idx].key(), "activated");
        self.callbacks.active_item_change(Some(self.items[idx].key()));
        true
    }

    // --- Type-ahead ---

    /// Extend the type-ahead query with `input` and activate the first
    /// enabled item whose text starts with it.
    ///
    /// A failed match leaves the active item alone. Returns the buffer
    /// generation; pass it to [`expire_search`](ListManager::expire_search)
    /// when the host's quiet-period timer fires.
    pub fn search(&mut self, input: &str) -> u64 {
        let generation = self.type_ahead.push(input);
        let query = self.type_ahead.query();
        let found = if query.is_empty() {
            None
        } else {
            self.items
                .iter()
                .position(|item| !item.is_disabled() && item.matches_prefix(query))
        };
        tracing::trace!(query, matched = found.is_some(), "type-ahead");
        if let Some(idx) = found {
            self.activate_index(idx);
        }
        generation
    }

    /// Clear the type-ahead query if `generation` is still current.
    pub fn expire_search(&mut self, generation: u64) -> bool {
        self.type_ahead.expire(generation)
    }

    // --- Deferred work ---

    /// Run postponed work: queued registration releases, the settle pass of
    /// the auto-activate policy, and scroll-into-view requests, in the order
    /// they were scheduled.
    pub fn flush(&mut self) {
        self.apply_releases();
        while let Some(task) = self.deferred.pop() {
            match task {
                Deferred::Settle => self.settle(),
                Deferred::ScrollIntoView(handle) => handle.scroll_into_view(),
            }
        }
    }

    fn settle(&mut self) {
        tracing::debug!(policy = %self.config.auto_activate, items = self.items.len(), "settle");
        match self.config.auto_activate {
            AutoActivate::None => {}
            AutoActivate::First => self.activate_first(),
            AutoActivate::Selected => self.activate_selected(),
        }
    }
}
