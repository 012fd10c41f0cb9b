//! Visual row slots and the handles the list manager orders them by.
//!
//! A [`RowTree`] is the widget's stand-in for a rendered tree: rows can be
//! inserted anywhere, in any order, and each [`RowHandle`] answers "where am
//! I on screen" by looking itself up. Commit and scroll requests the manager
//! sends to a handle are recorded here for the widget to pick up.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use roster_core::ItemHandle;

#[derive(Debug, Default)]
struct RowState {
    order: Vec<u64>,
    commits: Vec<u64>,
    scroll_to: Option<u64>,
}

impl RowState {
    fn position(&self, id: u64) -> Option<usize> {
        self.order.iter().position(|&r| r == id)
    }
}

/// Ordered row slots shared by a widget and its handles.
#[derive(Debug, Clone, Default)]
pub struct RowTree {
    state: Rc<RefCell<RowState>>,
    next_id: Rc<Cell<u64>>,
}

impl RowTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row at visual slot `index` (clamped to the end).
    pub fn insert(&self, index: usize) -> RowHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut state = self.state.borrow_mut();
        let index = index.min(state.order.len());
        state.order.insert(index, id);
        RowHandle {
            id,
            tree: Rc::downgrade(&self.state),
        }
    }

    /// Append a row after every existing one.
    pub fn push(&self) -> RowHandle {
        self.insert(usize::MAX)
    }

    /// Drop the row's slot.
    ///
    /// Release the row's registration first: a detached row still sorts
    /// (after every attached row), but it no longer has a visual position.
    pub fn remove(&self, handle: &RowHandle) {
        let mut state = self.state.borrow_mut();
        state.order.retain(|&id| id != handle.id);
        state.commits.retain(|&id| id != handle.id);
        if state.scroll_to == Some(handle.id) {
            state.scroll_to = None;
        }
    }

    pub fn position(&self, handle: &RowHandle) -> Option<usize> {
        self.state.borrow().position(handle.id)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows that asked to be committed since the last call, oldest first.
    pub fn take_commits(&self) -> Vec<RowHandle> {
        let ids = std::mem::take(&mut self.state.borrow_mut().commits);
        ids.into_iter()
            .map(|id| RowHandle {
                id,
                tree: Rc::downgrade(&self.state),
            })
            .collect()
    }

    /// Visual position of the most recent scroll request, consuming it.
    pub fn take_scroll(&self) -> Option<usize> {
        let mut state = self.state.borrow_mut();
        let id = state.scroll_to.take()?;
        state.position(id)
    }
}

/// A row's identity within a [`RowTree`].
#[derive(Debug, Clone)]
pub struct RowHandle {
    id: u64,
    tree: Weak<RefCell<RowState>>,
}

impl RowHandle {
    fn with_state<R>(&self, f: impl FnOnce(&mut RowState) -> R) -> Option<R> {
        let tree = self.tree.upgrade()?;
        let mut state = tree.borrow_mut();
        Some(f(&mut state))
    }
}

impl PartialEq for RowHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tree.ptr_eq(&other.tree)
    }
}

impl ItemHandle for RowHandle {
    /// Attached rows compare by position. Detached rows, and every row of a
    /// dropped tree, sort after them by creation order.
    fn compare_order(&self, other: &Self) -> Ordering {
        let by_id = self.id.cmp(&other.id);
        self.with_state(|state| match (state.position(self.id), state.position(other.id)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_id,
        })
        .unwrap_or(by_id)
    }

    fn commit(&self) {
        self.with_state(|state| state.commits.push(self.id));
    }

    fn scroll_into_view(&self) {
        self.with_state(|state| state.scroll_to = Some(self.id));
    }
}
