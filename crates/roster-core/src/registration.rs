//! Scoped registrations that unregister themselves on drop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::handle::ItemHandle;
use crate::item::ItemArgs;
use crate::manager::ListManager;

/// A live registration of one row with a shared [`ListManager`].
///
/// Dropping the guard (or calling [`release`](Registration::release))
/// unregisters the row. When the manager is busy at that moment, for example
/// because a callback tears the row down, the release is queued and applied
/// at the start of the manager's next `register` or `flush`. A guard that
/// outlives its manager does nothing.
#[derive(Debug)]
pub struct Registration<H: ItemHandle> {
    manager: Weak<RefCell<ListManager<H>>>,
    releases: Rc<RefCell<Vec<H>>>,
    handle: H,
    released: bool,
}

/// Register `handle` with `manager` and return the guard that releases it.
///
/// # Panics
///
/// Panics if `manager` is already mutably borrowed.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use roster_core::testing::TestHandle;
/// use roster_core::{register_scoped, ItemArgs, ListManager};
///
/// let manager = Rc::new(RefCell::new(ListManager::new()));
/// let row = register_scoped(&manager, TestHandle::at(0), ItemArgs::new("a"));
/// assert_eq!(manager.borrow().len(), 1);
/// drop(row);
/// assert!(manager.borrow().is_empty());
/// ```
pub fn register_scoped<H: ItemHandle>(
    manager: &Rc<RefCell<ListManager<H>>>,
    handle: H,
    args: ItemArgs,
) -> Registration<H> {
    let releases = {
        let mut m = manager.borrow_mut();
        m.register(handle.clone(), args);
        m.release_queue()
    };
    Registration {
        manager: Rc::downgrade(manager),
        releases,
        handle,
        released: false,
    }
}

impl<H: ItemHandle> Registration<H> {
    /// The registered handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Unregister now.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if std::mem::replace(&mut self.released, true) {
            return;
        }
        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        match manager.try_borrow_mut() {
            Ok(mut m) => {
                m.unregister(&self.handle);
            }
            Err(_) => {
                tracing::debug!("list manager busy, queueing release");
                self.releases.borrow_mut().push(self.handle.clone());
            }
        };
    }
}

impl<H: ItemHandle> Drop for Registration<H> {
    fn drop(&mut self) {
        self.release_now();
    }
}
