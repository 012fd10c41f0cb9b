//! Work the manager postpones until the host's current batch has settled.

use std::collections::VecDeque;

/// A postponed unit of work.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Deferred<H> {
    /// Re-apply the auto-activate policy against the final item set.
    Settle,
    /// Scroll the captured handle into view.
    ScrollIntoView(H),
}

/// FIFO of postponed work, drained by
/// [`ListManager::flush`](crate::ListManager::flush).
///
/// At most one `Settle` is queued at a time, so a batch of N registrations
/// produces a single settle pass.
#[derive(Debug)]
pub(crate) struct DeferredQueue<H> {
    tasks: VecDeque<Deferred<H>>,
}

impl<H> Default for DeferredQueue<H> {
    fn default() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }
}

impl<H> DeferredQueue<H> {
    /// Queue a settle pass unless one is already pending.
    pub fn schedule_settle(&mut self) -> bool {
        if self.tasks.iter().any(|t| matches!(t, Deferred::Settle)) {
            return false;
        }
        self.tasks.push_back(Deferred::Settle);
        true
    }

    pub fn schedule_scroll(&mut self, handle: H) {
        self.tasks.push_back(Deferred::ScrollIntoView(handle));
    }

    pub fn pop(&mut self) -> Option<Deferred<H>> {
        self.tasks.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
