//! Headless helpers for exercising the list manager and components in tests.
//!
//! - [`TestHandle`] is an [`ItemHandle`] with an explicit visual position
//!   that records commits and scroll requests.
//! - [`Harness`] drives a [`Component`] without a terminal: it delivers
//!   synchronous command messages in order, can await pending futures, and
//!   renders into a ratatui `TestBackend`.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;

use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::command::{Command, CommandInner};
use crate::component::Component;
use crate::handle::ItemHandle;

/// An [`ItemHandle`] whose visual position is set explicitly.
///
/// Clones share their counters, so a test can keep one clone and inspect
/// what the manager did with the other.
///
/// ```
/// use roster_core::testing::TestHandle;
/// use roster_core::{ItemArgs, ListManager};
///
/// let mut manager = ListManager::new();
/// let third = TestHandle::at(3);
/// let first = TestHandle::at(1);
/// manager.register(third.clone(), ItemArgs::new("c"));
/// manager.register(first.clone(), ItemArgs::new("a"));
/// assert_eq!(manager.keys(), vec!["a", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct TestHandle {
    id: usize,
    position: Rc<Cell<usize>>,
    commits: Rc<Cell<usize>>,
    scrolls: Rc<Cell<usize>>,
    scroll_log: Rc<RefCell<Vec<usize>>>,
}

thread_local! {
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
}

impl TestHandle {
    /// A handle rendered at `position` (smaller positions come first).
    pub fn at(position: usize) -> Self {
        let id = NEXT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self {
            id,
            position: Rc::new(Cell::new(position)),
            commits: Rc::new(Cell::new(0)),
            scrolls: Rc::new(Cell::new(0)),
            scroll_log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Share a scroll log with other handles to observe cross-handle order.
    pub fn with_scroll_log(mut self, log: Rc<RefCell<Vec<usize>>>) -> Self {
        self.scroll_log = log;
        self
    }

    pub fn position(&self) -> usize {
        self.position.get()
    }

    /// Move the element, as a re-render might.
    pub fn set_position(&self, position: usize) {
        self.position.set(position);
    }

    /// Number of times [`ItemHandle::commit`] was called.
    pub fn commits(&self) -> usize {
        self.commits.get()
    }

    /// Number of times [`ItemHandle::scroll_into_view`] was called.
    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    /// Positions of handles scrolled into view, in call order.
    pub fn scroll_log(&self) -> Vec<usize> {
        self.scroll_log.borrow().clone()
    }
}

impl PartialEq for TestHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl ItemHandle for TestHandle {
    fn compare_order(&self, other: &Self) -> Ordering {
        self.position.get().cmp(&other.position.get())
    }

    fn commit(&self) {
        self.commits.set(self.commits.get() + 1);
    }

    fn scroll_into_view(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
        self.scroll_log.borrow_mut().push(self.position.get());
    }
}

/// A headless driver for a [`Component`].
///
/// ```rust,ignore
/// let mut harness = Harness::new(listbox);
/// harness.send(Message::KeyPress(down));   // update + queued messages
/// assert!(harness.emitted().iter().any(|m| matches!(m, Message::ActiveChanged(_))));
/// harness.settle().await;                   // run pending futures (timers)
/// let screen = harness.render_string(20, 4);
/// ```
pub struct Harness<C: Component> {
    component: C,
    emitted: Vec<C::Message>,
    pending: Vec<BoxFuture<'static, C::Message>>,
}

impl<C: Component> Harness<C>
where
    C::Message: Clone,
{
    pub fn new(component: C) -> Self {
        Self {
            component,
            emitted: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Deliver `msg`, then every synchronous message the resulting commands
    /// produce, in order.
    ///
    /// Each delivered message is also recorded in
    /// [`emitted`](Harness::emitted).
    pub fn send(&mut self, msg: C::Message) {
        let mut queue = std::collections::VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            self.emitted.push(msg.clone());
            let cmd = self.component.update(msg);
            self.collect(cmd, &mut queue);
        }
    }

    /// Deliver a command returned outside [`send`](Harness::send), such as
    /// one produced by a direct method call on the component.
    pub fn run(&mut self, cmd: Command<C::Message>) {
        let mut queue = std::collections::VecDeque::new();
        self.collect(cmd, &mut queue);
        while let Some(msg) = queue.pop_front() {
            self.send(msg);
        }
    }

    /// Await every pending future and deliver the resulting messages.
    ///
    /// Futures produced while delivering are awaited too.
    pub async fn settle(&mut self) {
        while !self.pending.is_empty() {
            let futures = std::mem::take(&mut self.pending);
            for msg in futures::future::join_all(futures).await {
                self.send(msg);
            }
        }
    }

    /// Number of futures waiting for [`settle`](Harness::settle).
    pub fn pending_futures(&self) -> usize {
        self.pending.len()
    }

    /// Every message delivered so far, in delivery order.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    /// Forget the delivery log.
    pub fn clear_emitted(&mut self) {
        self.emitted.clear();
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render the component to a buffer of the given size.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory test backend fails, which it does not.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.component.view(frame, frame.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render and return the screen as text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(
        &mut self,
        cmd: Command<C::Message>,
        queue: &mut std::collections::VecDeque<C::Message>,
    ) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => queue.push_back(msg),
            CommandInner::Future(fut) => self.pending.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd, queue);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use ratatui::Frame;

    #[test]
    fn handles_compare_by_position() {
        let a = TestHandle::at(2);
        let b = TestHandle::at(1);
        assert_eq!(a.compare_order(&b), Ordering::Greater);
        b.set_position(5);
        assert_eq!(a.compare_order(&b), Ordering::Less);
    }

    #[test]
    fn clones_share_identity_and_counters() {
        let a = TestHandle::at(0);
        let clone = a.clone();
        assert_eq!(a, clone);
        assert_ne!(a, TestHandle::at(0));
        clone.commit();
        clone.scroll_into_view();
        assert_eq!(a.commits(), 1);
        assert_eq!(a.scroll_log(), vec![0]);
    }

    struct Echo {
        seen: Vec<u32>,
    }

    impl Component for Echo {
        type Message = u32;

        fn update(&mut self, msg: u32) -> Command<u32> {
            self.seen.push(msg);
            match msg {
                1 => Command::batch([Command::message(2), Command::message(3)]),
                2 => Command::message(4),
                5 => Command::perform(async { 6 }, |n| n),
                _ => Command::none(),
            }
        }

        fn view(&self, frame: &mut Frame, area: Rect) {
            frame.render_widget(Paragraph::new(format!("{:?}", self.seen)), area);
        }
    }

    #[test]
    fn send_delivers_in_order() {
        let mut h = Harness::new(Echo { seen: vec![] });
        h.send(1);
        assert_eq!(h.component().seen, vec![1, 2, 3, 4]);
        assert_eq!(h.emitted(), &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn settle_runs_futures() {
        let mut h = Harness::new(Echo { seen: vec![] });
        h.send(5);
        assert_eq!(h.pending_futures(), 1);
        h.settle().await;
        assert_eq!(h.component().seen, vec![5, 6]);
        assert_eq!(h.pending_futures(), 0);
    }

    #[test]
    fn render_string_shows_view() {
        let mut h = Harness::new(Echo { seen: vec![] });
        h.send(7);
        assert!(h.render_string(10, 1).starts_with("[7]"));
    }
}
