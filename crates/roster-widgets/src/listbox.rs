//! A keyboard- and pointer-driven listbox backed by a [`ListManager`].
//!
//! The listbox mounts one row per option, forwards input to the manager and
//! turns the manager's callbacks into outbound [`Message`]s a parent can
//! observe in its own `update`:
//!
//! | Outbound message | When |
//! |------------------|------|
//! | [`Message::Action`] | An item was chosen, in every selection mode |
//! | [`Message::SelectionChanged`] | The next selected set, after a choice |
//! | [`Message::ActiveChanged`] | The active item moved or was cleared |
//!
//! Selection is reflected back into the manager right away unless the
//! listbox is [controlled](Listbox::with_controlled); a controlled listbox
//! only changes its selection through [`Listbox::set_selected_keys`].
//!
//! Deferred work (the auto-activate settle pass and scroll-into-view) runs
//! when the listbox receives [`Message::Flush`], which it schedules for
//! itself after any input that left work behind.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use roster_core::{
    derive_key_and_label, register_scoped, AutoActivate, Callbacks, Candidate, Command, Component,
    ItemArgs, ListConfig, ListManager, Registration, SelectionMode,
};

use crate::key::{search_input, ListAction, ListKeyBindings};
use crate::rows::{RowHandle, RowTree};
use crate::text::{display_width, truncate};

/// Messages for the listbox component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press, ignored while unfocused.
    KeyPress(KeyEvent),
    /// The pointer chose the item with this key.
    Click(String),
    /// The pointer moved over the item with this key.
    Hover(String),
    /// The pointer or focus left the list.
    Leave,
    /// The type-ahead timer armed for this generation fired.
    SearchExpired(u64),
    /// Run deferred activation and scrolling.
    Flush,
    /// An item was chosen.
    Action(String),
    /// The selected set the listbox proposes next.
    SelectionChanged(Vec<String>),
    /// The active item is now this one, or none.
    ActiveChanged(Option<String>),
}

/// Style configuration for the listbox.
#[derive(Debug, Clone)]
pub struct ListboxStyle {
    pub normal: Style,
    pub active: Style,
    pub selected: Style,
    pub disabled: Style,
    /// Drawn left of the active row (e.g. "▸ ").
    pub active_symbol: String,
    /// Drawn before selected rows when the list allows selection.
    pub check_symbol: String,
}

impl Default for ListboxStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Green),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            active_symbol: "▸ ".to_string(),
            check_symbol: "✓ ".to_string(),
        }
    }
}

/// A listbox or menu over a fixed set of options.
pub struct Listbox {
    manager: Rc<RefCell<ListManager<RowHandle>>>,
    rows: RowTree,
    registrations: Vec<Registration<RowHandle>>,
    config: ListConfig,
    outbox: Rc<RefCell<Vec<Message>>>,
    key_bindings: ListKeyBindings,
    style: ListboxStyle,
    block: Option<Block<'static>>,
    focus: bool,
    controlled: bool,
    offset: Cell<usize>,
    visible_height: Cell<usize>,
}

impl Listbox {
    /// Mount a row for each option, in order, under `config`.
    ///
    /// The initial active item (if the policy picks one) is settled before
    /// this returns; only later changes are reported as messages.
    pub fn new<I, C>(options: I, config: ListConfig) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        let outbox = Rc::new(RefCell::new(Vec::new()));
        let manager = ListManager::with_config(config.clone()).with_callbacks(forwarding(&outbox));
        let mut listbox = Self {
            manager: Rc::new(RefCell::new(manager)),
            rows: RowTree::new(),
            registrations: Vec::new(),
            config,
            outbox,
            key_bindings: ListKeyBindings::default(),
            style: ListboxStyle::default(),
            block: None,
            focus: false,
            controlled: false,
            offset: Cell::new(0),
            visible_height: Cell::new(10),
        };
        for option in options {
            let row = listbox.rows.push();
            listbox.mount(row, option.into());
        }
        listbox.manager.borrow_mut().flush();
        listbox.follow_scroll();
        listbox.outbox.borrow_mut().clear();
        listbox
    }

    /// A menu: nothing stays selected and the first item starts active.
    pub fn action_menu<I, C>(options: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        Self::new(
            options,
            ListConfig::new()
                .with_selection_mode(SelectionMode::None)
                .with_auto_activate(AutoActivate::First),
        )
    }

    /// Leave selection to the parent: choices are only proposed through
    /// [`Message::SelectionChanged`].
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: ListKeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn with_style(mut self, style: ListboxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Insert an option at visual slot `index`.
    pub fn insert_option(&mut self, index: usize, option: impl Into<Candidate>) -> Command<Message> {
        let row = self.rows.insert(index);
        self.mount(row, option.into());
        self.finish(Command::none())
    }

    /// Unmount the first option with `key`. Returns `Command::none()` when
    /// there is no such option.
    pub fn remove_option(&mut self, key: &str) -> Command<Message> {
        let found = {
            let manager = self.manager.borrow();
            self.registrations.iter().position(|reg| {
                manager
                    .by_handle(reg.handle())
                    .is_some_and(|item| item.key() == key)
            })
        };
        let Some(idx) = found else {
            return Command::none();
        };
        let registration = self.registrations.remove(idx);
        let row = registration.handle().clone();
        registration.release();
        self.rows.remove(&row);
        self.finish(Command::none())
    }

    /// Replace the selected set, as a controlling parent does.
    pub fn set_selected_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.selected_keys = keys.into_iter().map(Into::into).collect();
        self.manager.borrow_mut().apply_config(&self.config);
    }

    pub fn set_disabled_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.disabled_keys = keys.into_iter().map(Into::into).collect();
        self.manager.borrow_mut().apply_config(&self.config);
    }

    /// Keys of every option, in visual order.
    pub fn keys(&self) -> Vec<String> {
        self.manager
            .borrow()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn active_key(&self) -> Option<String> {
        self.manager.borrow().active_key().map(str::to_string)
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.manager.borrow().selected_keys()
    }

    pub fn search_query(&self) -> String {
        self.manager.borrow().search_query().to_string()
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn key_bindings(&self) -> &ListKeyBindings {
        &self.key_bindings
    }

    fn mount(&mut self, row: RowHandle, option: Candidate) {
        let option = derive_key_and_label(option);
        let args = ItemArgs::new(option.key.as_str())
            .text(option.label)
            .selected(self.config.selected_keys.contains(&option.key))
            .disabled(self.config.disabled_keys.contains(&option.key));
        self.registrations
            .push(register_scoped(&self.manager, row, args));
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Command<Message> {
        // While a search is in progress, printable keys (Space included)
        // extend the query instead of triggering bindings.
        let searching = !self.manager.borrow().search_query().is_empty();
        if searching {
            if let Some(input) = search_input(key) {
                return self.search(&input);
            }
        }

        if let Some(action) = self.key_bindings.resolve(key) {
            let mut manager = self.manager.borrow_mut();
            match action {
                ListAction::Previous => manager.activate_previous(),
                ListAction::Next => manager.activate_next(),
                ListAction::First => manager.activate_first(),
                ListAction::Last => manager.activate_last(),
                ListAction::Commit => manager.select_active(),
                ListAction::Leave => manager.deactivate(),
            }
            return Command::none();
        }

        match search_input(key) {
            Some(input) => self.search(&input),
            None => Command::none(),
        }
    }

    /// Feed type-ahead and arm the quiet-period timer for this generation.
    fn search(&mut self, input: &str) -> Command<Message> {
        let mut manager = self.manager.borrow_mut();
        let generation = manager.search(input);
        let timeout = manager.config().search_timeout;
        Command::tick(timeout, move |_| Message::SearchExpired(generation))
    }

    /// Route rows that committed themselves back through `select`.
    fn take_commits(&mut self) {
        for row in self.rows.take_commits() {
            self.manager.borrow_mut().select(&row);
        }
    }

    /// Forward callback output, reflect uncontrolled selection, and schedule
    /// a flush if the manager has work left.
    fn finish(&mut self, extra: Command<Message>) -> Command<Message> {
        self.take_commits();
        let outbound = std::mem::take(&mut *self.outbox.borrow_mut());
        if !self.controlled {
            if let Some(Message::SelectionChanged(keys)) = outbound
                .iter()
                .rev()
                .find(|msg| matches!(msg, Message::SelectionChanged(_)))
            {
                self.set_selected_keys(keys.clone());
            }
        }
        let flush = if self.manager.borrow().has_pending_work() {
            Command::message(Message::Flush)
        } else {
            Command::none()
        };
        Command::batch(
            outbound
                .into_iter()
                .map(Command::message)
                .chain([extra, flush]),
        )
    }

    /// Move the viewport so the last scrolled-to row is visible.
    fn follow_scroll(&self) {
        let Some(pos) = self.rows.take_scroll() else {
            return;
        };
        let height = self.visible_height.get().max(1);
        let offset = self.offset.get();
        if pos < offset {
            self.offset.set(pos);
        } else if pos >= offset + height {
            self.offset.set(pos + 1 - height);
        }
    }
}

impl Component for Listbox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let extra = match msg {
            Message::KeyPress(key) => {
                if !self.focus {
                    return Command::none();
                }
                self.handle_key(&key)
            }
            Message::Click(key) => {
                self.manager.borrow_mut().select_key(&key);
                Command::none()
            }
            Message::Hover(key) => {
                self.manager.borrow_mut().activate_key(&key);
                Command::none()
            }
            Message::Leave => {
                self.manager.borrow_mut().deactivate();
                Command::none()
            }
            Message::SearchExpired(generation) => {
                self.manager.borrow_mut().expire_search(generation);
                Command::none()
            }
            Message::Flush => {
                self.manager.borrow_mut().flush();
                self.follow_scroll();
                Command::none()
            }
            Message::Action(_) | Message::SelectionChanged(_) | Message::ActiveChanged(_) => {
                return Command::none();
            }
        };
        self.finish(extra)
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let height = inner.height as usize;
        self.visible_height.set(height);

        let manager = self.manager.borrow();
        let items = manager.items();
        let offset = self.offset.get().min(items.len().saturating_sub(height));
        self.offset.set(offset);

        let marker_width = display_width(&self.style.active_symbol);
        let check_width = display_width(&self.style.check_symbol);
        let show_check = manager.config().selection_mode != SelectionMode::None;
        let label_width = (inner.width as usize)
            .saturating_sub(marker_width)
            .saturating_sub(if show_check { check_width } else { 0 });

        let lines: Vec<Line> = items
            .iter()
            .skip(offset)
            .take(height)
            .map(|item| {
                let marker = if item.is_active() {
                    self.style.active_symbol.clone()
                } else {
                    " ".repeat(marker_width)
                };
                let mut spans = vec![Span::raw(marker)];
                if show_check {
                    spans.push(Span::raw(if item.is_selected() {
                        self.style.check_symbol.clone()
                    } else {
                        " ".repeat(check_width)
                    }));
                }
                spans.push(Span::raw(truncate(item.text_value(), label_width, "…")));

                let style = if item.is_disabled() {
                    self.style.disabled
                } else if item.is_active() {
                    self.style.active
                } else if item.is_selected() {
                    self.style.selected
                } else {
                    self.style.normal
                };
                Line::from(spans).style(style)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Callbacks that queue the matching outbound message.
fn forwarding(outbox: &Rc<RefCell<Vec<Message>>>) -> Callbacks<RowHandle> {
    let (actions, selections, active) = (outbox.clone(), outbox.clone(), outbox.clone());
    Callbacks::new()
        .on_action(move |key| actions.borrow_mut().push(Message::Action(key.to_string())))
        .on_selection_change(move |keys| {
            selections
                .borrow_mut()
                .push(Message::SelectionChanged(keys.to_vec()));
        })
        .on_active_item_change(move |key| {
            active
                .borrow_mut()
                .push(Message::ActiveChanged(key.map(str::to_string)));
        })
        .on_items_change(|items, change| {
            tracing::trace!(?change, count = items.len(), "listbox rows changed");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;
    use roster_core::testing::Harness;
    use std::time::Duration;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn focused(listbox: Listbox) -> Harness<Listbox> {
        let mut h = Harness::new(listbox);
        h.component_mut().focus();
        h
    }

    /// Outbound messages delivered so far.
    fn outbound(h: &Harness<Listbox>) -> Vec<Message> {
        h.emitted()
            .iter()
            .filter(|m| {
                matches!(
                    m,
                    Message::Action(_) | Message::SelectionChanged(_) | Message::ActiveChanged(_)
                )
            })
            .cloned()
            .collect()
    }

    fn single(options: &[&str]) -> Listbox {
        Listbox::new(
            options.iter().copied(),
            ListConfig::new().with_selection_mode(SelectionMode::Single),
        )
    }

    #[test]
    fn action_menu_starts_on_first_item() {
        let h = focused(Listbox::action_menu(["Copy", "Paste", "Delete"]));
        assert_eq!(h.component().active_key().as_deref(), Some("Copy"));
        assert!(h.emitted().is_empty());
    }

    #[test]
    fn action_menu_reports_actions_without_selection() {
        let mut h = focused(Listbox::action_menu(["Copy", "Paste", "Delete"]));
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Enter));
        assert_eq!(
            outbound(&h),
            vec![
                Message::ActiveChanged(Some("Paste".into())),
                Message::Action("Paste".into()),
            ]
        );
        assert!(h.component().selected_keys().is_empty());
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut h = Harness::new(Listbox::action_menu(["Copy", "Paste"]));
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().active_key().as_deref(), Some("Copy"));
    }

    #[test]
    fn single_selection_replaces() {
        let mut h = focused(single(&["a", "b", "c"]));
        h.send(key(KeyCode::Down)); // none -> a
        h.send(key(KeyCode::Enter));
        assert_eq!(h.component().selected_keys(), vec!["a"]);

        h.send(key(KeyCode::Down)); // a -> b
        h.send(key(KeyCode::Enter));
        assert_eq!(h.component().selected_keys(), vec!["b"]);
        assert!(h
            .emitted()
            .contains(&Message::SelectionChanged(vec!["b".into()])));
    }

    #[test]
    fn single_selection_keeps_last_item_without_allow_empty() {
        let mut h = focused(single(&["a", "b"]));
        h.send(Message::Click("a".into()));
        h.send(Message::Click("a".into()));
        assert_eq!(h.component().selected_keys(), vec!["a"]);
    }

    #[test]
    fn multiple_selection_toggles() {
        let listbox = Listbox::new(
            ["a", "b", "c"],
            ListConfig::new()
                .with_selection_mode(SelectionMode::Multiple)
                .with_allow_empty(true),
        );
        let mut h = focused(listbox);
        h.send(Message::Click("a".into()));
        h.send(Message::Click("c".into()));
        assert_eq!(h.component().selected_keys(), vec!["a", "c"]);
        h.send(Message::Click("a".into()));
        assert_eq!(h.component().selected_keys(), vec!["c"]);
        assert_eq!(h.component().active_key().as_deref(), Some("a"));
    }

    #[test]
    fn controlled_listbox_waits_for_parent() {
        let mut h = focused(single(&["a", "b"]).with_controlled(true));
        h.send(Message::Click("b".into()));
        assert!(h
            .emitted()
            .contains(&Message::SelectionChanged(vec!["b".into()])));
        assert!(h.component().selected_keys().is_empty());

        h.component_mut().set_selected_keys(["b"]);
        assert_eq!(h.component().selected_keys(), vec!["b"]);
    }

    #[test]
    fn disabled_items_are_skipped_and_ignored() {
        let listbox = Listbox::new(
            ["a", "b", "c"],
            ListConfig::new()
                .with_selection_mode(SelectionMode::Single)
                .with_disabled_keys(["b"]),
        );
        let mut h = focused(listbox);
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().active_key().as_deref(), Some("c"));

        h.clear_emitted();
        h.send(Message::Click("b".into()));
        assert!(outbound(&h).is_empty());
    }

    #[test]
    fn hover_and_leave() {
        let mut h = focused(single(&["a", "b"]));
        h.send(Message::Hover("b".into()));
        h.send(Message::Leave);
        assert_eq!(
            outbound(&h),
            vec![
                Message::ActiveChanged(Some("b".into())),
                Message::ActiveChanged(None),
            ]
        );
        assert_eq!(h.component().active_key(), None);
    }

    #[test]
    fn escape_clears_active() {
        let mut h = focused(Listbox::action_menu(["Copy", "Paste"]));
        h.send(key(KeyCode::Esc));
        assert_eq!(h.component().active_key(), None);
    }

    #[test]
    fn flush_follows_navigation() {
        let mut h = focused(single(&["a", "b"]));
        h.send(key(KeyCode::Down));
        // The scroll request leaves work behind, so a flush is scheduled
        // after the outbound messages.
        assert_eq!(
            h.emitted(),
            &[
                key(KeyCode::Down),
                Message::ActiveChanged(Some("a".into())),
                Message::Flush,
            ]
        );
    }

    #[test]
    fn scroll_follows_active_row() {
        let options: Vec<String> = (0..10).map(|i| format!("item {i}")).collect();
        let mut h = focused(Listbox::new(options, ListConfig::new()));
        // Paint once so the listbox knows its height.
        h.render(20, 3);
        h.send(key(KeyCode::End));
        assert_eq!(h.component().offset(), 7);
        let screen = h.render_string(20, 3);
        assert!(screen.contains("▸ item 9"), "{screen}");
        assert!(!screen.contains("item 0"));

        h.send(key(KeyCode::Home));
        assert_eq!(h.component().offset(), 0);
    }

    #[test]
    fn inserted_option_takes_its_visual_slot() {
        let mut h = focused(single(&["a", "c"]));
        let cmd = h.component_mut().insert_option(1, "b");
        h.run(cmd);
        assert_eq!(h.component().keys(), vec!["a", "b", "c"]);
        h.send(Message::Click("a".into()));
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().active_key().as_deref(), Some("b"));
    }

    #[test]
    fn removing_active_option_moves_to_first() {
        let mut h = focused(Listbox::action_menu(["Copy", "Paste", "Delete"]));
        let cmd = h.component_mut().remove_option("Copy");
        h.run(cmd);
        assert_eq!(h.component().keys(), vec!["Paste", "Delete"]);
        assert_eq!(h.component().active_key().as_deref(), Some("Paste"));
        assert!(h
            .emitted()
            .contains(&Message::ActiveChanged(Some("Paste".into()))));
        assert!(h.component_mut().remove_option("Missing").is_none());
    }

    #[test]
    fn selected_policy_starts_on_selected_item() {
        let listbox = Listbox::new(
            ["a", "b", "c"],
            ListConfig::new()
                .with_selection_mode(SelectionMode::Single)
                .with_selected_keys(["c"])
                .with_auto_activate(AutoActivate::Selected),
        );
        assert_eq!(listbox.active_key().as_deref(), Some("c"));
        assert_eq!(listbox.selected_keys(), vec!["c"]);
    }

    #[test]
    fn records_use_label_for_display() {
        let us = Candidate::Record {
            key: Some("us".into()),
            label: Some("United States".into()),
        };
        let h = Harness::new(Listbox::action_menu([us]));
        assert_eq!(h.component().keys(), vec!["us"]);
        assert!(h.render_string(30, 1).contains("United States"));
    }

    #[test]
    fn view_marks_selected_and_truncates() {
        let listbox = Listbox::new(
            ["Short", "A very long label"],
            ListConfig::new()
                .with_selection_mode(SelectionMode::Multiple)
                .with_selected_keys(["Short"]),
        );
        let h = Harness::new(listbox);
        let screen = h.render_string(12, 2);
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines[0].trim_end(), "  ✓ Short");
        assert_eq!(lines[1], "    A very …");
    }

    #[test]
    fn typing_outside_a_runtime_activates_match() {
        let mut h = focused(Listbox::new(["banana", "apple"], ListConfig::new()));
        h.send(key(KeyCode::Char('a')));
        assert_eq!(h.component().active_key().as_deref(), Some("apple"));
        assert_eq!(h.pending_futures(), 1);
    }

    #[test]
    fn space_extends_search_in_progress() {
        let listbox = Listbox::new(
            ["United Kingdom", "United States", "Uruguay"],
            ListConfig::new().with_selection_mode(SelectionMode::Single),
        );
        let mut h = focused(listbox);
        for c in "united s".chars() {
            h.send(key(KeyCode::Char(c)));
        }
        assert_eq!(h.component().search_query(), "united s");
        assert_eq!(h.component().active_key().as_deref(), Some("United States"));
        assert!(outbound(&h)
            .iter()
            .all(|m| !matches!(m, Message::Action(_) | Message::SelectionChanged(_))));
    }

    #[test]
    fn space_commits_when_not_searching() {
        let mut h = focused(Listbox::action_menu(["Copy", "Paste"]));
        h.send(key(KeyCode::Char(' ')));
        assert_eq!(outbound(&h), vec![Message::Action("Copy".into())]);
        assert_eq!(h.pending_futures(), 0);
    }

    #[tokio::test]
    async fn type_ahead_activates_and_expires() {
        let listbox = Listbox::new(
            ["banana", "apple", "apricot"],
            ListConfig::new().with_search_timeout(Duration::from_millis(50)),
        );
        let mut h = focused(listbox);
        h.send(key(KeyCode::Char('a')));
        assert_eq!(h.component().active_key().as_deref(), Some("apple"));
        h.send(key(KeyCode::Char('p')));
        h.send(key(KeyCode::Char('r')));
        assert_eq!(h.component().active_key().as_deref(), Some("apricot"));
        assert_eq!(h.component().search_query(), "apr");
        assert_eq!(h.pending_futures(), 3);

        h.settle().await;
        // Only the timer armed by the last key clears the query.
        assert_eq!(h.component().search_query(), "");
        assert_eq!(
            h.emitted()
                .iter()
                .filter(|m| matches!(m, Message::SearchExpired(_)))
                .count(),
            3
        );

        h.send(key(KeyCode::Char('b')));
        assert_eq!(h.component().active_key().as_deref(), Some("banana"));
    }

    #[tokio::test]
    async fn failed_search_keeps_active_item() {
        let listbox = Listbox::new(
            ["banana", "apple"],
            ListConfig::new().with_search_timeout(Duration::from_millis(20)),
        );
        let mut h = focused(listbox);
        h.send(key(KeyCode::Char('b')));
        h.send(key(KeyCode::Char('x')));
        assert_eq!(h.component().active_key().as_deref(), Some("banana"));
        h.settle().await;
    }
}
