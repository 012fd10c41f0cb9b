//! Key bindings for listbox navigation.
//!
//! A [`Binding`] groups the key combinations that trigger one
//! [`ListAction`]. [`ListKeyBindings::resolve`] turns a key event into the
//! action it triggers; keys nobody claims can still feed type-ahead through
//! [`search_input`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A set of key combinations with a description for help lines.
#[derive(Debug, Clone)]
pub struct Binding {
    pub keys: Vec<KeyCombination>,
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// A key code plus the modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Binding {
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` matches one of the combinations.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// What a key press asks the listbox to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Previous,
    Next,
    First,
    Last,
    /// Commit the active item.
    Commit,
    /// Drop the active item.
    Leave,
}

/// Key bindings for a [`Listbox`](crate::listbox::Listbox).
///
/// Letter keys are not bound by default so they reach type-ahead.
#[derive(Debug, Clone)]
pub struct ListKeyBindings {
    /// Default: Up, Ctrl+P
    pub previous: Binding,
    /// Default: Down, Ctrl+N
    pub next: Binding,
    /// Default: Home
    pub first: Binding,
    /// Default: End
    pub last: Binding,
    /// Default: Enter, Space
    pub commit: Binding,
    /// Default: Esc
    pub leave: Binding,
}

impl Default for ListKeyBindings {
    fn default() -> Self {
        Self {
            previous: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::ctrl(KeyCode::Char('p')),
                ],
                "Previous",
            ),
            next: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::ctrl(KeyCode::Char('n')),
                ],
                "Next",
            ),
            first: Binding::new(KeyCombination::new(KeyCode::Home), "First"),
            last: Binding::new(KeyCombination::new(KeyCode::End), "Last"),
            commit: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "Choose",
            ),
            leave: Binding::new(KeyCombination::new(KeyCode::Esc), "Leave"),
        }
    }
}

impl ListKeyBindings {
    /// The action `event` triggers, if any. Release events never match.
    pub fn resolve(&self, event: &KeyEvent) -> Option<ListAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        [
            (&self.previous, ListAction::Previous),
            (&self.next, ListAction::Next),
            (&self.first, ListAction::First),
            (&self.last, ListAction::Last),
            (&self.commit, ListAction::Commit),
            (&self.leave, ListAction::Leave),
        ]
        .into_iter()
        .find_map(|(binding, action)| binding.matches(event).then_some(action))
    }

    /// The bindings in display order, for a help line.
    pub fn help(&self) -> Vec<&Binding> {
        vec![
            &self.previous,
            &self.next,
            &self.first,
            &self.last,
            &self.commit,
            &self.leave,
        ]
    }
}

/// The text a key press contributes to type-ahead.
///
/// Printable characters typed without Ctrl or Alt count; everything else
/// returns `None`.
pub fn search_input(event: &KeyEvent) -> Option<String> {
    if event.kind == KeyEventKind::Release
        || event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match event.code {
        KeyCode::Char(c) if !c.is_control() => Some(c.to_string()),
        _ => None,
    }
}
