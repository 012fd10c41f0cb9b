//! Configuration pushed into the manager by the owning widget.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ParseModeError;

/// How many items may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection is never performed; `select` only reports an action.
    #[default]
    None,
    /// At most one item is selected.
    Single,
    /// Any number of items may be selected.
    Multiple,
}

/// Which item becomes active automatically when the item set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoActivate {
    #[default]
    None,
    /// The first enabled item.
    First,
    /// The first selected, enabled item, falling back to the first enabled one.
    Selected,
}

impl FromStr for SelectionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            other => Err(ParseModeError::SelectionMode(other.to_string())),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multiple => "multiple",
        })
    }
}

impl FromStr for AutoActivate {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "first" => Ok(Self::First),
            "selected" => Ok(Self::Selected),
            other => Err(ParseModeError::AutoActivate(other.to_string())),
        }
    }
}

impl fmt::Display for AutoActivate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::First => "first",
            Self::Selected => "selected",
        })
    }
}

/// Default quiet period after which the type-ahead buffer is cleared.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(500);

/// Selection and activation policy for a [`ListManager`](crate::ListManager).
///
/// Applied with [`ListManager::apply_config`](crate::ListManager::apply_config)
/// whenever the owning widget's configuration changes. Applying the same
/// configuration twice is a no-op.
///
/// ```
/// use roster_core::{AutoActivate, ListConfig, SelectionMode};
///
/// let config = ListConfig::new()
///     .with_selection_mode(SelectionMode::Single)
///     .with_auto_activate(AutoActivate::Selected)
///     .with_selected_keys(["banana"]);
/// assert!(!config.allow_empty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub selection_mode: SelectionMode,
    /// Keys whose items are selected. Controlled by the owning widget.
    pub selected_keys: Vec<String>,
    pub disabled_keys: Vec<String>,
    /// Whether the last selected item may be deselected.
    pub allow_empty: bool,
    pub auto_activate: AutoActivate,
    /// Quiet period after which the type-ahead buffer starts over.
    pub search_timeout: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::default(),
            selected_keys: Vec::new(),
            disabled_keys: Vec::new(),
            allow_empty: false,
            auto_activate: AutoActivate::default(),
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

impl ListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_selected_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_disabled_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn with_auto_activate(mut self, auto_activate: AutoActivate) -> Self {
        self.auto_activate = auto_activate;
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub(crate) fn is_selected(&self, key: &str) -> bool {
        self.selected_keys.iter().any(|k| k == key)
    }

    pub(crate) fn is_disabled(&self, key: &str) -> bool {
        self.disabled_keys.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_from_strings() {
        assert_eq!("single".parse::<SelectionMode>(), Ok(SelectionMode::Single));
        assert_eq!("multiple".parse::<SelectionMode>(), Ok(SelectionMode::Multiple));
        assert_eq!("none".parse::<SelectionMode>(), Ok(SelectionMode::None));
        assert_eq!("selected".parse::<AutoActivate>(), Ok(AutoActivate::Selected));
        assert_eq!("first".parse::<AutoActivate>(), Ok(AutoActivate::First));
    }

    #[test]
    fn unknown_modes_are_errors() {
        let err = "Single".parse::<SelectionMode>().unwrap_err();
        assert_eq!(err, ParseModeError::SelectionMode("Single".into()));
        assert!(err.to_string().contains("`Single`"));

        let err = "last".parse::<AutoActivate>().unwrap_err();
        assert_eq!(err, ParseModeError::AutoActivate("last".into()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in [SelectionMode::None, SelectionMode::Single, SelectionMode::Multiple] {
            assert_eq!(mode.to_string().parse::<SelectionMode>(), Ok(mode));
        }
    }

    #[test]
    fn defaults() {
        let config = ListConfig::default();
        assert_eq!(config.selection_mode, SelectionMode::None);
        assert_eq!(config.auto_activate, AutoActivate::None);
        assert_eq!(config.search_timeout, Duration::from_millis(500));
        assert!(!config.allow_empty);
    }

    #[test]
    fn key_membership() {
        let config = ListConfig::new()
            .with_selected_keys(["a", "b"])
            .with_disabled_keys(vec!["c".to_string()]);
        assert!(config.is_selected("b"));
        assert!(!config.is_selected("c"));
        assert!(config.is_disabled("c"));
    }
}
