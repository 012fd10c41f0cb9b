//! Registered items and the descriptor used to register them.

/// One registered entry of a list-like widget.
///
/// Items are created by [`ListManager::register`](crate::ListManager::register)
/// and dropped by [`ListManager::unregister`](crate::ListManager::unregister);
/// a re-registered key always starts from a fresh `Item`. Flags are mutated
/// only by the manager, observers read them through the accessors.
#[derive(Debug, Clone)]
pub struct Item<H> {
    key: String,
    text_value: String,
    is_selected: bool,
    is_disabled: bool,
    is_active: bool,
    handle: H,
}

impl<H> Item<H> {
    pub(crate) fn from_args(handle: H, args: ItemArgs) -> Self {
        Self {
            key: args.key,
            text_value: args.text_value.unwrap_or_default(),
            is_selected: args.is_selected,
            is_disabled: args.is_disabled,
            is_active: false,
            handle,
        }
    }

    /// The caller-supplied key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display text used for type-ahead matching.
    pub fn text_value(&self) -> &str {
        &self.text_value
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// The presentation handle this item was registered with.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.is_disabled = disabled;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Whether the trimmed, lowercased display text starts with `prefix`.
    ///
    /// `prefix` is expected to be lowercase already.
    pub(crate) fn matches_prefix(&self, prefix: &str) -> bool {
        self.text_value.trim().to_lowercase().starts_with(prefix)
    }
}

/// Descriptor passed to [`ListManager::register`](crate::ListManager::register).
///
/// ```
/// use roster_core::ItemArgs;
///
/// let args = ItemArgs::new("apple").text("Apple").disabled(true);
/// assert_eq!(args.key, "apple");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemArgs {
    /// Unique key of the item. Uniqueness is the caller's responsibility.
    pub key: String,
    /// Text used for type-ahead; the item never matches a search without it.
    pub text_value: Option<String>,
    pub is_selected: bool,
    pub is_disabled: bool,
    /// Request activation on registration. Ignored for disabled items.
    pub is_active: bool,
}

impl ItemArgs {
    /// Create a descriptor with the given key and every flag cleared.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the display text used for type-ahead.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}
