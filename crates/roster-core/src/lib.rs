//! Selection and activation state for list-like widgets.
//!
//! `roster-core` owns the logical model behind listboxes, menus and selects:
//! which items exist (in visual order), which are selected, which one is
//! active for keyboard interaction, and what the user has typed for
//! type-ahead. It knows nothing about rendering; widgets plug in through the
//! [`ItemHandle`] trait and observe changes through [`Callbacks`].
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ListManager`] | Registry, selection, navigation and type-ahead for one widget |
//! | [`ItemHandle`] | What a widget's row provides: visual order, commit, scroll |
//! | [`ListConfig`] | Selection mode, controlled key sets, auto-activate policy |
//! | [`Callbacks`] | `on_action`, `on_selection_change`, `on_items_change`, `on_active_item_change` |
//! | [`Registration`] | Guard that unregisters a row when dropped |
//! | [`Component`] / [`Command`] | The seam widgets implement on top of a manager |
//! | [`Harness`](testing::Harness) | Headless driver for testing components |
//!
//! # Event flow
//!
//! 1. **mount** -- each row registers its handle; the manager keeps items in
//!    visual order and schedules one settle pass for the auto-activate policy.
//! 2. **input** -- keys and pointer events become manager calls
//!    ([`ListManager::activate_next`], [`ListManager::search`],
//!    [`ListManager::select`], ...).
//! 3. **notify** -- the manager fires callbacks; a selection change is only a
//!    proposal until the widget reflects it back with
//!    [`ListManager::apply_config`].
//! 4. **flush** -- after the batch settles (and the frame is painted) the
//!    widget calls [`ListManager::flush`] to run deferred activation and
//!    scroll-into-view requests.

pub mod callbacks;
pub mod command;
pub mod component;
pub mod config;
mod deferred;
pub mod error;
pub mod handle;
pub mod item;
pub mod label;
pub mod manager;
pub mod registration;
pub mod selection;
pub mod testing;
pub mod type_ahead;

pub use callbacks::{Callbacks, ItemsChange};
pub use command::Command;
pub use component::Component;
pub use config::{AutoActivate, ListConfig, SelectionMode, DEFAULT_SEARCH_TIMEOUT};
pub use error::ParseModeError;
pub use handle::ItemHandle;
pub use item::{Item, ItemArgs};
pub use label::{derive_key_and_label, Candidate, KeyLabel};
pub use manager::ListManager;
pub use registration::{register_scoped, Registration};
