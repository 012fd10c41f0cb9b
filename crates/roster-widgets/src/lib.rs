//! Terminal listbox and menu widgets built on [`roster_core`].
//!
//! Every widget here implements [`roster_core::Component`] and draws with
//! [`ratatui`].
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`listbox`] | Single/multiple-select listbox and action menu |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Key bindings and the actions they resolve to |
//! | [`rows`] | Row slots whose handles report their visual position |
//! | [`text`] | Unicode-aware width and truncation |

pub mod key;
pub mod listbox;
pub mod rows;
pub mod text;

pub use listbox::{Listbox, ListboxStyle, Message};
