//! Core types for Rove.
//!
//! This crate is the pure, host-independent layer of the Rove roving-focus
//! toolkit:
//!
//! - **Node identity**: [`NodeId`], the opaque key hosts use for their nodes
//! - **Event records**: [`KeyEvent`], [`FocusEvent`], [`KeyboardModifiers`]
//! - **Keybinding codec**: [`Keybinding`], parsing shortcut strings and
//!   matching them against live key events
//! - **Logging**: `tracing` targets and macros shared across the workspace
//!
//! Everything here is synchronous, deterministic and free of I/O. The
//! stateful roving group manager lives in the `rove` crate.
//!
//! # Example
//!
//! ```
//! use rove_core::{Keybinding, KeyboardModifiers};
//!
//! let save = Keybinding::parse("ctrl+s");
//! assert_eq!(save.key, "s");
//! assert_eq!(save.modifiers, KeyboardModifiers::CTRL);
//! ```

pub mod event;
pub mod keybinding;
pub mod logging;
pub mod node;

pub use event::{EventBase, FocusEvent, KeyEvent, KeyboardModifiers};
pub use keybinding::Keybinding;
pub use node::NodeId;
