//! Roving-tabindex focus management for retained node trees.
//!
//! This crate keeps keyboard focus well-behaved across groups of related
//! interactive elements (toolbars, menus, list boxes): within a registered
//! group exactly one element participates in sequential Tab navigation at a
//! time, arrow keys move which one with circular wrap-around, and shortcut
//! bindings written as plain strings (`"ctrl+shift+k"`) dispatch to the
//! group that currently owns focus.
//!
//! The host environment is abstracted behind the traits in [`host`]; the
//! crate itself never assumes a particular tree or event-loop
//! implementation. See [`RovingManager`] for the entry point.

pub mod host;
pub mod rover;

pub use host::{
    ChildListObserver, EventBinding, EventKind, FocusControl, HostTree, Listen, ListenerId,
    SubscriptionId, TreeQuery, TAB_REACHABLE, TAB_SKIP,
};
pub use rover::{
    BindingHandler, DispatchResult, RoverHandle, RoverOptions, RovingManager, SelectCallback,
    DEFAULT_TARGET_SELECTOR,
};

// Re-export the core vocabulary so applications depend on this crate alone.
pub use rove_core::{
    EventBase, FocusEvent, KeyEvent, KeyboardModifiers, Keybinding, NodeId,
};
