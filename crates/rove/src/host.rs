//! Host environment capability traits.
//!
//! Rove does not touch a real node tree; it drives one through four narrow
//! capabilities the host implements:
//!
//! - [`TreeQuery`]: selector queries, containment, nearest-ancestor lookup
//! - [`FocusControl`]: moving input focus and reading/writing tab priority
//! - [`EventBinding`]: attaching and detaching named event listeners
//! - [`ChildListObserver`]: subscribing to structural child-list changes
//!
//! [`HostTree`] bundles all four so manager operations carry a single bound.
//!
//! Live events flow the other way: the host calls the manager's dispatch
//! entry points (`dispatch_key_down`, `dispatch_focus_in`, ...) when one of
//! the attached listeners fires, and feeds mutation batches into
//! `child_list_changed` for each active subscription. The attach/detach and
//! observe/disconnect bookkeeping is what lets hosts (and tests) verify that
//! listeners are installed once and removed on teardown.

use rove_core::NodeId;

/// Tab priority marking an element reachable via sequential keyboard
/// navigation.
pub const TAB_REACHABLE: i32 = 0;

/// Tab priority marking an element skipped by sequential keyboard
/// navigation.
pub const TAB_SKIP: i32 = -1;

/// Opaque token for an attached event listener, allocated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Opaque token for a child-list subscription, allocated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The event types the manager listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A key was pressed.
    KeyDown,
    /// Focus entered a node (or a descendant of it).
    FocusIn,
    /// Focus left a node (or a descendant of it).
    FocusOut,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listen {
    /// The top-level event scope; sees every event in the process.
    Window,
    /// A specific node; sees events targeting it or its descendants.
    Node(NodeId),
}

/// Selector query capability.
///
/// Selectors are host-interpreted strings. The manager only ever passes
/// through what callers configure, plus the built-in form-control and
/// editable-region selectors used for input guarding.
pub trait TreeQuery {
    /// All descendants of `root` matching `selector`, in document order.
    fn query(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Whether a single node matches `selector`.
    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// The nearest ancestor-or-self of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    /// Whether `node` is `ancestor` itself or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;
}

/// Focus control capability.
pub trait FocusControl {
    /// Move input focus to `node`. `prevent_scroll` asks the host not to
    /// scroll the node into view.
    fn focus(&mut self, node: NodeId, prevent_scroll: bool);

    /// Write a node's tab priority ([`TAB_REACHABLE`] or [`TAB_SKIP`]).
    fn set_tab_index(&mut self, node: NodeId, index: i32);

    /// Read a node's tab priority.
    fn tab_index(&self, node: NodeId) -> i32;
}

/// Event source capability.
pub trait EventBinding {
    /// Attach a listener; `capture` requests capture-phase delivery.
    fn attach(&mut self, scope: Listen, kind: EventKind, capture: bool) -> ListenerId;

    /// Detach a previously attached listener. Unknown ids are a no-op.
    fn detach(&mut self, listener: ListenerId);
}

/// Structural mutation notifier capability.
///
/// While a subscription is active the host must report every child-list
/// change under `root` by calling
/// [`RovingManager::child_list_changed`](crate::RovingManager::child_list_changed)
/// with the batch of added nodes (which may be empty for pure removals).
pub trait ChildListObserver {
    /// Start observing child-list changes under `root`.
    fn observe(&mut self, root: NodeId) -> SubscriptionId;

    /// Stop an observation. Unknown ids are a no-op.
    fn disconnect(&mut self, subscription: SubscriptionId);
}

/// Everything the roving manager needs from a host, in one bound.
pub trait HostTree: TreeQuery + FocusControl + EventBinding + ChildListObserver {}

impl<T: TreeQuery + FocusControl + EventBinding + ChildListObserver> HostTree for T {}

static_assertions::assert_obj_safe!(TreeQuery, FocusControl, EventBinding, ChildListObserver);
