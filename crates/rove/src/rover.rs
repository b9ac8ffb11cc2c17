//! The roving group manager.
//!
//! A *rover* is a container node managing roving-tabindex behavior over a
//! group of candidate descendants: exactly one candidate is reachable via
//! sequential keyboard navigation at a time, arrow keys move which one, and
//! shortcut bindings fire against whichever group currently owns focus.
//!
//! [`RovingManager`] is an explicit context object constructed once per
//! application and threaded through every call, together with the host tree.
//! It owns all registration state, the focus pointer routing global shortcut
//! events, and the single process-wide shortcut listener (installed lazily
//! when the first shortcut-bearing rover registers, removed when the last
//! one is torn down).
//!
//! # Usage
//!
//! ```ignore
//! use rove::{RovingManager, RoverOptions};
//!
//! let mut manager = RovingManager::new();
//!
//! let handle = manager.register(
//!     &mut tree,
//!     toolbar,
//!     RoverOptions::new()
//!         .with_target("button")
//!         .bind("ctrl+k", |item, index| println!("{item:?} at {index}")),
//! );
//!
//! // Host event loop feeds events in:
//! manager.dispatch_key_down(&mut tree, &mut key_event);
//!
//! // Teardown:
//! manager.deregister(&mut tree, handle);
//! ```

use std::collections::HashMap;

use rove_core::logging::targets;
use rove_core::{rove_debug, rove_trace, rove_warn, FocusEvent, KeyEvent, Keybinding, NodeId};

use crate::host::{
    EventKind, HostTree, Listen, ListenerId, SubscriptionId, TAB_REACHABLE, TAB_SKIP,
};

/// Candidate selector used when a registration does not configure one:
/// the rover's direct children.
pub const DEFAULT_TARGET_SELECTOR: &str = ":scope > *";

/// Event targets matching this never trigger navigation or shortcuts.
const FORM_CONTROL_SELECTOR: &str = "input, textarea, select, button";

/// Event targets inside a region matching this never trigger navigation or
/// shortcuts.
const EDITABLE_SELECTOR: &str = "[contenteditable=\"true\"]";

/// Selection-change notifier: activated element, its index, and the cyclic
/// previous/next indices computed from the post-activation position.
pub type SelectCallback = Box<dyn FnMut(NodeId, usize, usize, usize)>;

/// Shortcut handler: the target element owning the event and its index
/// within the rover's candidates.
pub type BindingHandler = Box<dyn FnMut(NodeId, usize)>;

/// Configuration for a rover registration.
///
/// Binding insertion order is the shortcut evaluation order: the first
/// binding matching an event wins and later ones are never consulted.
#[derive(Default)]
pub struct RoverOptions {
    target: Option<String>,
    start_index: usize,
    callback: Option<SelectCallback>,
    bindings: Vec<(String, BindingHandler)>,
    prevent_default: bool,
    prevent_scroll: bool,
}

impl RoverOptions {
    /// Create options with all defaults: direct children as candidates,
    /// start index 0, no callback, no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate selector, evaluated relative to the rover node.
    pub fn with_target(mut self, selector: impl Into<String>) -> Self {
        self.target = Some(selector.into());
        self
    }

    /// Set the index of the candidate that starts out tab-reachable.
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Set the selection-change callback.
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(NodeId, usize, usize, usize) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Add a shortcut binding. The string is parsed with
    /// [`Keybinding::parse`] at registration time; it cannot fail, but a
    /// malformed shortcut will simply never match.
    pub fn bind<F>(mut self, shortcut: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(NodeId, usize) + 'static,
    {
        self.bindings.push((shortcut.into(), Box::new(handler)));
        self
    }

    /// Suppress the default action of any key event matching one of this
    /// rover's bindings, even when no handler ends up invoked.
    pub fn with_prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Ask the host not to scroll elements into view when activation moves
    /// focus.
    pub fn with_prevent_scroll(mut self, prevent: bool) -> Self {
        self.prevent_scroll = prevent;
        self
    }
}

/// Handle for a registered rover, consumed by
/// [`RovingManager::deregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoverHandle {
    rover: NodeId,
}

impl RoverHandle {
    /// The rover node this handle refers to.
    pub fn node(&self) -> NodeId {
        self.rover
    }
}

/// Result of feeding an event into the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The event moved activation or invoked a shortcut handler; its default
    /// action and propagation were suppressed.
    Accepted,
    /// The event was not handled; no state changed.
    Ignored,
}

impl DispatchResult {
    /// Check if the event was handled.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Per-rover registration state.
struct RoverState {
    /// Candidate selector, evaluated relative to the rover node.
    selector: String,
    /// Candidates in document order, refreshed on structural mutation.
    targets: Vec<NodeId>,
    /// The one candidate that is tab-reachable. `None` only while the rover
    /// has no candidates (or the start index was out of range).
    active: Option<NodeId>,
    /// Offset of `active` within `targets`; consistent at every transition.
    index: usize,
    callback: Option<SelectCallback>,
    /// Parsed bindings in insertion order; first match wins.
    bindings: Vec<(Keybinding, BindingHandler)>,
    prevent_default: bool,
    prevent_scroll: bool,
    /// Local KeyDown/FocusIn/FocusOut listeners, detached on teardown.
    listeners: [ListenerId; 3],
    subscription: SubscriptionId,
}

/// Coordinates roving focus across all registered rovers.
///
/// See the [module docs](self) for the overall model. All methods are
/// synchronous and run to completion; `&mut self` receivers make handler
/// atomicity a compile-time guarantee.
#[derive(Default)]
pub struct RovingManager {
    rovers: HashMap<NodeId, RoverState>,
    /// The rover currently owning keyboard focus, routing shortcut events.
    scope: Option<NodeId>,
    /// Most recently activated rover; suppresses re-activation when focus
    /// re-enters without having left.
    last_rover: Option<NodeId>,
    /// The single process-wide capture-phase shortcut listener.
    global_listener: Option<ListenerId>,
    /// Number of live registrations carrying bindings; the listener is
    /// installed on the 0 -> 1 transition and removed on 1 -> 0.
    shortcut_rovers: usize,
}

impl RovingManager {
    /// Create a manager with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rover and return its teardown handle.
    ///
    /// Resolves the candidate set, marks exactly the start candidate
    /// tab-reachable (the rover container itself is never a tab stop),
    /// parses the shortcut bindings, attaches the local listeners and the
    /// mutation subscription, and installs the global shortcut listener if
    /// this is the first shortcut-bearing registration.
    ///
    /// Registering a node that is already registered tears the previous
    /// registration down first.
    pub fn register<S: HostTree>(
        &mut self,
        tree: &mut S,
        rover: NodeId,
        options: RoverOptions,
    ) -> RoverHandle {
        if self.rovers.contains_key(&rover) {
            self.deregister(tree, RoverHandle { rover });
        }

        let RoverOptions {
            target,
            start_index,
            callback,
            bindings,
            prevent_default,
            prevent_scroll,
        } = options;

        let selector = target.unwrap_or_else(|| DEFAULT_TARGET_SELECTOR.to_string());
        let targets = tree.query(rover, &selector);
        let active = targets.get(start_index).copied();
        if active.is_none() && !targets.is_empty() {
            rove_warn!(?rover, start_index, "start index out of range, nothing promoted");
        }

        tree.set_tab_index(rover, TAB_SKIP);
        for (i, &item) in targets.iter().enumerate() {
            let priority = if i == start_index { TAB_REACHABLE } else { TAB_SKIP };
            tree.set_tab_index(item, priority);
        }

        let bindings: Vec<(Keybinding, BindingHandler)> = bindings
            .into_iter()
            .map(|(shortcut, handler)| (Keybinding::parse(&shortcut), handler))
            .collect();

        let listeners = [
            tree.attach(Listen::Node(rover), EventKind::KeyDown, false),
            tree.attach(Listen::Node(rover), EventKind::FocusIn, false),
            tree.attach(Listen::Node(rover), EventKind::FocusOut, false),
        ];

        if !bindings.is_empty() {
            if self.shortcut_rovers == 0 {
                self.global_listener =
                    Some(tree.attach(Listen::Window, EventKind::KeyDown, true));
                rove_debug!("installed global shortcut listener");
            }
            self.shortcut_rovers += 1;
        }

        let subscription = tree.observe(rover);

        rove_debug!(
            ?rover,
            targets = targets.len(),
            bindings = bindings.len(),
            "registered rover"
        );

        self.rovers.insert(
            rover,
            RoverState {
                selector,
                targets,
                active,
                index: start_index,
                callback,
                bindings,
                prevent_default,
                prevent_scroll,
                listeners,
                subscription,
            },
        );

        RoverHandle { rover }
    }

    /// Tear a registration down: detach its local listeners, disconnect its
    /// mutation subscription and drop its state. Removes the global
    /// shortcut listener when the last shortcut-bearing registration goes
    /// away, re-arming lazy installation for future registrations.
    ///
    /// Unknown handles are a silent no-op.
    pub fn deregister<S: HostTree>(&mut self, tree: &mut S, handle: RoverHandle) {
        let Some(state) = self.rovers.remove(&handle.rover) else {
            return;
        };

        for listener in state.listeners {
            tree.detach(listener);
        }
        tree.disconnect(state.subscription);

        if !state.bindings.is_empty() {
            self.shortcut_rovers -= 1;
            if self.shortcut_rovers == 0
                && let Some(listener) = self.global_listener.take()
            {
                tree.detach(listener);
                rove_debug!("removed global shortcut listener");
            }
        }

        if self.scope == Some(handle.rover) {
            self.scope = None;
        }
        if self.last_rover == Some(handle.rover) {
            self.last_rover = None;
        }

        rove_debug!(rover = ?handle.rover, "deregistered rover");
    }

    /// Feed a key-down event in.
    ///
    /// The global shortcut listener runs first (it is attached in the
    /// capture phase, so it sees the event before node-local delivery); a
    /// matched-and-dispatched shortcut stops propagation and suppresses
    /// arrow navigation. Otherwise the event falls through to arrow-key
    /// navigation on the innermost registered rover containing its target.
    pub fn dispatch_key_down<S: HostTree>(
        &mut self,
        tree: &mut S,
        event: &mut KeyEvent,
    ) -> DispatchResult {
        if self.global_listener.is_some()
            && self.dispatch_shortcut(tree, event).was_handled()
        {
            return DispatchResult::Accepted;
        }
        self.dispatch_navigation(tree, event)
    }

    /// Feed a focus-in event in.
    ///
    /// Sets the focus pointer to the rover owning the newly focused node.
    /// If that rover was already the most recently activated one the event
    /// is a re-entry and nothing further happens; otherwise activation is
    /// re-run on the recorded active element, re-affirming its tab priority
    /// and notifying the selection callback.
    pub fn dispatch_focus_in<S: HostTree>(&mut self, tree: &mut S, event: &FocusEvent) {
        let Some(rover) = self.owning_rover(tree, event.target) else {
            return;
        };

        self.scope = Some(rover);
        if self.last_rover == Some(rover) {
            return;
        }
        self.last_rover = Some(rover);
        rove_trace!(?rover, "focus entered rover");

        let Some(state) = self.rovers.get(&rover) else {
            return;
        };
        if state.active.is_some() {
            let index = state.index;
            self.activate(tree, rover, index);
        }
    }

    /// Feed a focus-out event in.
    ///
    /// Clears the focus pointer unless focus merely moved to another node
    /// still contained in the focused rover.
    pub fn dispatch_focus_out<S: HostTree>(&mut self, tree: &S, event: &FocusEvent) {
        let Some(rover) = self.scope else {
            return;
        };
        if let Some(related) = event.related_target
            && tree.contains(rover, related)
        {
            return;
        }
        rove_trace!(?rover, "focus left rover");
        self.scope = None;
    }

    /// Feed a child-list change batch in for a registered rover.
    ///
    /// Newly added nodes matching the candidate selector are forced
    /// tab-skipped (only the active element may be reachable), the
    /// candidate set is re-queried and the active index re-seated. If the
    /// active element itself was removed, the candidate at the clamped old
    /// index inherits tab-reachability. Priority only: input focus does not
    /// move and the callback is not notified.
    pub fn child_list_changed<S: HostTree>(
        &mut self,
        tree: &mut S,
        rover: NodeId,
        added: &[NodeId],
    ) {
        let Some(state) = self.rovers.get_mut(&rover) else {
            return;
        };

        for &node in added {
            if tree.matches(node, &state.selector) {
                tree.set_tab_index(node, TAB_SKIP);
            }
        }

        state.targets = tree.query(rover, &state.selector);
        rove_trace!(?rover, targets = state.targets.len(), "reindexed rover");

        if state.targets.is_empty() {
            state.active = None;
            state.index = 0;
            return;
        }

        match state
            .active
            .and_then(|active| state.targets.iter().position(|&t| t == active))
        {
            Some(position) => state.index = position,
            None => {
                let index = state.index.min(state.targets.len() - 1);
                let item = state.targets[index];
                state.active = Some(item);
                state.index = index;
                tree.set_tab_index(item, TAB_REACHABLE);
            }
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The rover currently owning keyboard focus, if any.
    pub fn scope(&self) -> Option<NodeId> {
        self.scope
    }

    /// Number of live registrations.
    pub fn rover_count(&self) -> usize {
        self.rovers.len()
    }

    /// Check if a node has a live registration.
    pub fn is_registered(&self, node: NodeId) -> bool {
        self.rovers.contains_key(&node)
    }

    /// The active candidate of a registered rover.
    pub fn active_node(&self, rover: NodeId) -> Option<NodeId> {
        self.rovers.get(&rover).and_then(|state| state.active)
    }

    /// The active candidate's index within a registered rover.
    pub fn active_index(&self, rover: NodeId) -> Option<usize> {
        let state = self.rovers.get(&rover)?;
        state.active.map(|_| state.index)
    }

    /// The candidate set of a registered rover, in document order.
    pub fn targets(&self, rover: NodeId) -> Option<&[NodeId]> {
        self.rovers.get(&rover).map(|state| state.targets.as_slice())
    }

    /// Whether the process-wide shortcut listener is currently installed.
    pub fn has_global_listener(&self) -> bool {
        self.global_listener.is_some()
    }

    // =========================================================================
    // Internal dispatch
    // =========================================================================

    /// Global shortcut dispatch against the focused rover's bindings.
    fn dispatch_shortcut<S: HostTree>(
        &mut self,
        tree: &mut S,
        event: &mut KeyEvent,
    ) -> DispatchResult {
        let Some(scope) = self.scope else {
            return DispatchResult::Ignored;
        };
        let Some(state) = self.rovers.get_mut(&scope) else {
            return DispatchResult::Ignored;
        };
        if state.bindings.is_empty() || in_form_context(tree, event.target) {
            return DispatchResult::Ignored;
        }

        let Some(matched) = state
            .bindings
            .iter()
            .position(|(binding, _)| binding.matches(event))
        else {
            return DispatchResult::Ignored;
        };

        if state.prevent_default {
            event.prevent_default();
        }

        // The binding exists, but it only fires for targets inside the group.
        let Some(position) = state
            .targets
            .iter()
            .position(|&item| tree.contains(item, event.target))
        else {
            return DispatchResult::Ignored;
        };

        event.prevent_default();
        event.stop_propagation();

        let item = state.targets[position];
        tracing::trace!(
            target: targets::DISPATCH,
            rover = ?scope,
            binding = %state.bindings[matched].0,
            index = position,
            "shortcut matched"
        );
        (state.bindings[matched].1)(item, position);
        DispatchResult::Accepted
    }

    /// Arrow-key navigation local to the rover owning the event target.
    fn dispatch_navigation<S: HostTree>(
        &mut self,
        tree: &mut S,
        event: &mut KeyEvent,
    ) -> DispatchResult {
        let Some(rover) = self.owning_rover(tree, event.target) else {
            return DispatchResult::Ignored;
        };
        if in_form_context(tree, event.target) {
            return DispatchResult::Ignored;
        }

        let delta: isize = match event.key.as_str() {
            "ArrowUp" | "ArrowLeft" => -1,
            "ArrowDown" | "ArrowRight" => 1,
            _ => return DispatchResult::Ignored,
        };

        event.prevent_default();
        event.stop_propagation();
        self.move_active(tree, rover, delta);
        DispatchResult::Accepted
    }

    /// The innermost registered rover containing `node`, if any.
    fn owning_rover<S: HostTree>(&self, tree: &S, node: NodeId) -> Option<NodeId> {
        self.rovers
            .keys()
            .copied()
            .filter(|&rover| tree.contains(rover, node))
            .reduce(|outer, other| if tree.contains(outer, other) { other } else { outer })
    }

    /// Shift the active index by `delta` with circular wrap-around.
    fn move_active<S: HostTree>(&mut self, tree: &mut S, rover: NodeId, delta: isize) {
        let Some(state) = self.rovers.get(&rover) else {
            return;
        };
        let len = state.targets.len();
        if len == 0 {
            return;
        }

        let next = state.index as isize + delta;
        let next = if next < 0 { len - 1 } else { next as usize % len };
        self.activate(tree, rover, next);
    }

    /// Make the candidate at `index` the active element: demote the old
    /// one, promote and focus the new one, and notify the callback with the
    /// post-move cyclic previous/next indices.
    fn activate<S: HostTree>(&mut self, tree: &mut S, rover: NodeId, index: usize) {
        let Some(state) = self.rovers.get_mut(&rover) else {
            return;
        };
        let Some(&item) = state.targets.get(index) else {
            return;
        };

        if let Some(previous) = state.active {
            tree.set_tab_index(previous, TAB_SKIP);
        }
        state.active = Some(item);
        state.index = index;
        tree.set_tab_index(item, TAB_REACHABLE);
        tree.focus(item, state.prevent_scroll);

        let len = state.targets.len();
        let previous = if index == 0 { len - 1 } else { index - 1 };
        let next = if index + 1 > len - 1 { 0 } else { index + 1 };

        rove_trace!(?rover, index, "activated");

        if let Some(callback) = state.callback.as_mut() {
            callback(item, index, previous, next);
        }
    }
}

/// Check if a node is a form control or sits inside an editable region;
/// such targets must never have their keystrokes hijacked.
fn in_form_context<S: HostTree>(tree: &S, node: NodeId) -> bool {
    tree.matches(node, FORM_CONTROL_SELECTOR)
        || tree.closest(node, EDITABLE_SELECTOR).is_some()
}

static_assertions::assert_impl_all!(RoverHandle: Send, Sync);
static_assertions::assert_impl_all!(DispatchResult: Send, Sync);
