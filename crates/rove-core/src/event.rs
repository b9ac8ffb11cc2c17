//! Keyboard and focus event records.
//!
//! These are snapshots of host input events, carrying exactly the fields the
//! codec and the roving manager consume: the semantic key string, the
//! physical code string, the legacy numeric key code, the modifier state and
//! the event target. Hosts build them from whatever native event type they
//! receive.
//!
//! Suppression state lives in [`EventBase`]: handlers may suppress the
//! event's default action and/or stop its further propagation, and the host
//! is expected to honor both flags after dispatch returns.

use crate::node::NodeId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Common suppression state for all dispatched events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    /// Whether the event's default action has been suppressed.
    default_prevented: bool,
    /// Whether further propagation of the event has been stopped.
    propagation_stopped: bool,
}

impl EventBase {
    /// Create a new event base with nothing suppressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if the default action has been suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from propagating further.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if propagation has been stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A key-down event as seen by the roving manager.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Suppression state.
    pub base: EventBase,
    /// The semantic key value (e.g. `"a"`, `"Enter"`, `"ArrowLeft"`).
    pub key: String,
    /// The physical key code (e.g. `"KeyA"`), empty when the host has none.
    pub code: String,
    /// The legacy numeric key code, 0 when the host has none.
    pub key_code: u32,
    /// Modifier state at the time of the event.
    pub modifiers: KeyboardModifiers,
    /// The node the event was delivered to.
    pub target: NodeId,
}

impl KeyEvent {
    /// Create a key event for a target node with no modifiers, no physical
    /// code and no legacy key code.
    pub fn new(target: NodeId, key: impl Into<String>) -> Self {
        Self {
            base: EventBase::new(),
            key: key.into(),
            code: String::new(),
            key_code: 0,
            modifiers: KeyboardModifiers::NONE,
            target,
        }
    }

    /// Set the physical key code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the legacy numeric key code.
    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = key_code;
        self
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Suppress the event's default action.
    pub fn prevent_default(&mut self) {
        self.base.prevent_default();
    }

    /// Check if the default action has been suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.base.is_default_prevented()
    }

    /// Stop the event from propagating further.
    pub fn stop_propagation(&mut self) {
        self.base.stop_propagation();
    }

    /// Check if propagation has been stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.base.is_propagation_stopped()
    }
}

/// A focus transition event.
///
/// For focus-in, `target` is the node gaining focus. For focus-out,
/// `related_target` is the node focus moved to, if the host knows it.
#[derive(Debug, Clone, Copy)]
pub struct FocusEvent {
    /// Suppression state.
    pub base: EventBase,
    /// The node the event was delivered to.
    pub target: NodeId,
    /// The other side of the focus transition, if any.
    pub related_target: Option<NodeId>,
}

impl FocusEvent {
    /// Create a focus event with no related target.
    pub fn new(target: NodeId) -> Self {
        Self {
            base: EventBase::new(),
            target,
            related_target: None,
        }
    }

    /// Set the related target of the transition.
    pub fn with_related_target(mut self, related: NodeId) -> Self {
        self.related_target = Some(related);
        self
    }
}

static_assertions::assert_impl_all!(KeyboardModifiers: Send, Sync);
static_assertions::assert_impl_all!(KeyEvent: Send, Sync);
static_assertions::assert_impl_all!(FocusEvent: Send, Sync);
