//! Keybinding parsing and matching.
//!
//! A [`Keybinding`] is the canonical form of a human-written shortcut string
//! like `"ctrl+shift+k"`: one key name plus a set of required modifiers.
//! Parsing is infallible: a malformed shortcut degrades into a binding that
//! never matches rather than an error (see [`Keybinding::parse`]).
//!
//! Matching against a [`KeyEvent`] is deliberately permissive on the key side
//! so both "semantic key" declarations (`"enter"`, `"a"`) and "physical
//! code" declarations (`"KeyA"`, `"65"`) work, while modifier state must
//! match exactly: a binding without Shift never fires while Shift is held.
//!
//! # Example
//!
//! ```
//! use rove_core::Keybinding;
//!
//! let binding = Keybinding::parse("ctrl+shift+enter");
//! assert_eq!(binding.key, "Enter");
//! assert!(binding.modifiers.control);
//! assert!(binding.modifiers.shift);
//! assert!(!binding.modifiers.alt);
//! ```

use std::fmt;

use crate::event::{KeyEvent, KeyboardModifiers};

/// A normalized keyboard shortcut: one key plus required modifier state.
///
/// Immutable once created. The `key` field holds the canonical key name
/// produced by the alias table in [`parse`](Self::parse): named keys such as
/// `"Enter"` or `"ArrowLeft"`, the single space character for the space bar,
/// or a lowercased literal for anything the table does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keybinding {
    /// The canonical key name.
    pub key: String,
    /// The modifier state the event must carry exactly.
    pub modifiers: KeyboardModifiers,
}

/// Map a lowercased shortcut token to its canonical form.
///
/// Tokens outside the table pass through unchanged; they are treated as
/// literal key names, never rejected.
fn canonical_token(token: &str) -> &str {
    match token {
        "ctrl" => "Control",
        "shift" => "Shift",
        "alt" => "Alt",
        "cmd" | "meta" | "mod" => "Meta",
        "enter" => "Enter",
        "space" => " ",
        "escape" | "esc" => "Escape",
        "left" => "ArrowLeft",
        "right" => "ArrowRight",
        "up" => "ArrowUp",
        "bottom" => "ArrowBottom",
        "delete" => "Backspace",
        other => other,
    }
}

impl Keybinding {
    /// Parse a shortcut string into its canonical form.
    ///
    /// The input is lowercased, split on `+` and each token is trimmed and
    /// mapped through a fixed alias table. The last token becomes the key;
    /// every earlier token that names a modifier (`alt`, `ctrl`, `cmd`/
    /// `meta`/`mod`, `shift`, case-insensitively and in any order) sets the
    /// corresponding flag. Earlier tokens that are not modifiers are ignored:
    /// last token wins, which keeps typo'd strings harmless.
    ///
    /// There are no error conditions. An empty string yields an empty key,
    /// which matches no real key event.
    pub fn parse(shortcut: &str) -> Self {
        let lowered = shortcut.to_lowercase();
        let mut tokens: Vec<&str> = lowered
            .split('+')
            .map(|part| canonical_token(part.trim()))
            .collect();

        let key = tokens.pop().unwrap_or_default().to_string();

        let mut modifiers = KeyboardModifiers::NONE;
        for token in tokens {
            match token {
                "Alt" => modifiers.alt = true,
                "Control" => modifiers.control = true,
                "Meta" => modifiers.meta = true,
                "Shift" => modifiers.shift = true,
                _ => {}
            }
        }

        Self { key, modifiers }
    }

    /// Check whether an incoming key event satisfies this binding.
    ///
    /// The key clause accepts any of: the event's semantic key, its physical
    /// code, its physical code against the uppercased binding key, its legacy
    /// numeric key code against the binding key read as a number, or against
    /// the code point of the uppercased binding key's first character. All
    /// four modifier flags must equal the event's modifier state exactly.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let key_matches = event.key == self.key
            || (!event.code.is_empty()
                && (event.code == self.key || event.code == self.key.to_uppercase()))
            || self.key.parse::<u32>().is_ok_and(|n| n == event.key_code)
            || self
                .key
                .to_uppercase()
                .chars()
                .next()
                .is_some_and(|c| c as u32 == event.key_code);

        key_matches && self.modifiers == event.modifiers
    }
}

impl From<&str> for Keybinding {
    fn from(shortcut: &str) -> Self {
        Self::parse(shortcut)
    }
}

impl fmt::Display for Keybinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.modifiers.control {
            parts.push("Control");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        if self.modifiers.meta {
            parts.push("Meta");
        }
        parts.push(&self.key);
        write!(f, "{}", parts.join("+"))
    }
}

static_assertions::assert_impl_all!(Keybinding: Send, Sync);
