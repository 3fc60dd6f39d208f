//! Interaction state machine.
//!
//! ```text
//!            enter(S)                    activate(S)
//!   Idle ─────────────▶ Hovering(S) ─────────────────▶ Pinned(S)
//!    ▲  ◀───────────────     │                           │  ▲
//!    │      leave            │ enter(T): Hovering(T)     │  │ activate(T)
//!    │                       ▼                           │  │
//!    └────────────────── activate(empty) ◀───────────────┘──┘
//! ```
//!
//! - Pointer enter on a slice while not pinned hovers it.
//! - Pointer leave clears the hover unless pinned.
//! - Activation on a slice pins it from any state.
//! - Activation on empty space returns to idle.
//! - While pinned, enter and leave are ignored.

use serde::Serialize;

use crate::tree::NodeKey;

/// Current interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "key", rename_all = "camelCase")]
pub enum Selection {
    /// Nothing hovered or pinned.
    #[default]
    Idle,
    /// The pointer is over a slice.
    Hovering(NodeKey),
    /// A slice was explicitly activated and stays selected.
    Pinned(NodeKey),
}

impl Selection {
    /// The slice exposed to the rest of the application: the pinned slice
    /// if any, else the hovered slice.
    pub fn key(&self) -> Option<&NodeKey> {
        match self {
            Self::Idle => None,
            Self::Hovering(key) | Self::Pinned(key) => Some(key),
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned(_))
    }
}

/// Owns the selection and applies pointer events to it.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: Selection,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// See [`Selection::key`].
    pub fn selected(&self) -> Option<&NodeKey> {
        self.state.key()
    }

    pub fn pinned(&self) -> Option<&NodeKey> {
        match &self.state {
            Selection::Pinned(key) => Some(key),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<&NodeKey> {
        match &self.state {
            Selection::Hovering(key) => Some(key),
            _ => None,
        }
    }

    /// Pointer entered `key`.
    pub fn pointer_enter(&mut self, key: NodeKey) {
        if !self.state.is_pinned() {
            self.state = Selection::Hovering(key);
        }
    }

    /// Pointer left whatever it was over.
    pub fn pointer_leave(&mut self) {
        if !self.state.is_pinned() {
            self.state = Selection::Idle;
        }
    }

    /// Explicit activation (click, tap, keyboard) on `key`, or on empty
    /// space when `None`.
    pub fn activate(&mut self, key: Option<NodeKey>) {
        self.state = match key {
            Some(key) => Selection::Pinned(key),
            None => Selection::Idle,
        };
    }

    /// Drop the pin, if any.
    pub fn clear_pin(&mut self) {
        if self.state.is_pinned() {
            self.state = Selection::Idle;
        }
    }

    /// Drop any selection whose key no longer passes `exists`.
    ///
    /// Called after every recomputation. Returns whether the state changed.
    pub fn reconcile(&mut self, exists: impl Fn(&NodeKey) -> bool) -> bool {
        match self.state.key() {
            Some(key) if !exists(key) => {
                log::debug!("event=selection_dropped key={key}");
                self.state = Selection::Idle;
                true
            }
            _ => false,
        }
    }
}
