//! Pointer input, hover/selection state and the info overlay.
//!
//! Mouse, touch and VR controller input all reduce to a [`PointerEvent`]
//! aimed at a scene node. [`InteractionState`] owns the only mutable view of
//! highlight state; the scene stores each element's rest material so a
//! highlight can always be undone exactly.

mod state;

pub use state::{InfoOverlay, InteractionState, Response, LOG_CAPACITY};

use crate::scene::NodeId;
use crate::scheduler::Millis;
use serde::Serialize;

/// Where a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    /// Desktop mouse.
    Mouse,
    /// Touch screen.
    Touch,
    /// VR controller ray.
    Controller,
    /// Keyboard cursor in the terminal front-end.
    Keyboard,
}

impl PointerSource {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Controller => "controller",
            Self::Keyboard => "keyboard",
        }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Pointer moved onto the target.
    Enter,
    /// Pointer moved off the target.
    Leave,
    /// Target was clicked, tapped or triggered.
    Click,
}

/// A pointer event aimed at a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Input device.
    pub source: PointerSource,
    /// Action.
    pub kind: PointerKind,
    /// Node under the pointer.
    pub target: NodeId,
}

impl PointerEvent {
    /// Pointer entered `target`.
    pub fn enter(source: PointerSource, target: NodeId) -> Self {
        Self {
            source,
            kind: PointerKind::Enter,
            target,
        }
    }

    /// Pointer left `target`.
    pub fn leave(source: PointerSource, target: NodeId) -> Self {
        Self {
            source,
            kind: PointerKind::Leave,
            target,
        }
    }

    /// `target` was clicked.
    pub fn click(source: PointerSource, target: NodeId) -> Self {
        Self {
            source,
            kind: PointerKind::Click,
            target,
        }
    }
}

/// One entry of the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// Session time of the event.
    pub at_ms: Millis,
    /// Input device.
    pub source: PointerSource,
    /// Action.
    pub kind: PointerKind,
    /// Row of the target element.
    pub row: usize,
    /// Column of the target element.
    pub col: usize,
    /// Cluster of the target element, if not in the main chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<usize>,
    /// Value of the target element.
    pub value: f64,
}
