//! Renderer-agnostic 3D scene.
//!
//! The builder turns a table and its scales into a [`SceneGraph`] of boxes,
//! spheres, lines and text. Any front-end can draw the graph; the terminal UI
//! in [`crate::ui`] projects it top-down.

mod animation;
mod builder;
mod graph;

pub use animation::{ease_cubic_out, Animator, TrackKind, HOVER_SCALE};
pub use builder::{format_value, ChartScene, ClusterSlot, SceneBuilder, CLUSTER_LAYOUT};
pub use graph::{Align, Datum, Material, Node, NodeId, Role, SceneGraph, Shape, Transform};

use serde::{Deserialize, Serialize};

/// How each datum is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Upright boxes.
    #[default]
    Bars,
    /// Spheres floating at the value height.
    Points,
    /// Spheres joined by line segments along each row.
    Lines,
}

impl ChartType {
    /// Get the next chart type in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Bars => Self::Points,
            Self::Points => Self::Lines,
            Self::Lines => Self::Bars,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bars => "Bars",
            Self::Points => "Points",
            Self::Lines => "Lines",
        }
    }
}
