//! Builds the chart scene from a table and its scales.

use super::graph::{Align, Datum, Material, NodeId, Role, SceneGraph, Shape, Transform};
use super::ChartType;
use crate::config::ChartConfig;
use crate::data::{Metadata, Table};
use crate::scale::{Rgb, ScaleSet, CATEGORY10};
use glam::Vec3;
use std::collections::HashMap;

/// Placement of a satellite cluster: ground position and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSlot {
    /// Ground X.
    pub x: f32,
    /// Ground Z.
    pub z: f32,
    /// Uniform scale of the cluster group.
    pub scale: f32,
}

/// The six satellite cluster positions around the main chart.
pub const CLUSTER_LAYOUT: [ClusterSlot; 6] = [
    ClusterSlot { x: 60.0, z: 0.0, scale: 0.8 },
    ClusterSlot { x: -60.0, z: 0.0, scale: 0.8 },
    ClusterSlot { x: 0.0, z: 60.0, scale: 0.8 },
    ClusterSlot { x: 0.0, z: -60.0, scale: 0.8 },
    ClusterSlot { x: 40.0, z: 40.0, scale: 0.6 },
    ClusterSlot { x: -40.0, z: -40.0, scale: 0.6 },
];

const CLUSTER_SPACING: f32 = 2.5;
const CLUSTER_SIZE_FACTOR: f32 = 0.8;

const GRID_EXTENT: i32 = 40;
const GRID_STEP: usize = 10;

const GRID_COLOR: Rgb = Rgb::from_u32(0x333333);
const TEXT_COLOR: Rgb = Rgb::from_u32(0xffffff);
const TITLE_COLOR: Rgb = Rgb::from_u32(0x4ecdc4);

/// Opacity of a fully faded-in value label.
pub(crate) const LABEL_OPACITY: f32 = 0.9;

/// Format a data value for labels: integers without decimals.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Creates a [`ChartScene`] from a table.
#[derive(Debug, Clone)]
pub struct SceneBuilder<'a> {
    config: &'a ChartConfig,
    scales: &'a ScaleSet,
    chart_type: ChartType,
}

impl<'a> SceneBuilder<'a> {
    /// Create a builder.
    pub fn new(config: &'a ChartConfig, scales: &'a ScaleSet, chart_type: ChartType) -> Self {
        Self {
            config,
            scales,
            chart_type,
        }
    }

    /// Build the full scene: grid, axes, titles, data elements and clusters.
    ///
    /// Cluster tables are ignored when clustering is disabled.
    pub fn build(&self, table: &Table, metadata: &Metadata, clusters: &[Table]) -> ChartScene {
        let mut graph = SceneGraph::new();

        let grid_root = graph.add_group(None, Transform::default());
        self.add_grid(&mut graph, grid_root);

        let labels_root = graph.add_group(None, Transform::default());
        self.add_axis_labels(&mut graph, labels_root, table, metadata);

        let bars_root = graph.add_group(None, Transform::default());
        let overlay_root = graph.add_group(None, Transform::default());

        let mut scene = ChartScene {
            graph,
            chart_type: self.chart_type,
            bars_root,
            overlay_root,
            elements: Vec::new(),
            labels: HashMap::new(),
            main_grid: HashMap::new(),
            connectors: Vec::new(),
            dims: (table.rows(), table.cols()),
        };

        for row in 0..table.rows() {
            for col in 0..table.cols() {
                if let Some(value) = table.value(row, col) {
                    let id = self.add_main_element(&mut scene, value, row, col);
                    scene.main_grid.insert((row, col), id);
                }
            }
        }

        if self.chart_type == ChartType::Lines {
            for row in 0..table.rows() {
                for col in 1..table.cols() {
                    let id = scene.graph.add(
                        Some(bars_root),
                        Role::Connector,
                        Shape::Line {
                            start: Vec3::ZERO,
                            end: Vec3::ZERO,
                        },
                        Transform::default(),
                        Material::flat(TEXT_COLOR, 0.6),
                    );
                    scene.connectors.push((id, row, col - 1));
                }
            }
            scene.update_connectors();
        }

        if self.config.clustering {
            for (index, (slot, cluster)) in CLUSTER_LAYOUT.iter().zip(clusters).enumerate() {
                self.add_cluster(&mut scene, index, slot, cluster);
            }
        }

        tracing::debug!(
            nodes = scene.graph.len(),
            elements = scene.elements.len(),
            labels = scene.labels.len(),
            chart = self.chart_type.name(),
            "Built scene"
        );

        scene
    }

    fn add_grid(&self, graph: &mut SceneGraph, parent: NodeId) {
        let extent = GRID_EXTENT as f32;
        for i in (-GRID_EXTENT..=GRID_EXTENT).step_by(GRID_STEP) {
            let i = i as f32;
            for (start, end) in [
                (Vec3::new(i, 0.0, -extent), Vec3::new(i, 0.0, extent)),
                (Vec3::new(-extent, 0.0, i), Vec3::new(extent, 0.0, i)),
            ] {
                graph.add(
                    Some(parent),
                    Role::Grid,
                    Shape::Line { start, end },
                    Transform::default(),
                    Material::flat(GRID_COLOR, 1.0),
                );
            }
        }
    }

    fn add_axis_labels(
        &self,
        graph: &mut SceneGraph,
        parent: NodeId,
        table: &Table,
        metadata: &Metadata,
    ) {
        let text = |value: &str, align| Shape::Text {
            value: value.to_string(),
            align,
        };
        let white = Material::flat(TEXT_COLOR, 1.0);

        for col in 0..table.cols() {
            let x = self.scales.x.map(col as f64) as f32;
            graph.add(
                Some(parent),
                Role::AxisLabel,
                text(table.column_label(col), Align::Center),
                Transform::at_scaled(Vec3::new(x, 0.5, -2.0), 1.5),
                white,
            );
        }

        for row in 0..table.rows() {
            let z = self.scales.z.map(row as f64) as f32;
            graph.add(
                Some(parent),
                Role::AxisLabel,
                text(table.row_label(row), Align::Right),
                Transform::at(Vec3::new(-8.0, 0.5, z)),
                white,
            );
        }

        graph.add(
            Some(parent),
            Role::AxisLabel,
            text(metadata.value_label_or_default(), Align::Center),
            Transform::at_scaled(Vec3::new(-12.0, 20.0, 0.0), 2.5),
            white,
        );

        graph.add(
            Some(parent),
            Role::Title,
            text(metadata.title_or_default(), Align::Center),
            Transform::at_scaled(Vec3::new(0.0, 25.0, 0.0), 3.0),
            Material::flat(TITLE_COLOR, 1.0),
        );

        if let Some(subtitle) = &metadata.subtitle {
            graph.add(
                Some(parent),
                Role::Title,
                text(subtitle, Align::Center),
                Transform::at_scaled(Vec3::new(0.0, 22.0, 0.0), 1.5),
                white,
            );
        }
    }

    fn add_main_element(&self, scene: &mut ChartScene, value: f64, row: usize, col: usize) -> NodeId {
        let height = self.scales.height.map(value) as f32;
        let rest = Material::bar(self.scales.color.color(value));
        let x = self.scales.x.map(col as f64) as f32;
        let z = self.scales.z.map(row as f64) as f32;

        let (shape, position) = element_geometry(self.chart_type, self.config, height, x, z);
        let id = scene
            .graph
            .add(Some(scene.bars_root), Role::Datum, shape, Transform::at(position), rest);
        if let Some(node) = scene.graph.get_mut(id) {
            node.datum = Some(Datum {
                value,
                row,
                col,
                cluster: None,
                height,
                rest,
            });
        }
        scene.elements.push(id);

        if self.wants_label(height) {
            let label = add_value_label(&mut scene.graph, scene.bars_root, value, x, height, z);
            scene.labels.insert(id, label);
        }
        id
    }

    fn wants_label(&self, height: f32) -> bool {
        self.config.value_labels && f64::from(height) > self.config.label_threshold
    }

    fn add_cluster(&self, scene: &mut ChartScene, index: usize, slot: &ClusterSlot, table: &Table) {
        let group = scene.graph.add_group(
            Some(scene.bars_root),
            Transform::at_scaled(Vec3::new(slot.x, 0.0, slot.z), slot.scale),
        );

        let side = (table.cols().max(table.rows()) as f32 - 1.0) * CLUSTER_SPACING;
        scene.graph.add(
            Some(group),
            Role::Title,
            Shape::Text {
                value: table.name.clone(),
                align: Align::Center,
            },
            Transform::at_scaled(Vec3::new(side / 2.0, 0.5, -3.0), 1.5),
            Material::flat(CATEGORY10[index % CATEGORY10.len()], 1.0),
        );

        let width = self.config.bar_width * CLUSTER_SIZE_FACTOR;
        let depth = self.config.bar_depth * CLUSTER_SIZE_FACTOR;
        for row in 0..table.rows() {
            for col in 0..table.cols() {
                let Some(value) = table.value(row, col) else {
                    continue;
                };
                let height = self.scales.height.map(value) as f32;
                let rest = Material::cluster(self.scales.color.color(value));
                let id = scene.graph.add(
                    Some(group),
                    Role::Datum,
                    Shape::Box {
                        width,
                        height,
                        depth,
                    },
                    Transform::at(Vec3::new(
                        col as f32 * CLUSTER_SPACING,
                        height / 2.0,
                        row as f32 * CLUSTER_SPACING,
                    )),
                    rest,
                );
                if let Some(node) = scene.graph.get_mut(id) {
                    node.datum = Some(Datum {
                        value,
                        row,
                        col,
                        cluster: Some(index),
                        height,
                        rest,
                    });
                }
                scene.elements.push(id);
            }
        }
    }
}

/// Shape and local position of a main-chart element at full height.
fn element_geometry(
    chart_type: ChartType,
    config: &ChartConfig,
    height: f32,
    x: f32,
    z: f32,
) -> (Shape, Vec3) {
    match chart_type {
        ChartType::Bars => (
            Shape::Box {
                width: config.bar_width,
                height,
                depth: config.bar_depth,
            },
            Vec3::new(x, height / 2.0, z),
        ),
        ChartType::Points => (
            Shape::Sphere {
                radius: config.bar_width * 0.4,
            },
            Vec3::new(x, height, z),
        ),
        ChartType::Lines => (
            Shape::Sphere {
                radius: config.bar_width * 0.2,
            },
            Vec3::new(x, height, z),
        ),
    }
}

fn add_value_label(
    graph: &mut SceneGraph,
    parent: NodeId,
    value: f64,
    x: f32,
    height: f32,
    z: f32,
) -> NodeId {
    graph.add(
        Some(parent),
        Role::ValueLabel,
        Shape::Text {
            value: format_value(value),
            align: Align::Center,
        },
        Transform::at_scaled(Vec3::new(x, height + 1.0, z), 0.8),
        Material::flat(TEXT_COLOR, LABEL_OPACITY),
    )
}

/// A built scene plus the handles needed to address its data elements.
#[derive(Debug, Clone)]
pub struct ChartScene {
    /// The node tree.
    pub graph: SceneGraph,
    /// How data elements are drawn.
    pub chart_type: ChartType,
    /// Parent of every data element, label and cluster.
    pub bars_root: NodeId,
    /// Parent of the info overlay.
    pub overlay_root: NodeId,
    elements: Vec<NodeId>,
    labels: HashMap<NodeId, NodeId>,
    main_grid: HashMap<(usize, usize), NodeId>,
    connectors: Vec<(NodeId, usize, usize)>,
    dims: (usize, usize),
}

impl ChartScene {
    /// Data elements in creation order: main chart row-major, then clusters.
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// Number of data elements including clusters.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Rows and columns of the main chart.
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// Main-chart element at a grid cell.
    pub fn element_at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.main_grid.get(&(row, col)).copied()
    }

    /// Data carried by an element.
    pub fn datum(&self, id: NodeId) -> Option<&Datum> {
        self.graph.get(id).and_then(|n| n.datum.as_ref())
    }

    /// Value label attached to an element, if any.
    pub fn label_of(&self, id: NodeId) -> Option<NodeId> {
        self.labels.get(&id).copied()
    }

    /// Take new values from the table and rescale every element in place.
    ///
    /// Highlight materials are left alone; only the stored rest material
    /// changes, so an active hover or selection survives the refresh.
    /// Elements for which `growing` holds keep their current geometry and
    /// only receive the new datum; their grow track reaches the new height.
    pub fn refresh_values<G>(
        &mut self,
        table: &Table,
        scales: &ScaleSet,
        config: &ChartConfig,
        growing: G,
    ) where
        G: Fn(NodeId) -> bool,
    {
        for index in 0..self.elements.len() {
            let id = self.elements[index];
            let Some(datum) = self.datum(id).copied() else {
                continue;
            };

            let value = match datum.cluster {
                None => table.value(datum.row, datum.col).unwrap_or(datum.value),
                Some(_) => datum.value,
            };
            let height = scales.height.map(value) as f32;
            let color = scales.color.color(value);
            let rest = match datum.cluster {
                None => Material::bar(color),
                Some(_) => Material::cluster(color),
            };

            let Some(node) = self.graph.get_mut(id) else {
                continue;
            };
            node.datum = Some(Datum {
                value,
                height,
                rest,
                ..datum
            });
            if !node.material.is_highlight() {
                node.material = rest;
            }
            if growing(id) {
                if datum.cluster.is_none() {
                    self.relabel(id, value, height, config);
                }
                continue;
            }
            match (&mut node.shape, datum.cluster) {
                (Shape::Box { height: h, .. }, _) => {
                    *h = height;
                    node.transform.position.y = height / 2.0;
                },
                (Shape::Sphere { .. }, None) => node.transform.position.y = height,
                _ => {},
            }

            if datum.cluster.is_none() {
                let position = node.transform.position;
                self.sync_label(id, value, height, position, config);
            }
        }
        self.update_connectors();
    }

    /// Update the text of an existing label without moving it or changing
    /// its visibility.
    fn relabel(&mut self, id: NodeId, value: f64, height: f32, config: &ChartConfig) {
        let Some(label) = self.labels.get(&id).copied() else {
            return;
        };
        if !(config.value_labels && f64::from(height) > config.label_threshold) {
            self.graph.remove(label);
            self.labels.remove(&id);
            return;
        }
        if let Some(node) = self.graph.get_mut(label) {
            node.shape = Shape::Text {
                value: format_value(value),
                align: Align::Center,
            };
            node.transform.position.y = height + 1.0;
        }
    }

    fn sync_label(
        &mut self,
        id: NodeId,
        value: f64,
        height: f32,
        position: Vec3,
        config: &ChartConfig,
    ) {
        let wanted = config.value_labels && f64::from(height) > config.label_threshold;
        match (self.labels.get(&id).copied(), wanted) {
            (Some(label), true) => {
                if let Some(node) = self.graph.get_mut(label) {
                    node.shape = Shape::Text {
                        value: format_value(value),
                        align: Align::Center,
                    };
                    node.transform.position.y = height + 1.0;
                }
            },
            (Some(label), false) => {
                self.graph.remove(label);
                self.labels.remove(&id);
            },
            (None, true) => {
                let label = add_value_label(
                    &mut self.graph,
                    self.bars_root,
                    value,
                    position.x,
                    height,
                    position.z,
                );
                self.labels.insert(id, label);
            },
            (None, false) => {},
        }
    }

    /// Point connectors at the current element positions.
    pub(crate) fn update_connectors(&mut self) {
        for i in 0..self.connectors.len() {
            let (id, row, col) = self.connectors[i];
            let endpoint = |c| {
                self.element_at(row, c)
                    .and_then(|e| self.graph.get(e))
                    .map(|n| n.transform.position)
            };
            let (Some(start), Some(end)) = (endpoint(col), endpoint(col + 1)) else {
                continue;
            };
            if let Some(node) = self.graph.get_mut(id) {
                node.shape = Shape::Line { start, end };
            }
        }
    }
}
