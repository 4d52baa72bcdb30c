//! Scene graph nodes, materials and transforms.

use crate::scale::Rgb;
use glam::Vec3;
use std::collections::BTreeMap;

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index, for display.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Position, scale and yaw relative to the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin.
    pub position: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Rotation about Y, in degrees.
    pub yaw: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            yaw: 0.0,
        }
    }
}

impl Transform {
    /// Translation only.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Translation plus uniform scale.
    pub fn at_scaled(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale: Vec3::splat(scale),
            yaw: 0.0,
        }
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color.
    pub color: Rgb,
    /// 0 = dielectric, 1 = metal.
    pub metalness: f32,
    /// 0 = mirror, 1 = matte.
    pub roughness: f32,
    /// 0 = invisible, 1 = opaque.
    pub opacity: f32,
    /// Glow color.
    pub emissive: Option<Rgb>,
    /// Glow strength.
    pub emissive_intensity: f32,
}

impl Material {
    /// Hover highlight color.
    pub const HOVER: Rgb = Rgb::from_u32(0x4ecdc4);
    /// Selection highlight color.
    pub const SELECTED: Rgb = Rgb::from_u32(0xff6b6b);

    /// Resting material of a main-chart element.
    pub fn bar(color: Rgb) -> Self {
        Self {
            color,
            metalness: 0.4,
            roughness: 0.3,
            opacity: 0.95,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    /// Resting material of a cluster element.
    pub fn cluster(color: Rgb) -> Self {
        Self {
            metalness: 0.5,
            roughness: 0.2,
            opacity: 0.9,
            ..Self::bar(color)
        }
    }

    /// Hover highlight.
    pub fn hovered() -> Self {
        Self {
            color: Self::HOVER,
            metalness: 0.6,
            roughness: 0.3,
            opacity: 0.95,
            emissive: Some(Self::HOVER),
            emissive_intensity: 0.3,
        }
    }

    /// Selection highlight.
    pub fn selected() -> Self {
        Self {
            color: Self::SELECTED,
            metalness: 0.8,
            roughness: 0.2,
            opacity: 0.95,
            emissive: Some(Self::SELECTED),
            emissive_intensity: 0.4,
        }
    }

    /// Flat material for text, lines and panels.
    pub fn flat(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            metalness: 0.0,
            roughness: 1.0,
            opacity,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    /// Whether this is one of the highlight materials.
    pub fn is_highlight(&self) -> bool {
        self.emissive.is_some()
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Left edge at the anchor.
    Left,
    /// Centered on the anchor.
    Center,
    /// Right edge at the anchor.
    Right,
}

/// Geometry of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Container with no geometry.
    Group,
    /// Axis-aligned box centered on the node position.
    Box {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
        /// Extent along Z.
        depth: f32,
    },
    /// Sphere centered on the node position.
    Sphere {
        /// Radius.
        radius: f32,
    },
    /// Segment between two points relative to the node position.
    Line {
        /// Start point.
        start: Vec3,
        /// End point.
        end: Vec3,
    },
    /// Flat rectangle facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
    /// Billboard text.
    Text {
        /// The string.
        value: String,
        /// Alignment.
        align: Align,
    },
}

/// What a node is for; used to query the graph without string classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Container.
    Group,
    /// Ground grid line.
    Grid,
    /// Axis tick or axis title.
    AxisLabel,
    /// Chart title or subtitle.
    Title,
    /// An element bound to a data value.
    Datum,
    /// Text showing a datum's value.
    ValueLabel,
    /// Connector between data elements.
    Connector,
    /// Info overlay.
    Overlay,
}

/// Source value and grid coordinates carried by a data element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    /// The value.
    pub value: f64,
    /// Row in its table.
    pub row: usize,
    /// Column in its table.
    pub col: usize,
    /// Cluster index, `None` for the main chart.
    pub cluster: Option<usize>,
    /// Fully grown height.
    pub height: f32,
    /// Resting color from the color scale.
    pub rest: Material,
}

/// A node in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Handle.
    pub id: NodeId,
    /// Purpose.
    pub role: Role,
    /// Geometry.
    pub shape: Shape,
    /// Local transform.
    pub transform: Transform,
    /// Appearance.
    pub material: Material,
    /// Bound data, for data elements.
    pub datum: Option<Datum>,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Child nodes.
    pub children: Vec<NodeId>,
}

/// A tree of nodes addressed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u32,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as a root). Returns its handle.
    pub fn add(
        &mut self,
        parent: Option<NodeId>,
        role: Role,
        shape: Shape,
        transform: Transform,
        material: Material,
    ) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let parent = parent.filter(|p| self.nodes.contains_key(p));
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    parent_node.children.push(id);
                }
            },
            None => self.roots.push(id),
        }

        self.nodes.insert(
            id,
            Node {
                id,
                role,
                shape,
                transform,
                material,
                datum: None,
                parent,
                children: Vec::new(),
            },
        );
        id
    }

    /// Add an empty group.
    pub fn add_group(&mut self, parent: Option<NodeId>, transform: Transform) -> NodeId {
        self.add(
            parent,
            Role::Group,
            Shape::Group,
            transform,
            Material::flat(Rgb::new(255, 255, 255), 1.0),
        )
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Whether the node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Remove a node and its whole subtree. Returns false if it was absent.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        match node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent) => parent.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }

        let mut stack = node.children;
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                stack.extend(removed.children);
            }
        }
        true
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes with a given role.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.role == role)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position in scene space, accumulating parent translations and scales.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let node = self.nodes.get(&id)?;
        let mut pos = node.transform.position;
        let mut parent = node.parent;
        while let Some(pid) = parent {
            let p = self.nodes.get(&pid)?;
            pos = p.transform.position + p.transform.scale * pos;
            parent = p.parent;
        }
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Material {
        Material::flat(Rgb::new(255, 255, 255), 1.0)
    }

    #[test]
    fn test_add_and_parenting() {
        let mut g = SceneGraph::new();
        let root = g.add_group(None, Transform::at(Vec3::new(10.0, 0.0, 0.0)));
        let child = g.add(
            Some(root),
            Role::Datum,
            Shape::Sphere { radius: 1.0 },
            Transform::at(Vec3::new(1.0, 2.0, 3.0)),
            white(),
        );

        assert_eq!(g.roots(), &[root]);
        assert_eq!(g.get(root).unwrap().children, vec![child]);
        assert_eq!(g.get(child).unwrap().parent, Some(root));
        assert_eq!(g.world_position(child), Some(Vec3::new(11.0, 2.0, 3.0)));
    }

    #[test]
    fn test_world_position_applies_parent_scale() {
        let mut g = SceneGraph::new();
        let cluster = g.add_group(None, Transform::at_scaled(Vec3::new(60.0, 0.0, 0.0), 0.5));
        let bar = g.add_group(Some(cluster), Transform::at(Vec3::new(4.0, 2.0, 0.0)));
        assert_eq!(g.world_position(bar), Some(Vec3::new(62.0, 1.0, 0.0)));
    }

    #[test]
    fn test_remove_subtree() {
        let mut g = SceneGraph::new();
        let a = g.add_group(None, Transform::default());
        let b = g.add_group(Some(a), Transform::default());
        let c = g.add_group(Some(b), Transform::default());
        let d = g.add_group(None, Transform::default());

        assert!(g.remove(b));
        assert!(!g.contains(b));
        assert!(!g.contains(c));
        assert!(g.get(a).unwrap().children.is_empty());
        assert_eq!(g.len(), 2);

        assert!(g.remove(d));
        assert_eq!(g.roots(), &[a]);
        assert!(!g.remove(d));
    }

    #[test]
    fn test_with_role() {
        let mut g = SceneGraph::new();
        g.add(None, Role::Grid, Shape::Group, Transform::default(), white());
        g.add(None, Role::Grid, Shape::Group, Transform::default(), white());
        g.add(None, Role::Title, Shape::Group, Transform::default(), white());
        assert_eq!(g.with_role(Role::Grid).count(), 2);
    }

    #[test]
    fn test_highlight_materials() {
        assert!(Material::selected().is_highlight());
        assert!(Material::hovered().is_highlight());
        assert!(!Material::bar(Rgb::new(1, 2, 3)).is_highlight());
        assert_eq!(Material::selected().color.to_hex(), "#ff6b6b");
    }
}
