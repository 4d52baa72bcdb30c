//! Hover and selection state machine.

use super::{InteractionRecord, PointerEvent, PointerKind};
use crate::scale::Rgb;
use crate::scene::{Align, ChartScene, Datum, Material, NodeId, Role, Shape, Transform};
use crate::scheduler::Millis;
use glam::Vec3;

/// Overlay offset from the clicked element.
const OVERLAY_OFFSET: Vec3 = Vec3::new(4.0, 2.0, 0.0);
const OVERLAY_WIDTH: f32 = 5.0;
const OVERLAY_HEIGHT: f32 = 2.5;

/// Most records the interaction log keeps; older ones are dropped first.
pub const LOG_CAPACITY: usize = 1000;

/// The transient panel describing a clicked element.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoOverlay {
    /// Identifies this overlay among the ones shown so far.
    pub token: u64,
    /// Element the overlay describes.
    pub target: NodeId,
    /// Overlay group in the scene.
    pub node: NodeId,
    /// Scene-space anchor.
    pub position: Vec3,
    /// Text lines.
    pub lines: Vec<String>,
    /// When the overlay should disappear.
    pub expires_at: Millis,
}

/// What the caller has to schedule after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// Element that just became selected; should pulse.
    pub selected: Option<NodeId>,
    /// Overlay that was shown: its token and expiry.
    pub overlay: Option<(u64, Millis)>,
}

/// Grid coordinates used to find an element again after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Coords {
    row: usize,
    col: usize,
    cluster: Option<usize>,
}

impl From<&Datum> for Coords {
    fn from(d: &Datum) -> Self {
        Self {
            row: d.row,
            col: d.col,
            cluster: d.cluster,
        }
    }
}

/// Hover, selection and overlay state for a [`ChartScene`].
///
/// At most one element is hovered, at most one is selected and at most one
/// overlay is live.
#[derive(Debug, Clone)]
pub struct InteractionState {
    hovered: Option<(NodeId, Coords)>,
    selected: Option<(NodeId, Coords)>,
    overlay: Option<InfoOverlay>,
    next_token: u64,
    overlay_ms: Millis,
    log: Vec<InteractionRecord>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl InteractionState {
    /// Create an idle state whose overlays last `overlay_ms`.
    pub fn new(overlay_ms: Millis) -> Self {
        Self {
            hovered: None,
            selected: None,
            overlay: None,
            next_token: 1,
            overlay_ms,
            log: Vec::new(),
        }
    }

    /// Currently hovered element.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered.map(|(id, _)| id)
    }

    /// Currently selected element.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected.map(|(id, _)| id)
    }

    /// The live overlay.
    pub fn overlay(&self) -> Option<&InfoOverlay> {
        self.overlay.as_ref()
    }

    /// The most recent [`LOG_CAPACITY`] events, oldest first.
    pub fn log(&self) -> &[InteractionRecord] {
        &self.log
    }

    /// Apply a pointer event.
    ///
    /// `describe` supplies the overlay text for a clicked element. Events on
    /// nodes that carry no data are ignored.
    pub fn handle<F>(
        &mut self,
        event: PointerEvent,
        now: Millis,
        scene: &mut ChartScene,
        describe: F,
    ) -> Response
    where
        F: FnOnce(&Datum) -> Vec<String>,
    {
        let Some(datum) = scene.datum(event.target).copied() else {
            tracing::trace!(node = event.target.index(), "Pointer event on non-data node");
            return Response::default();
        };

        if self.log.len() >= LOG_CAPACITY {
            self.log.remove(0);
        }
        self.log.push(InteractionRecord {
            at_ms: now,
            source: event.source,
            kind: event.kind,
            row: datum.row,
            col: datum.col,
            cluster: datum.cluster,
            value: datum.value,
        });

        match event.kind {
            PointerKind::Enter => {
                self.hover(scene, event.target, Coords::from(&datum));
                Response::default()
            },
            PointerKind::Leave => {
                self.unhover(scene, event.target);
                Response::default()
            },
            PointerKind::Click => {
                self.select(scene, event.target, Coords::from(&datum));
                let lines = describe(&datum);
                let overlay = self.show_overlay(scene, event.target, lines, now);
                tracing::info!(
                    row = datum.row,
                    col = datum.col,
                    value = datum.value,
                    source = event.source.name(),
                    "Element selected"
                );
                Response {
                    selected: Some(event.target),
                    overlay: Some(overlay),
                }
            },
        }
    }

    fn hover(&mut self, scene: &mut ChartScene, target: NodeId, coords: Coords) {
        if let Some((previous, _)) = self.hovered {
            if previous != target && self.selected() != Some(previous) {
                restore(scene, previous);
            }
        }
        self.hovered = Some((target, coords));
        if self.selected() != Some(target) {
            set_material(scene, target, Material::hovered());
        }
    }

    fn unhover(&mut self, scene: &mut ChartScene, target: NodeId) {
        if self.hovered() != Some(target) {
            return;
        }
        self.hovered = None;
        if self.selected() != Some(target) {
            restore(scene, target);
        }
    }

    fn select(&mut self, scene: &mut ChartScene, target: NodeId, coords: Coords) {
        if let Some((previous, _)) = self.selected {
            if previous != target {
                restore(scene, previous);
            }
        }
        self.selected = Some((target, coords));
        set_material(scene, target, Material::selected());
    }

    /// Clear the selection, restoring the element's rest material (or the
    /// hover highlight if the pointer is still on it).
    pub fn deselect(&mut self, scene: &mut ChartScene) {
        let Some((id, _)) = self.selected.take() else {
            return;
        };
        if self.hovered() == Some(id) {
            set_material(scene, id, Material::hovered());
        } else {
            restore(scene, id);
        }
    }

    fn show_overlay(
        &mut self,
        scene: &mut ChartScene,
        target: NodeId,
        lines: Vec<String>,
        now: Millis,
    ) -> (u64, Millis) {
        if let Some(old) = self.overlay.take() {
            scene.graph.remove(old.node);
        }

        let anchor = scene.graph.world_position(target).unwrap_or(Vec3::ZERO);
        let position = anchor + OVERLAY_OFFSET;
        let node = scene.graph.add(
            Some(scene.overlay_root),
            Role::Overlay,
            Shape::Group,
            Transform::at(position),
            Material::flat(Rgb::new(0, 0, 0), 0.9),
        );
        scene.graph.add(
            Some(node),
            Role::Overlay,
            Shape::Plane {
                width: OVERLAY_WIDTH,
                height: OVERLAY_HEIGHT,
            },
            Transform::default(),
            Material::flat(Rgb::new(0, 0, 0), 0.9),
        );
        scene.graph.add(
            Some(node),
            Role::Overlay,
            Shape::Text {
                value: lines.join("\n"),
                align: Align::Center,
            },
            Transform::at_scaled(Vec3::new(0.0, 0.0, 0.01), 0.6),
            Material::flat(Rgb::new(255, 255, 255), 1.0),
        );

        let token = self.next_token;
        self.next_token += 1;
        let expires_at = now.saturating_add(self.overlay_ms);
        self.overlay = Some(InfoOverlay {
            token,
            target,
            node,
            position,
            lines,
            expires_at,
        });
        (token, expires_at)
    }

    /// Remove the overlay if `token` is still the live one.
    ///
    /// Returns false for a stale token, leaving a newer overlay in place.
    pub fn dismiss_overlay(&mut self, token: u64, scene: &mut ChartScene) -> bool {
        match &self.overlay {
            Some(overlay) if overlay.token == token => {
                scene.graph.remove(overlay.node);
                self.overlay = None;
                tracing::debug!(token, "Overlay dismissed");
                true
            },
            _ => false,
        }
    }

    /// Re-resolve hovered and selected elements in a rebuilt or refreshed
    /// scene and reapply their highlight materials.
    ///
    /// Elements are matched by grid coordinates; ones that no longer exist
    /// are dropped. Any overlay is discarded since its node belonged to the
    /// old scene.
    pub fn rebind(&mut self, scene: &mut ChartScene) {
        self.hovered = self.hovered.and_then(|(_, c)| find(scene, c).map(|id| (id, c)));
        self.selected = self.selected.and_then(|(_, c)| find(scene, c).map(|id| (id, c)));
        if let Some(overlay) = self.overlay.take() {
            scene.graph.remove(overlay.node);
        }
        self.reapply(scene);
    }

    /// Reapply highlight materials over whatever the scene currently shows.
    pub fn reapply(&self, scene: &mut ChartScene) {
        if let Some(id) = self.hovered() {
            if self.selected() != Some(id) {
                set_material(scene, id, Material::hovered());
            }
        }
        if let Some(id) = self.selected() {
            set_material(scene, id, Material::selected());
        }
    }
}

fn find(scene: &ChartScene, coords: Coords) -> Option<NodeId> {
    scene
        .elements()
        .iter()
        .copied()
        .find(|id| scene.datum(*id).is_some_and(|d| Coords::from(d) == coords))
}

fn set_material(scene: &mut ChartScene, id: NodeId, material: Material) {
    if let Some(node) = scene.graph.get_mut(id) {
        node.material = material;
    }
}

fn restore(scene: &mut ChartScene, id: NodeId) {
    if let Some(node) = scene.graph.get_mut(id) {
        if let Some(datum) = node.datum {
            node.material = datum.rest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::{Metadata, Table};
    use crate::interaction::PointerSource;
    use crate::scale::{ColorScheme, ScaleSet};
    use crate::scene::{ChartType, SceneBuilder};

    fn scene(chart_type: ChartType) -> ChartScene {
        let config = ChartConfig::default();
        let t = Table::from_rows("t", &[vec![10.0, 20.0], vec![30.0, 40.0]], vec![], vec![]).unwrap();
        let scales = ScaleSet::build(&t, &config, ColorScheme::Viridis);
        SceneBuilder::new(&config, &scales, chart_type).build(&t, &Metadata::default(), &[])
    }

    fn describe(d: &Datum) -> Vec<String> {
        vec![format!("{}", d.value)]
    }

    fn material(scene: &ChartScene, id: NodeId) -> Material {
        scene.graph.get(id).unwrap().material
    }

    fn rest(scene: &ChartScene, id: NodeId) -> Material {
        scene.datum(id).unwrap().rest
    }

    #[test]
    fn test_hover_and_leave() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(0, 0).unwrap();

        state.handle(PointerEvent::enter(PointerSource::Mouse, a), 0, &mut scene, describe);
        assert_eq!(state.hovered(), Some(a));
        assert_eq!(material(&scene, a), Material::hovered());

        state.handle(PointerEvent::leave(PointerSource::Mouse, a), 10, &mut scene, describe);
        assert_eq!(state.hovered(), None);
        assert_eq!(material(&scene, a), rest(&scene, a));
    }

    #[test]
    fn test_selecting_b_deselects_a() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(0, 0).unwrap();
        let b = scene.element_at(1, 1).unwrap();

        state.handle(PointerEvent::click(PointerSource::Mouse, a), 0, &mut scene, describe);
        assert_eq!(state.selected(), Some(a));
        assert_eq!(material(&scene, a), Material::selected());

        state.handle(PointerEvent::click(PointerSource::Touch, b), 50, &mut scene, describe);
        assert_eq!(state.selected(), Some(b));
        assert_eq!(material(&scene, b), Material::selected());
        assert_eq!(material(&scene, a), rest(&scene, a));

        let highlighted = scene
            .elements()
            .iter()
            .filter(|id| material(&scene, **id).is_highlight())
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn test_hover_does_not_override_selection() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(0, 0).unwrap();

        state.handle(PointerEvent::click(PointerSource::Mouse, a), 0, &mut scene, describe);
        state.handle(PointerEvent::enter(PointerSource::Mouse, a), 1, &mut scene, describe);
        assert_eq!(material(&scene, a), Material::selected());
        state.handle(PointerEvent::leave(PointerSource::Mouse, a), 2, &mut scene, describe);
        assert_eq!(material(&scene, a), Material::selected());

        state.deselect(&mut scene);
        assert_eq!(state.selected(), None);
        assert_eq!(material(&scene, a), rest(&scene, a));
    }

    #[test]
    fn test_overlay_replaced_and_stale_dismiss_ignored() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::new(3000);
        let a = scene.element_at(0, 0).unwrap();
        let b = scene.element_at(0, 1).unwrap();

        let first = state.handle(PointerEvent::click(PointerSource::Mouse, a), 0, &mut scene, describe);
        let (first_token, first_expiry) = first.overlay.unwrap();
        assert_eq!(first_expiry, 3000);

        let second = state.handle(PointerEvent::click(PointerSource::Mouse, b), 1000, &mut scene, describe);
        let (second_token, _) = second.overlay.unwrap();
        assert_ne!(first_token, second_token);
        assert_eq!(scene.graph.with_role(Role::Overlay).count(), 3);

        assert!(!state.dismiss_overlay(first_token, &mut scene));
        assert_eq!(state.overlay().unwrap().target, b);

        assert!(state.dismiss_overlay(second_token, &mut scene));
        assert!(state.overlay().is_none());
        assert_eq!(scene.graph.with_role(Role::Overlay).count(), 0);
    }

    #[test]
    fn test_overlay_position_and_text() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(1, 1).unwrap();
        state.handle(PointerEvent::click(PointerSource::Controller, a), 0, &mut scene, describe);

        let overlay = state.overlay().unwrap();
        let anchor = scene.graph.world_position(a).unwrap();
        assert_eq!(overlay.position, anchor + OVERLAY_OFFSET);
        assert_eq!(overlay.lines, vec!["40".to_string()]);
    }

    #[test]
    fn test_non_data_nodes_ignored() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let root = scene.bars_root;
        let response = state.handle(PointerEvent::click(PointerSource::Mouse, root), 0, &mut scene, describe);
        assert_eq!(response, Response::default());
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_log_records_every_event() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(1, 0).unwrap();
        state.handle(PointerEvent::enter(PointerSource::Keyboard, a), 5, &mut scene, describe);
        state.handle(PointerEvent::click(PointerSource::Keyboard, a), 9, &mut scene, describe);

        let log = state.log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].kind, PointerKind::Click);
        assert_eq!((log[1].row, log[1].col, log[1].value), (1, 0, 30.0));
        assert_eq!(log[1].at_ms, 9);
    }

    #[test]
    fn test_log_keeps_most_recent_events() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(0, 0).unwrap();
        let b = scene.element_at(0, 1).unwrap();

        // a pointer sweeping back and forth
        for i in 0..LOG_CAPACITY as Millis {
            let target = if i % 2 == 0 { a } else { b };
            state.handle(PointerEvent::enter(PointerSource::Mouse, target), i, &mut scene, describe);
            state.handle(PointerEvent::leave(PointerSource::Mouse, target), i, &mut scene, describe);
        }
        state.handle(PointerEvent::click(PointerSource::Mouse, a), 5000, &mut scene, describe);

        let log = state.log();
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log[0].at_ms, (LOG_CAPACITY / 2) as Millis);
        assert_eq!(log[LOG_CAPACITY - 1].kind, PointerKind::Click);
    }

    #[test]
    fn test_rebind_after_rebuild() {
        let mut scene = scene(ChartType::Bars);
        let mut state = InteractionState::default();
        let a = scene.element_at(1, 1).unwrap();
        state.handle(PointerEvent::click(PointerSource::Mouse, a), 0, &mut scene, describe);

        let mut rebuilt = self::scene(ChartType::Points);
        state.rebind(&mut rebuilt);
        let id = rebuilt.element_at(1, 1).unwrap();
        assert_eq!(state.selected(), Some(id));
        assert_eq!(material(&rebuilt, id), Material::selected());
        assert!(state.overlay().is_none());
    }
}
