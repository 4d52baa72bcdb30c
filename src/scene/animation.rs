//! Entrance and selection animations on the virtual clock.
//!
//! Tracks are evaluated by [`Animator::tick`] with the caller's current time.
//! A track that has not started yet leaves its node untouched, so the
//! entrance sets every element to its collapsed state up front.

use super::builder::{ChartScene, LABEL_OPACITY};
use super::graph::{NodeId, Shape};
use crate::config::ChartConfig;
use crate::scheduler::Millis;

/// Label fade-in begins at this fraction of the grow duration.
const LABEL_DELAY_FRACTION: f64 = 0.7;
/// Label fade-in length.
const LABEL_FADE_MS: Millis = 500;
/// Length of each half of the selection pulse.
const PULSE_MS: Millis = 200;
/// Peak scale of the selection pulse.
const PULSE_SCALE: f32 = 1.2;
/// Scale of a hovered element.
pub const HOVER_SCALE: f32 = 1.15;
/// Length of the hover scale change.
const HOVER_MS: Millis = 300;
/// Length of the full turn a clicked element makes.
const SPIN_MS: Millis = 1200;

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_cubic_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// What a track animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackKind {
    /// Height grows from zero to the datum's height; position rises with it.
    Grow,
    /// Label opacity rises from zero.
    FadeIn,
    /// Uniform scale moves from `from` to `to`.
    Scale {
        /// Start scale.
        from: f32,
        /// End scale.
        to: f32,
    },
    /// One full turn about the vertical axis.
    Spin,
}

#[derive(Debug, Clone, Copy)]
struct Track {
    node: NodeId,
    kind: TrackKind,
    start: Millis,
    duration: Millis,
}

impl Track {
    fn progress(&self, now: Millis) -> Option<f64> {
        if now < self.start {
            return None;
        }
        if self.duration == 0 {
            return Some(1.0);
        }
        Some(((now - self.start) as f64 / self.duration as f64).min(1.0))
    }

    fn end(&self) -> Millis {
        self.start.saturating_add(self.duration)
    }
}

/// Runs animation tracks against a [`ChartScene`].
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tracks: Vec<Track>,
}

impl Animator {
    /// Create an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse every element and schedule the staggered grow-in.
    ///
    /// Element `i` starts growing at `now + i * stagger`; its value label
    /// fades in once the grow is 70 % through.
    pub fn entrance(&mut self, scene: &mut ChartScene, config: &ChartConfig, now: Millis) {
        self.tracks.retain(|t| !matches!(t.kind, TrackKind::Grow | TrackKind::FadeIn));

        let elements = scene.elements().to_vec();
        for (index, id) in elements.into_iter().enumerate() {
            let start = now.saturating_add((index as Millis).saturating_mul(config.stagger_ms));
            apply_grow(scene, id, 0.0);
            self.tracks.push(Track {
                node: id,
                kind: TrackKind::Grow,
                start,
                duration: config.animation_ms,
            });

            if let Some(label) = scene.label_of(id) {
                apply_fade(scene, label, 0.0);
                let delay = (config.animation_ms as f64 * LABEL_DELAY_FRACTION).round() as Millis;
                self.tracks.push(Track {
                    node: label,
                    kind: TrackKind::FadeIn,
                    start: start.saturating_add(delay),
                    duration: LABEL_FADE_MS,
                });
            }
        }

        tracing::debug!(tracks = self.tracks.len(), "Entrance animation scheduled");
    }

    /// Scale `node` up to 1.2 and back to `rest`, 200 ms each way.
    pub fn pulse(&mut self, node: NodeId, now: Millis, rest: f32) {
        self.drop_scale_tracks(node);
        self.tracks.push(Track {
            node,
            kind: TrackKind::Scale {
                from: rest,
                to: PULSE_SCALE,
            },
            start: now,
            duration: PULSE_MS,
        });
        self.tracks.push(Track {
            node,
            kind: TrackKind::Scale {
                from: PULSE_SCALE,
                to: rest,
            },
            start: now.saturating_add(PULSE_MS),
            duration: PULSE_MS,
        });
    }

    /// Ease `node` from its current scale to `to` over 300 ms.
    ///
    /// Replaces any scale track already running on the node.
    pub fn scale_to(&mut self, scene: &ChartScene, node: NodeId, to: f32, now: Millis) {
        let Some(from) = scene.graph.get(node).map(|n| n.transform.scale.x) else {
            return;
        };
        self.drop_scale_tracks(node);
        if from == to {
            return;
        }
        self.tracks.push(Track {
            node,
            kind: TrackKind::Scale { from, to },
            start: now,
            duration: HOVER_MS,
        });
    }

    /// Turn `node` once about its vertical axis over 1.2 s.
    pub fn spin(&mut self, node: NodeId, now: Millis) {
        self.tracks.retain(|t| !(t.node == node && t.kind == TrackKind::Spin));
        self.tracks.push(Track {
            node,
            kind: TrackKind::Spin,
            start: now,
            duration: SPIN_MS,
        });
    }

    fn drop_scale_tracks(&mut self, node: NodeId) {
        self.tracks
            .retain(|t| !(t.node == node && matches!(t.kind, TrackKind::Scale { .. })));
    }

    /// Advance every track to `now`. Finished tracks are dropped.
    pub fn tick(&mut self, now: Millis, scene: &mut ChartScene) {
        for track in &self.tracks {
            let Some(t) = track.progress(now) else {
                continue;
            };
            apply(scene, track, ease_cubic_out(t));
        }
        self.tracks.retain(|t| t.end() > now);
    }

    /// Jump every track to its end state.
    pub fn finish(&mut self, scene: &mut ChartScene) {
        for track in &self.tracks {
            apply(scene, track, 1.0);
        }
        self.tracks.clear();
    }

    /// Drop every track without applying it.
    pub fn cancel(&mut self) {
        self.tracks.clear();
    }

    /// Whether no track is pending.
    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of pending tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether `node` still has a grow track pending.
    pub fn is_growing(&self, node: NodeId) -> bool {
        self.tracks
            .iter()
            .any(|t| t.node == node && t.kind == TrackKind::Grow)
    }
}

fn apply(scene: &mut ChartScene, track: &Track, eased: f64) {
    match track.kind {
        TrackKind::Grow => apply_grow(scene, track.node, eased as f32),
        TrackKind::FadeIn => apply_fade(scene, track.node, eased as f32),
        TrackKind::Scale { from, to } => {
            if let Some(node) = scene.graph.get_mut(track.node) {
                let e = eased as f32;
                node.transform.scale = glam::Vec3::splat(from * (1.0 - e) + to * e);
            }
        },
        TrackKind::Spin => {
            if let Some(node) = scene.graph.get_mut(track.node) {
                node.transform.yaw = (360.0 * eased as f32) % 360.0;
            }
        },
    }
}

fn apply_grow(scene: &mut ChartScene, id: NodeId, fraction: f32) {
    let Some(node) = scene.graph.get_mut(id) else {
        return;
    };
    let Some(datum) = node.datum else {
        return;
    };
    let height = datum.height * fraction;
    match &mut node.shape {
        Shape::Box { height: h, .. } => {
            *h = height;
            node.transform.position.y = height / 2.0;
        },
        _ => node.transform.position.y = height,
    }
}

fn apply_fade(scene: &mut ChartScene, id: NodeId, fraction: f32) {
    if let Some(node) = scene.graph.get_mut(id) {
        node.material.opacity = LABEL_OPACITY * fraction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Metadata, Table};
    use crate::scale::{ColorScheme, ScaleSet};
    use crate::scene::{ChartType, SceneBuilder};

    fn scene(config: &ChartConfig) -> ChartScene {
        let t = Table::from_rows("t", &[vec![10.0, 50.0, 100.0]], vec![], vec![]).unwrap();
        let scales = ScaleSet::build(&t, config, ColorScheme::Viridis);
        SceneBuilder::new(config, &scales, ChartType::Bars).build(&t, &Metadata::default(), &[])
    }

    fn box_height(scene: &ChartScene, id: NodeId) -> f32 {
        match scene.graph.get(id).unwrap().shape {
            Shape::Box { height, .. } => height,
            _ => panic!("not a box"),
        }
    }

    #[test]
    fn test_ease_cubic_out() {
        assert_eq!(ease_cubic_out(0.0), 0.0);
        assert_eq!(ease_cubic_out(1.0), 1.0);
        assert_eq!(ease_cubic_out(0.5), 0.875);
        assert_eq!(ease_cubic_out(2.0), 1.0);
    }

    #[test]
    fn test_entrance_is_staggered() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        animator.entrance(&mut scene, &config, 0);

        let ids = scene.elements().to_vec();
        assert_eq!(box_height(&scene, ids[2]), 0.0);

        // element 2 starts at 60 ms
        animator.tick(59, &mut scene);
        assert!(box_height(&scene, ids[0]) > 0.0);
        assert_eq!(box_height(&scene, ids[2]), 0.0);
        animator.tick(500, &mut scene);
        assert!(box_height(&scene, ids[2]) > 0.0);

        animator.tick(1060, &mut scene);
        let full = scene.datum(ids[2]).unwrap().height;
        assert_eq!(box_height(&scene, ids[2]), full);
        assert_eq!(scene.graph.get(ids[2]).unwrap().transform.position.y, full / 2.0);
    }

    #[test]
    fn test_label_fades_in_after_grow() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        animator.entrance(&mut scene, &config, 0);

        let tallest = scene.elements()[2];
        let label = scene.label_of(tallest).unwrap();
        let opacity = |s: &ChartScene| s.graph.get(label).unwrap().material.opacity;

        assert_eq!(opacity(&scene), 0.0);
        // element 2 starts at 60 ms, its label at 60 + 700
        animator.tick(759, &mut scene);
        assert_eq!(opacity(&scene), 0.0);
        animator.tick(1260, &mut scene);
        assert_eq!(opacity(&scene), LABEL_OPACITY);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_pulse_returns_to_rest() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        let id = scene.elements()[0];

        animator.pulse(id, 1000, 1.0);
        animator.tick(1200, &mut scene);
        assert_eq!(scene.graph.get(id).unwrap().transform.scale.x, 1.2);
        animator.tick(1400, &mut scene);
        assert_eq!(scene.graph.get(id).unwrap().transform.scale.x, 1.0);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_hover_scale_eases_both_ways() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        let id = scene.elements()[1];
        let scale = |s: &ChartScene| s.graph.get(id).unwrap().transform.scale.x;

        animator.scale_to(&scene, id, HOVER_SCALE, 0);
        animator.tick(150, &mut scene);
        assert!(scale(&scene) > 1.0 && scale(&scene) < HOVER_SCALE);
        animator.tick(300, &mut scene);
        assert_eq!(scale(&scene), HOVER_SCALE);

        // leaving starts from the hovered scale
        animator.scale_to(&scene, id, 1.0, 400);
        animator.tick(700, &mut scene);
        assert_eq!(scale(&scene), 1.0);
        assert!(animator.is_idle());

        animator.scale_to(&scene, id, 1.0, 800);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_spin_makes_one_turn() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        let id = scene.elements()[0];
        let yaw = |s: &ChartScene| s.graph.get(id).unwrap().transform.yaw;

        animator.spin(id, 100);
        animator.tick(700, &mut scene);
        assert!(yaw(&scene) > 180.0 && yaw(&scene) < 360.0);
        animator.tick(1300, &mut scene);
        assert_eq!(yaw(&scene), 0.0);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_huge_stagger_saturates() {
        let config = ChartConfig {
            stagger_ms: u64::MAX,
            ..Default::default()
        };
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        animator.entrance(&mut scene, &config, 5);
        animator.tick(10_000, &mut scene);

        let ids = scene.elements().to_vec();
        assert_eq!(box_height(&scene, ids[0]), scene.datum(ids[0]).unwrap().height);
        assert_eq!(box_height(&scene, ids[2]), 0.0);
    }

    #[test]
    fn test_finish_jumps_to_end() {
        let config = ChartConfig::default();
        let mut scene = scene(&config);
        let mut animator = Animator::new();
        animator.entrance(&mut scene, &config, 0);
        animator.finish(&mut scene);

        for &id in scene.elements() {
            assert_eq!(box_height(&scene, id), scene.datum(id).unwrap().height);
        }
        assert!(animator.is_idle());
    }
}
