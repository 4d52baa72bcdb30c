//! Application state and logic.
//!
//! [`App`] is the one place that owns the dataset, scales, scene, analytics
//! and interaction state. The front-end drives it with key presses and
//! [`App::tick`]; time only ever enters through the `now` arguments.

use std::path::{Path, PathBuf};

use crate::analytics::{AnalyticsEngine, AnalyticsSnapshot, SeriesSource};
use crate::config::ChartConfig;
use crate::data::{regional_clusters, Dataset, Table};
use crate::error::{BarscapeError, Result};
use crate::interaction::{InteractionState, PointerEvent, PointerSource, Response};
use crate::realtime::RealtimeFeed;
use crate::report::{DatasetSummary, SessionReport, SessionStats};
use crate::scale::{ColorScheme, ScaleSet};
use crate::scene::{
    format_value, Animator, ChartScene, ChartType, Datum, SceneBuilder, HOVER_SCALE,
};
use crate::scheduler::{Millis, TaskQueue};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Deferred work on the virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Remove the overlay carrying this token, if it is still shown.
    DismissOverlay(u64),
    /// Apply one simulated real-time update.
    RealtimeTick,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Chart configuration.
    pub config: ChartConfig,
    /// Loaded dataset.
    pub dataset: Dataset,
    /// Where the dataset came from.
    pub source: Option<PathBuf>,
    /// Why the fallback dataset is shown, if it is.
    pub fallback_reason: Option<String>,
    /// Tables shown as satellite clusters.
    pub clusters: Vec<Table>,
    /// Index of the displayed table.
    pub active: usize,
    /// Current color scheme.
    pub scheme: ColorScheme,
    /// Current chart type.
    pub chart_type: ChartType,
    /// Current theme.
    pub theme: Theme,
    /// Scales of the displayed table.
    pub scales: ScaleSet,
    /// The scene.
    pub scene: ChartScene,
    /// Running animations.
    pub animator: Animator,
    /// Hover, selection and overlay.
    pub interaction: InteractionState,
    /// Latest analytics.
    pub analytics: AnalyticsSnapshot,
    /// Cursor over the main chart (row, column).
    pub cursor: (usize, usize),
    /// Show the insights panel.
    pub show_insights: bool,
    /// Status message.
    pub status: String,
    engine: AnalyticsEngine,
    realtime: RealtimeFeed,
    tasks: TaskQueue<Task>,
    stats: SessionStats,
    now: Millis,
}

impl App {
    /// Create a new application instance showing the first table.
    pub fn new(dataset: Dataset, config: ChartConfig, now: Millis) -> Result<Self> {
        config.validate()?;
        let scheme = config.color_scheme;
        let chart_type = config.chart_type;
        let engine = AnalyticsEngine::new(config.analytics.clone());
        let realtime = RealtimeFeed::new(&config.realtime);
        let clusters = regional_clusters();

        let first = dataset
            .table_at(0)
            .cloned()
            .ok_or(BarscapeError::EmptyDataset)?;
        let scales = ScaleSet::build(&first, &config, scheme);
        let scene = SceneBuilder::new(&config, &scales, chart_type).build(
            &first,
            &dataset.metadata,
            &clusters,
        );
        let analytics = engine.analyze_table(&first, SeriesSource::Totals);

        let mut app = Self {
            interaction: InteractionState::new(config.overlay_ms),
            config,
            dataset,
            source: None,
            fallback_reason: None,
            clusters,
            active: 0,
            scheme,
            chart_type,
            theme: Theme::default(),
            scales,
            scene,
            animator: Animator::new(),
            analytics,
            cursor: (0, 0),
            show_insights: true,
            status: "Ready".to_string(),
            engine,
            realtime,
            tasks: TaskQueue::new(),
            stats: SessionStats::new(now),
            now,
        };

        app.animator.entrance(&mut app.scene, &app.config, now);
        if app.realtime.is_enabled() {
            app.tasks
                .schedule_after(now, app.realtime.interval_ms(), Task::RealtimeTick);
        }
        tracing::info!(
            tables = app.dataset.len(),
            elements = app.scene.element_count(),
            "Application initialized"
        );
        Ok(app)
    }

    /// Record where the dataset came from.
    pub fn with_source(mut self, source: Option<PathBuf>, fallback_reason: Option<String>) -> Self {
        if let Some(reason) = &fallback_reason {
            self.status = format!("Using fallback dataset: {}", reason);
        } else if let Some(path) = &source {
            self.status = format!(
                "{} loaded",
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "file".to_string())
            );
        }
        self.source = source;
        self.fallback_reason = fallback_reason;
        self
    }

    /// The displayed table.
    pub fn table(&self) -> &Table {
        &self.dataset.tables[self.active]
    }

    /// Current session time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Whether simulated updates are running.
    pub fn realtime_enabled(&self) -> bool {
        self.realtime.is_enabled()
    }

    /// When the next deferred task is due.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.tasks.next_deadline()
    }

    /// Advance the clock: run due tasks and animations and count a frame.
    pub fn tick(&mut self, now: Millis) {
        self.now = self.now.max(now);
        for task in self.tasks.drain_due(self.now) {
            match task {
                Task::DismissOverlay(token) => {
                    self.interaction.dismiss_overlay(token, &mut self.scene);
                },
                Task::RealtimeTick => {
                    if self.realtime.is_enabled() {
                        self.apply_realtime_tick();
                        self.tasks.schedule_after(
                            self.now,
                            self.realtime.interval_ms(),
                            Task::RealtimeTick,
                        );
                    }
                },
            }
        }
        self.animator.tick(self.now, &mut self.scene);
        self.stats.frame(self.now);
    }

    /// Jump all running animations to their end state.
    pub fn finish_animations(&mut self) {
        self.animator.finish(&mut self.scene);
    }

    fn apply_realtime_tick(&mut self) {
        let active = self.active;
        let Some(table) = self.dataset.table_at_mut(active) else {
            return;
        };
        let changes = self.realtime.tick(table);
        if changes.is_empty() {
            return;
        }
        self.refresh_after_data_change();
    }

    /// Rebuild scales from the current values and update the scene in place.
    fn refresh_after_data_change(&mut self) {
        let table = &self.dataset.tables[self.active];
        self.scales = ScaleSet::build(table, &self.config, self.scheme);
        let animator = &self.animator;
        self.scene
            .refresh_values(table, &self.scales, &self.config, |id| animator.is_growing(id));
        self.interaction.reapply(&mut self.scene);
        self.recompute_analytics();
    }

    /// Build a fresh scene for the current table, chart type and scheme.
    fn rebuild_scene(&mut self) {
        let table = &self.dataset.tables[self.active];
        self.scales = ScaleSet::build(table, &self.config, self.scheme);
        self.scene = SceneBuilder::new(&self.config, &self.scales, self.chart_type).build(
            table,
            &self.dataset.metadata,
            &self.clusters,
        );
        self.interaction.rebind(&mut self.scene);
        self.animator.cancel();
        self.animator.entrance(&mut self.scene, &self.config, self.now);
        self.interaction.reapply(&mut self.scene);
        if let Some(hovered) = self.interaction.hovered() {
            self.animator.scale_to(&self.scene, hovered, HOVER_SCALE, self.now);
        }
        self.recompute_analytics();
    }

    /// Re-run analytics on the active series: the selected element's row, or
    /// column totals when nothing in the main chart is selected.
    pub fn recompute_analytics(&mut self) {
        let source = self
            .interaction
            .selected()
            .and_then(|id| self.scene.datum(id))
            .filter(|d| d.cluster.is_none())
            .map(|d| SeriesSource::Row(d.row))
            .unwrap_or_default();
        self.analytics = self.engine.analyze_table(self.table(), source);
    }

    /// Cycle to the next chart type.
    pub fn cycle_chart_type(&mut self) {
        self.chart_type = self.chart_type.next();
        self.rebuild_scene();
        self.status = format!("Chart: {}", self.chart_type.name());
    }

    /// Cycle to the next color scheme.
    pub fn cycle_scheme(&mut self) {
        self.scheme = self.scheme.next();
        self.scales.set_scheme(self.scheme);
        let table = &self.dataset.tables[self.active];
        let animator = &self.animator;
        self.scene
            .refresh_values(table, &self.scales, &self.config, |id| animator.is_growing(id));
        self.interaction.reapply(&mut self.scene);
        self.status = format!("Colors: {}", self.scheme.name());
    }

    /// Show the next table of the dataset.
    pub fn cycle_dataset(&mut self) {
        if self.dataset.len() < 2 {
            self.status = "Only one dataset loaded".to_string();
            return;
        }
        self.interaction.deselect(&mut self.scene);
        self.active = (self.active + 1) % self.dataset.len();
        self.cursor = (0, 0);
        self.rebuild_scene();
        self.status = format!("Dataset: {}", self.table().name);
    }

    /// Toggle the satellite clusters.
    pub fn toggle_clusters(&mut self) {
        self.config.clustering = !self.config.clustering;
        self.rebuild_scene();
        self.status = format!(
            "Clusters: {}",
            if self.config.clustering { "ON" } else { "OFF" }
        );
    }

    /// Toggle simulated real-time updates.
    pub fn toggle_realtime(&mut self) {
        if self.realtime.toggle() {
            self.tasks
                .schedule_after(self.now, self.realtime.interval_ms(), Task::RealtimeTick);
            self.status = "Real-time: ON".to_string();
        } else {
            self.tasks.retain(|t| *t != Task::RealtimeTick);
            self.status = "Real-time: OFF".to_string();
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Toggle the insights panel.
    pub fn toggle_insights(&mut self) {
        self.show_insights = !self.show_insights;
    }

    /// Replay the entrance animation.
    pub fn replay_entrance(&mut self) {
        self.animator.entrance(&mut self.scene, &self.config, self.now);
    }

    /// Move the keyboard cursor, hovering the element under it.
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (rows, cols) = self.scene.dims();
        if rows == 0 || cols == 0 {
            return;
        }
        let row = self.cursor.0.saturating_add_signed(d_row).min(rows - 1);
        let col = self.cursor.1.saturating_add_signed(d_col).min(cols - 1);
        self.hover_cell(row, col, PointerSource::Keyboard);
    }

    /// Hover the main-chart element at a cell and put the cursor there.
    pub fn hover_cell(&mut self, row: usize, col: usize, source: PointerSource) {
        let target = self.scene.element_at(row, col);
        if target.is_some() {
            self.cursor = (row, col);
        }
        let previous = self.interaction.hovered();
        if previous == target {
            return;
        }
        if let Some(previous) = previous {
            self.pointer(PointerEvent::leave(source, previous));
        }
        if let Some(target) = target {
            self.pointer(PointerEvent::enter(source, target));
        }
    }

    /// Release the hover, as when the pointer leaves the chart.
    pub fn clear_hover(&mut self, source: PointerSource) {
        if let Some(previous) = self.interaction.hovered() {
            self.pointer(PointerEvent::leave(source, previous));
        }
    }

    /// Select the element under the cursor.
    pub fn select_at_cursor(&mut self) {
        let (row, col) = self.cursor;
        self.click_cell(row, col, PointerSource::Keyboard);
    }

    /// Click the main-chart element at a cell.
    pub fn click_cell(&mut self, row: usize, col: usize, source: PointerSource) {
        match self.scene.element_at(row, col) {
            Some(target) => {
                self.cursor = (row, col);
                self.pointer(PointerEvent::click(source, target));
            },
            None => self.status = "Nothing under cursor".to_string(),
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        if self.interaction.selected().is_some() {
            self.interaction.deselect(&mut self.scene);
            self.recompute_analytics();
            self.status = "Selection cleared".to_string();
        }
    }

    /// Feed a pointer event from any input device.
    pub fn pointer(&mut self, event: PointerEvent) -> Response {
        let table = &self.dataset.tables[self.active];
        let clusters = &self.clusters;
        let scales = &self.scales;
        let value_label = self.dataset.metadata.value_label_or_default();
        let hovered_before = self.interaction.hovered();
        let response = self.interaction.handle(event, self.now, &mut self.scene, |d| {
            describe_datum(d, table, clusters, scales, value_label)
        });

        let hovered = self.interaction.hovered();
        if hovered != hovered_before {
            if let Some(node) = hovered_before {
                self.animator.scale_to(&self.scene, node, 1.0, self.now);
            }
            if let Some(node) = hovered {
                self.animator.scale_to(&self.scene, node, HOVER_SCALE, self.now);
            }
        }
        if let Some(node) = response.selected {
            let rest = if hovered == Some(node) { HOVER_SCALE } else { 1.0 };
            self.animator.pulse(node, self.now, rest);
            self.animator.spin(node, self.now);
            self.recompute_analytics();
        }
        if let Some((token, expires_at)) = response.overlay {
            self.tasks.schedule_at(expires_at, Task::DismissOverlay(token));
        }
        if let Some(overlay) = self.interaction.overlay() {
            if response.selected.is_some() {
                self.status = overlay.lines.join(" | ");
            }
        }
        response
    }

    /// Text describing the selected element.
    pub fn selected_description(&self) -> Option<String> {
        let datum = self
            .interaction
            .selected()
            .and_then(|id| self.scene.datum(id))?;
        let lines = describe_datum(
            datum,
            self.table(),
            &self.clusters,
            &self.scales,
            self.dataset.metadata.value_label_or_default(),
        );
        Some(lines.join("\n"))
    }

    /// Summary of the displayed table.
    pub fn summary(&self) -> DatasetSummary {
        let table = self.table();
        let cluster_bars = self.scene.element_count().saturating_sub(table.len());
        DatasetSummary::new(&self.dataset.metadata, table, cluster_bars, &self.scales.class)
    }

    /// Build the session report as of now.
    pub fn session_report(&self) -> SessionReport {
        SessionReport::new(
            &self.stats,
            self.now,
            self.interaction.log(),
            &self.analytics,
            self.summary(),
        )
    }

    /// Export the session report.
    pub fn export_report(&mut self, path: &Path) -> Result<()> {
        self.session_report().export(path)?;
        self.status = format!("Report written to {}", path.display());
        Ok(())
    }

    /// Average frame rate so far.
    pub fn average_fps(&self) -> f64 {
        self.stats.average_fps()
    }
}

/// Overlay lines for an element: category, period, value and value class.
fn describe_datum(
    datum: &Datum,
    table: &Table,
    clusters: &[Table],
    scales: &ScaleSet,
    value_label: &str,
) -> Vec<String> {
    let source = match datum.cluster {
        Some(index) => clusters.get(index).unwrap_or(table),
        None => table,
    };
    let category = match datum.cluster {
        Some(_) => format!("{} / {}", source.name, source.row_label(datum.row)),
        None => source.row_label(datum.row).to_string(),
    };
    vec![
        category,
        source.column_label(datum.col).to_string(),
        format!("{}: {}", value_label, format_value(datum.value)),
        format!("Class: {}", scales.class.label(datum.value)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RealtimeConfig;
    use crate::data::fallback_dataset;
    use crate::interaction::PointerKind;
    use crate::scene::{Material, NodeId, Shape};

    fn realtime_app() -> App {
        let config = ChartConfig {
            realtime: RealtimeConfig {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(fallback_dataset(), config, 0).unwrap()
    }

    fn box_height(app: &App, id: NodeId) -> f32 {
        match app.scene.graph.get(id).unwrap().shape {
            Shape::Box { height, .. } => height,
            _ => panic!("not a box"),
        }
    }

    fn scale(app: &App, id: NodeId) -> f32 {
        app.scene.graph.get(id).unwrap().transform.scale.x
    }

    fn app() -> App {
        App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.table().name, "sales");
        assert_eq!(app.scene.element_count(), 16 + 6 * 16);
        assert_eq!(app.analytics.source, SeriesSource::Totals);
        assert!(!app.animator.is_idle());
    }

    #[test]
    fn test_select_updates_analytics_and_schedules_dismissal() {
        let mut app = app();
        app.tick(2000);
        app.cursor = (1, 2);
        app.select_at_cursor();

        assert_eq!(app.analytics.source, SeriesSource::Row(1));
        assert_eq!(app.analytics.label, "Clothing");
        let overlay = app.interaction.overlay().unwrap();
        assert_eq!(overlay.lines[0], "Clothing");
        assert_eq!(overlay.lines[2], "Sales ($K): 95");
        assert_eq!(overlay.lines[3], "Class: High");

        app.tick(4999);
        assert!(app.interaction.overlay().is_some());
        app.tick(5000);
        assert!(app.interaction.overlay().is_none());
    }

    #[test]
    fn test_newer_overlay_survives_old_dismissal() {
        let mut app = app();
        app.select_at_cursor();
        app.tick(1000);
        app.cursor = (0, 1);
        app.select_at_cursor();

        // first overlay's dismissal fires at 3000
        app.tick(3000);
        let overlay = app.interaction.overlay().unwrap();
        assert_eq!(overlay.lines[1], "Q2 2022");
        app.tick(4000);
        assert!(app.interaction.overlay().is_none());
    }

    #[test]
    fn test_cursor_hover_moves() {
        let mut app = app();
        app.move_cursor(0, 1);
        let first = app.scene.element_at(0, 1).unwrap();
        assert_eq!(app.interaction.hovered(), Some(first));

        app.move_cursor(1, 0);
        let second = app.scene.element_at(1, 1).unwrap();
        assert_eq!(app.interaction.hovered(), Some(second));
        assert!(!app.scene.graph.get(first).unwrap().material.is_highlight());

        app.move_cursor(-10, 10);
        assert_eq!(app.cursor, (0, 3));
    }

    #[test]
    fn test_deselect_restores_totals() {
        let mut app = app();
        app.select_at_cursor();
        app.deselect();
        assert_eq!(app.analytics.source, SeriesSource::Totals);
        assert!(app.interaction.selected().is_none());
    }

    #[test]
    fn test_chart_type_change_keeps_selection() {
        let mut app = app();
        app.cursor = (2, 3);
        app.select_at_cursor();
        app.cycle_chart_type();

        assert_eq!(app.chart_type, ChartType::Points);
        let selected = app.interaction.selected().unwrap();
        let datum = app.scene.datum(selected).unwrap();
        assert_eq!((datum.row, datum.col), (2, 3));
        assert_eq!(app.scene.graph.get(selected).unwrap().material, Material::selected());
    }

    #[test]
    fn test_scheme_change_keeps_highlight() {
        let mut app = app();
        app.select_at_cursor();
        let selected = app.interaction.selected().unwrap();
        let other = app.scene.element_at(3, 3).unwrap();
        let before = app.scene.graph.get(other).unwrap().material;

        app.cycle_scheme();
        assert_eq!(app.scheme, ColorScheme::Plasma);
        assert_eq!(app.scene.graph.get(selected).unwrap().material, Material::selected());
        assert_ne!(app.scene.graph.get(other).unwrap().material, before);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChartConfig {
            realtime: RealtimeConfig {
                jitter: 1e308,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = App::new(fallback_dataset(), config, 0).unwrap_err();
        assert!(matches!(err, BarscapeError::Config(_)));
    }

    #[test]
    fn test_cycle_dataset() {
        let mut app = app();
        app.cycle_dataset();
        assert_eq!(app.table().name, "regional");
        assert_eq!(app.analytics.label, "regional (totals)");
        app.cycle_dataset();
        assert_eq!(app.table().name, "sales");
    }

    #[test]
    fn test_realtime_ticks_change_last_column() {
        let mut app = realtime_app();
        let before = app.table().clone();
        assert_eq!(app.next_deadline(), Some(2000));

        app.tick(1999);
        assert_eq!(app.table(), &before);
        app.tick(2000);
        assert_eq!(app.table().value(0, 0), before.value(0, 0));
        assert_ne!(app.table().value(0, 3), before.value(0, 3));
        assert_eq!(app.next_deadline(), Some(4000));

        app.toggle_realtime();
        assert_eq!(app.next_deadline(), None);
    }

    #[test]
    fn test_realtime_tick_during_entrance_keeps_waiting_elements_collapsed() {
        let mut app = realtime_app();
        // element 100 starts growing at 100 * 30 ms
        let late = app.scene.elements()[100];

        app.tick(1999);
        assert_eq!(box_height(&app, late), 0.0);
        app.tick(2000);
        assert_eq!(box_height(&app, late), 0.0);
        app.tick(2999);
        assert_eq!(box_height(&app, late), 0.0);

        app.tick(3500);
        assert!(box_height(&app, late) > 0.0);
        app.tick(4000);
        let full = app.scene.datum(late).unwrap().height;
        assert_eq!(box_height(&app, late), full);
    }

    #[test]
    fn test_scheme_change_during_entrance_keeps_waiting_elements_collapsed() {
        let mut app = app();
        app.tick(100);
        let last = *app.scene.elements().last().unwrap();
        app.cycle_scheme();
        assert_eq!(box_height(&app, last), 0.0);
        assert_eq!(
            app.scene.graph.get(last).unwrap().material,
            app.scene.datum(last).unwrap().rest
        );
    }

    #[test]
    fn test_pointer_leaving_chart_clears_hover() {
        let mut app = app();
        app.hover_cell(1, 1, PointerSource::Mouse);
        let id = app.scene.element_at(1, 1).unwrap();
        assert_eq!(app.interaction.hovered(), Some(id));

        app.clear_hover(PointerSource::Mouse);
        assert_eq!(app.interaction.hovered(), None);
        assert!(!app.scene.graph.get(id).unwrap().material.is_highlight());
        let last = app.interaction.log().last().unwrap();
        assert_eq!(last.kind, PointerKind::Leave);

        // nothing hovered, nothing recorded
        app.clear_hover(PointerSource::Mouse);
        assert_eq!(app.interaction.log().len(), 2);
    }

    #[test]
    fn test_hover_grows_element_and_leave_restores() {
        let mut app = app();
        app.finish_animations();
        app.hover_cell(0, 2, PointerSource::Mouse);
        let id = app.scene.element_at(0, 2).unwrap();
        app.tick(300);
        assert_eq!(scale(&app, id), HOVER_SCALE);

        app.hover_cell(0, 3, PointerSource::Mouse);
        app.tick(600);
        assert_eq!(scale(&app, id), 1.0);
        assert_eq!(scale(&app, app.scene.element_at(0, 3).unwrap()), HOVER_SCALE);
    }

    #[test]
    fn test_click_spins_and_pulses() {
        let mut app = app();
        app.finish_animations();
        app.tick(1000);
        app.click_cell(3, 0, PointerSource::Mouse);
        let id = app.scene.element_at(3, 0).unwrap();
        let yaw = |app: &App| app.scene.graph.get(id).unwrap().transform.yaw;

        app.tick(1200);
        assert_eq!(scale(&app, id), 1.2);
        assert!(yaw(&app) > 0.0);
        app.tick(2200);
        assert_eq!(scale(&app, id), 1.0);
        assert_eq!(yaw(&app), 0.0);
        assert!(app.animator.is_idle());
    }

    #[test]
    fn test_report_counts_value_classes() {
        let app = app();
        let report = app.session_report();
        let total: usize = report.dataset.classes.values().sum();
        assert_eq!(total, 16);
        assert_eq!(report.dataset.classes.get("Very High"), Some(&4));
    }

    #[test]
    fn test_report_includes_interactions() {
        let mut app = app();
        app.move_cursor(0, 1);
        app.select_at_cursor();
        app.tick(1000);

        let report = app.session_report();
        assert_eq!(report.interactions.len(), 2);
        assert_eq!(report.session_duration_ms, 1000);
        assert_eq!(report.dataset.total_bars, 16 + 96);
        assert!(report.predictions.is_some());
    }
}
