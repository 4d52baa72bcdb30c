//! Side panels: dataset summary, clusters and analytics.

use crate::analytics::{AnalyticsSnapshot, SeriesSource};
use crate::app::App;
use crate::scale::CATEGORY10;
use crate::scene::format_value;
use crate::ui::formatters::{format_percent, format_stat_value, truncate_to_width};
use crate::ui::theme::rgb;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn panel<'a>(title: &str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(colors.heading))
}

fn field<'a>(label: &str, value: String, colors: &ThemeColors) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(colors.label)),
        Span::styled(value, Style::default().fg(colors.value)),
    ])
}

/// Draw the dataset summary panel.
pub fn draw_summary(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let summary = app.summary();
    let mut lines = Vec::new();

    if let Some(subtitle) = &app.dataset.metadata.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().fg(colors.text).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(field("Table", summary.table.clone(), colors));
    lines.push(field("Size", summary.matrix_size.clone(), colors));
    lines.push(field("Elements", summary.total_bars.to_string(), colors));
    lines.push(field(
        "Range",
        format!("{} .. {}", format_value(summary.min), format_value(summary.max)),
        colors,
    ));
    lines.push(field("Mean", format_stat_value(summary.mean), colors));
    lines.push(field(
        "Realtime",
        if app.realtime_enabled() { "ON" } else { "OFF" }.to_string(),
        colors,
    ));
    lines.push(field("FPS", format!("{:.1}", app.average_fps()), colors));

    if app.config.clustering {
        let width = area.width.saturating_sub(4) as usize;
        for (index, cluster) in app.clusters.iter().enumerate() {
            let mean = cluster.mean().unwrap_or(0.0);
            let text = truncate_to_width(&format!("{} ({})", cluster.name, format_value(mean)), width);
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(rgb(CATEGORY10[index % CATEGORY10.len()]))),
                Span::styled(text, Style::default().fg(colors.text)),
            ]));
        }
    }

    if let Some(reason) = &app.fallback_reason {
        lines.push(Line::from(Span::styled(
            format!("Fallback: {}", reason),
            Style::default().fg(colors.warning),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(&summary.title, colors))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Draw the analytics panel for the active series.
pub fn draw_insights(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let lines = insight_lines(&app.analytics, colors);
    let title = match app.analytics.source {
        SeriesSource::Totals => "Insights".to_string(),
        SeriesSource::Row(_) => format!("Insights: {}", app.analytics.label),
    };
    let paragraph = Paragraph::new(lines)
        .block(panel(&title, colors))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn insight_lines<'a>(snapshot: &AnalyticsSnapshot, colors: &ThemeColors) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    match &snapshot.forecast {
        Some(forecast) => {
            let values: Vec<String> = forecast.values.iter().map(|v| format_value(*v)).collect();
            lines.push(field("Forecast", values.join(", "), colors));
            lines.push(field(
                "Trend",
                format!(
                    "{} ({:.0}% confidence)",
                    forecast.trend.name(),
                    forecast.confidence * 100.0
                ),
                colors,
            ));
        },
        None => lines.push(field("Forecast", "not enough data".to_string(), colors)),
    }

    if let Some(last) = snapshot.trend.short_average.last() {
        lines.push(field("Short MA", format_stat_value(last.value), colors));
    }
    if let Some(last) = snapshot.trend.long_average.last() {
        lines.push(field("Long MA", format_stat_value(last.value), colors));
    }
    lines.push(field(
        "Avg growth",
        format_percent(snapshot.trend.average_growth),
        colors,
    ));
    if let Some(v) = snapshot.trend.volatility {
        lines.push(field("Volatility", format_stat_value(v), colors));
    }

    if !snapshot.anomalies.is_empty() {
        let text: Vec<String> = snapshot
            .anomalies
            .iter()
            .map(|a| format!("#{} z={:.2}", a.index + 1, a.z_score))
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Anomalies: ", Style::default().fg(colors.label)),
            Span::styled(text.join(", "), Style::default().fg(colors.error)),
        ]));
    }

    lines.push(Line::from(""));
    for insight in &snapshot.insights {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(colors.severity(insight.severity))),
            Span::styled(insight.message.clone(), Style::default().fg(colors.text)),
        ]));
    }
    lines
}
