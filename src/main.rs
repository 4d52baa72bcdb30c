//! Barscape - A 3D bar-chart data visualizer for the terminal.

use anyhow::{Context, Result};
use barscape::app::App;
use barscape::clipboard;
use barscape::config::{ChartConfig, LoadPolicy};
use barscape::data::{fallback_dataset, DataReader, LoadOutcome};
use barscape::interaction::PointerSource;
use barscape::scale::ColorScheme;
use barscape::scene::ChartType;
use barscape::ui;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where `e` writes the session report.
const DEFAULT_REPORT: &str = "barscape-report.json";

/// Longest wait for input between frames.
const FRAME_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "barscape")]
#[command(about = "A 3D bar-chart data visualizer with trend forecasting", long_about = None)]
struct Args {
    /// JSON dataset to open (built-in sample data when omitted)
    file: Option<PathBuf>,

    /// JSON chart configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// What to do when the dataset cannot be loaded: strict or fallback
    #[arg(long, value_parser = parse_policy)]
    policy: Option<LoadPolicy>,

    /// Initial color scheme: viridis, plasma, inferno, rainbow, bluered
    #[arg(long, value_parser = parse_scheme)]
    scheme: Option<ColorScheme>,

    /// Initial chart type: bars, points, lines
    #[arg(long, value_parser = parse_chart)]
    chart: Option<ChartType>,

    /// Hide the satellite clusters
    #[arg(long)]
    no_clusters: bool,

    /// Start with simulated real-time updates
    #[arg(long)]
    realtime: bool,

    /// Seed for simulated real-time updates
    #[arg(long)]
    seed: Option<u64>,

    /// Select ROW,COL before exporting (headless mode only)
    #[arg(long, value_parser = parse_cell, requires = "report")]
    select: Option<(usize, usize)>,

    /// Write a session report to this file and exit without opening the UI
    #[arg(long)]
    report: Option<PathBuf>,
}

fn parse_policy(s: &str) -> std::result::Result<LoadPolicy, String> {
    match s.to_ascii_lowercase().as_str() {
        "strict" => Ok(LoadPolicy::Strict),
        "fallback" => Ok(LoadPolicy::Fallback),
        _ => Err(format!("unknown policy '{}' (expected strict or fallback)", s)),
    }
}

fn parse_scheme(s: &str) -> std::result::Result<ColorScheme, String> {
    let wanted = s.to_ascii_lowercase().replace('-', "");
    ColorScheme::ALL
        .into_iter()
        .find(|scheme| scheme.name().to_ascii_lowercase().replace('-', "") == wanted)
        .ok_or_else(|| format!("unknown color scheme '{}'", s))
}

fn parse_chart(s: &str) -> std::result::Result<ChartType, String> {
    [ChartType::Bars, ChartType::Points, ChartType::Lines]
        .into_iter()
        .find(|chart| chart.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown chart type '{}'", s))
}

fn parse_cell(s: &str) -> std::result::Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row.trim().parse().map_err(|_| format!("bad row '{}'", row))?;
    let col = col.trim().parse().map_err(|_| format!("bad column '{}'", col))?;
    Ok((row, col))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_config(args: &Args) -> Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.load_policy = policy;
    }
    if let Some(scheme) = args.scheme {
        config.color_scheme = scheme;
    }
    if let Some(chart) = args.chart {
        config.chart_type = chart;
    }
    if args.no_clusters {
        config.clustering = false;
    }
    if args.realtime {
        config.realtime.enabled = true;
    }
    if let Some(seed) = args.seed {
        config.realtime.seed = seed;
    }
    Ok(config)
}

fn load(args: &Args, config: &ChartConfig) -> barscape::Result<LoadOutcome> {
    match &args.file {
        Some(path) => DataReader::load(path, config.load_policy),
        None => Ok(LoadOutcome {
            dataset: fallback_dataset(),
            fallback_reason: None,
        }),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        init_logging(log_path)?;
        tracing::info!("Starting Barscape");
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        },
    };

    let outcome = match load(&args, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };
    if let Some(reason) = &outcome.fallback_reason {
        eprintln!("Warning: using fallback dataset: {}", reason);
    }

    if let Some(report_path) = &args.report {
        let mut app = App::new(outcome.dataset, config, 0)?
            .with_source(args.file.clone(), outcome.fallback_reason);
        app.finish_animations();
        if let Some((row, col)) = args.select {
            app.click_cell(row, col, PointerSource::Keyboard);
        }
        app.export_report(report_path)?;
        println!("{}", report_path.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = App::new(outcome.dataset, config, 0)
        .map(|app| app.with_source(args.file.clone(), outcome.fallback_reason))
        .map_err(anyhow::Error::from)
        .and_then(|app| run_app(&mut terminal, app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Barscape exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let start = Instant::now();

    loop {
        let now = start.elapsed().as_millis() as u64;
        app.tick(now);
        terminal.draw(|f| ui::draw(f, &app))?;

        let wait = app
            .next_deadline()
            .map_or(FRAME_MS, |due| due.saturating_sub(now).min(FRAME_MS));
        if !event::poll(Duration::from_millis(wait))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q'))
                    | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),

                    // Navigation
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-1, 0),
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(1, 0),
                    (KeyModifiers::NONE, KeyCode::Left)
                    | (KeyModifiers::NONE, KeyCode::Char('h')) => app.move_cursor(0, -1),
                    (KeyModifiers::NONE, KeyCode::Right)
                    | (KeyModifiers::NONE, KeyCode::Char('l')) => app.move_cursor(0, 1),

                    // Selection
                    (KeyModifiers::NONE, KeyCode::Enter)
                    | (KeyModifiers::NONE, KeyCode::Char(' ')) => app.select_at_cursor(),
                    (KeyModifiers::NONE, KeyCode::Esc) => app.deselect(),

                    // View
                    (KeyModifiers::NONE, KeyCode::Char('c')) => app.cycle_chart_type(),
                    (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_scheme(),
                    (KeyModifiers::NONE, KeyCode::Char('d')) => app.cycle_dataset(),
                    (KeyModifiers::NONE, KeyCode::Char('g')) => app.toggle_clusters(),
                    (KeyModifiers::NONE, KeyCode::Char('r')) => app.toggle_realtime(),
                    (KeyModifiers::NONE, KeyCode::Char('a')) => app.replay_entrance(),
                    (KeyModifiers::NONE, KeyCode::Char('i')) => app.toggle_insights(),
                    (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),

                    // Clipboard
                    (KeyModifiers::NONE, KeyCode::Char('y')) => match clipboard::copy_selection(&app)
                    {
                        Ok(_) => app.status = "Selection copied!".to_string(),
                        Err(e) => app.status = format!("Copy failed: {}", e),
                    },

                    // Report
                    (KeyModifiers::NONE, KeyCode::Char('e')) => {
                        if let Err(e) = app.export_report(&PathBuf::from(DEFAULT_REPORT)) {
                            app.status = format!("Export failed: {}", e);
                        }
                    },

                    _ => {},
                }
            },
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                let cell = ui::cell_at(area, &app, mouse.column, mouse.row);
                match (mouse.kind, cell) {
                    (MouseEventKind::Down(MouseButton::Left), Some((row, col))) => {
                        app.click_cell(row, col, PointerSource::Mouse);
                    },
                    (MouseEventKind::Moved, Some((row, col))) => {
                        app.hover_cell(row, col, PointerSource::Mouse);
                    },
                    (MouseEventKind::Moved, None) => app.clear_hover(PointerSource::Mouse),
                    _ => {},
                }
            },
            _ => {},
        }
    }
}
