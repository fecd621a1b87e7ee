//! A terminal dumbbell workout logger.
//!
//! Run the binary to open the workout screen.  Weights and reps are chosen
//! with scroll pickers that follow the mouse (drag, fling, tap) or the
//! keyboard.  Run with `--print-sets` to dump the log instead.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing::info;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::{
    store::{FileStore, KeyValueStore, MemoryStore},
    workout::{Exercise, SetLog},
};
use crate::ui::{
    layout::AppLayout, picker_widget::PickerWidget, theme::Theme, workout_view::WorkoutView,
};

const PICKER_HINT: &str = "drag/↑↓: choose | Enter: OK | Esc: cancel";

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Dumbbell workout logger")]
struct Cli {
    /// Exercise to start on (shoulder-press, bench-press, row, curl, lateral-raise).
    #[arg(long, value_parser = parse_exercise)]
    exercise: Option<Exercise>,

    /// Starting weight per dumbbell in kg.
    #[arg(long)]
    weight: Option<f64>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Directory holding the set log.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Keep the set log in memory only.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print every logged set and exit.
    #[arg(long = "print-sets")]
    print_sets: bool,

    /// Write the effective configuration file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn parse_exercise(s: &str) -> Result<Exercise, String> {
    Exercise::from_key(s).ok_or_else(|| {
        let known: Vec<&str> = Exercise::ALL.iter().map(|e| e.key()).collect();
        format!("unknown exercise `{s}` (expected one of: {})", known.join(", "))
    })
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

fn open_store(cli: &Cli) -> Box<dyn KeyValueStore> {
    if cli.dry_run {
        return Box::new(MemoryStore::default());
    }
    let store = match &cli.data_dir {
        Some(dir) => FileStore::new(dir.clone()),
        None => FileStore::open_default(),
    };
    info!(dir = %store.dir().display(), "set log directory");
    Box::new(store)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let user_config = config::AppConfig::load();
    if cli.write_config {
        user_config.save()?;
        println!("{}", config::config_path().display());
        return Ok(());
    }

    let store = open_store(&cli);

    // ── print mode ────────────────────────────────────────────
    if cli.print_sets {
        let log = SetLog::load(&*store).context("failed to read set log")?;
        for set in log.sets() {
            println!("{}  {:<14} {}", set.date.to_rfc3339(), set.exercise, set.summary());
        }
        return Ok(());
    }

    let frame_interval = Duration::from_millis(user_config.frame_ms);
    let mut state = AppState::new(user_config, store, Instant::now())?;
    if let Some(exercise) = cli.exercise {
        state.exercise = exercise;
    }
    if let Some(weight) = cli.weight {
        // Snap to the nearest weight on offer.
        state.weight_picker.show(weight);
        state.weight = state.weight_picker.selected_value();
    }
    info!(exercise = state.exercise.key(), weight = state.weight, "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let now = Instant::now();
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            frame.render_widget(WorkoutView { state: &state, now }, layout.main_area);

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Workout => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::WeightPicker | ActiveView::RepPicker => PICKER_HINT,
            };
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            let title = match state.active_view {
                ActiveView::WeightPicker => "Weight",
                ActiveView::RepPicker => "Reps",
                ActiveView::Workout => "",
            };
            if let Some(picker) = state.active_picker() {
                frame.render_widget(PickerWidget { picker, title }, frame.area());
            }
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k, at) => handler::handle_key(&mut state, k, at),
            AppEvent::Mouse(m, at) => handler::handle_mouse(&mut state, m, at),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {}
        }
        handler::advance_frame(&mut state, Instant::now());

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(sets = state.log.sets().len(), "bye");
    Ok(())
}
