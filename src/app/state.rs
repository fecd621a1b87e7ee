//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;
use tracing::warn;

use crate::config::AppConfig;
use crate::core::{
    picker::{PickerError, ScrollPicker},
    store::KeyValueStore,
    workout::{self, Exercise, RestTimer, SetLog},
};

/// Which view / modal is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Workout,
    WeightPicker,
    RepPicker,
}

/// A left-button press that started inside a picker viewport.
#[derive(Debug, Clone, Copy)]
pub struct PointerPress {
    pub start_row: u16,
    /// Set once the pointer leaves the row it was pressed on.
    pub moved: bool,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub exercise: Exercise,
    /// Per-dumbbell weight in kg.
    pub weight: f64,
    /// Seed for the rep picker; the last confirmed rep count.
    pub last_reps: u32,
    pub log: SetLog,
    pub store: Box<dyn KeyValueStore>,
    /// Cleared when the stored log could not be read, so the unreadable
    /// history is never overwritten.
    pub log_writable: bool,
    pub weight_picker: ScrollPicker,
    pub rep_picker: ScrollPicker,
    pub rest: RestTimer,
    pub active_view: ActiveView,
    pub press: Option<PointerPress>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last drawn terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Origin for the millisecond timestamps fed to the pickers.
    pub clock: Instant,
}

impl AppState {
    /// Build the state, loading the set log from `store`.
    pub fn new(
        config: AppConfig,
        store: Box<dyn KeyValueStore>,
        now: Instant,
    ) -> Result<Self, PickerError> {
        let (log, log_writable, status_message) = match SetLog::load(store.as_ref()) {
            Ok(log) => (log, true, None),
            Err(e) => {
                warn!("failed to load set log, new sets will not be saved: {e}");
                (
                    SetLog::default(),
                    false,
                    Some(format!("Set log unreadable, saving disabled: {e}")),
                )
            }
        };
        let weight_picker = ScrollPicker::new(
            config.picker.clone(),
            workout::dumbbell_weight_options(),
            workout::DEFAULT_DUMBBELL_WEIGHT,
        )?;
        let rep_picker = ScrollPicker::new(
            config.picker.clone(),
            workout::rep_options(),
            f64::from(workout::DEFAULT_REPS),
        )?;

        Ok(Self {
            config,
            exercise: Exercise::default(),
            weight: workout::DEFAULT_DUMBBELL_WEIGHT,
            last_reps: workout::DEFAULT_REPS,
            log,
            store,
            log_writable,
            weight_picker,
            rep_picker,
            rest: RestTimer::start(now),
            active_view: ActiveView::default(),
            press: None,
            should_quit: false,
            status_message,
            terminal_area: Rect::default(),
            clock: now,
        })
    }

    /// The picker shown by the active modal, if any.
    pub fn active_picker(&self) -> Option<&ScrollPicker> {
        match self.active_view {
            ActiveView::WeightPicker => Some(&self.weight_picker),
            ActiveView::RepPicker => Some(&self.rep_picker),
            ActiveView::Workout => None,
        }
    }

    pub fn active_picker_mut(&mut self) -> Option<&mut ScrollPicker> {
        match self.active_view {
            ActiveView::WeightPicker => Some(&mut self.weight_picker),
            ActiveView::RepPicker => Some(&mut self.rep_picker),
            ActiveView::Workout => None,
        }
    }

    /// Milliseconds since startup, the picker timestamp unit.
    pub fn timestamp_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.clock).as_secs_f64() * 1000.0
    }
}
