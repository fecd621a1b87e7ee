//! Input handling: maps key/mouse events and frame ticks to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::{debug, info, warn};

use crate::config::Action;
use crate::core::picker::PickerEvent;
use crate::core::workout::{self, format_weight, Exercise, LoggedSet};
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::picker_widget::{picker_geometry, row_to_units};
use crate::ui::workout_view::workout_geometry;

use super::state::{ActiveView, AppState, PointerPress};

/// Rows skipped by PageUp / PageDown inside a picker.
const PAGE_STEP: isize = 5;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    // Only act on presses (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match state.active_view {
        ActiveView::Workout => handle_workout_key(state, key),
        ActiveView::WeightPicker | ActiveView::RepPicker => handle_picker_key(state, key, now),
    }
}

// ── Workout view (configurable bindings) ────────────────────────

fn handle_workout_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::PickWeight => open_weight_picker(state),
        Action::LogSet => open_rep_picker(state),
        Action::ResetWeight => state.weight = workout::DEFAULT_DUMBBELL_WEIGHT,
        Action::DeleteLastSet => delete_last_set(state),
        Action::NextExercise => {
            let next = state.exercise.next();
            select_exercise(state, next);
        }
        Action::PrevExercise => {
            let prev = state.exercise.prev();
            select_exercise(state, prev);
        }
    }
}

fn open_weight_picker(state: &mut AppState) {
    state.weight_picker.show(state.weight);
    state.active_view = ActiveView::WeightPicker;
}

fn open_rep_picker(state: &mut AppState) {
    state.rep_picker.show(f64::from(state.last_reps));
    state.active_view = ActiveView::RepPicker;
}

/// Switching to a different exercise starts from the default weight.
fn select_exercise(state: &mut AppState, exercise: Exercise) {
    if exercise != state.exercise {
        state.weight = workout::DEFAULT_DUMBBELL_WEIGHT;
    }
    state.exercise = exercise;
}

fn delete_last_set(state: &mut AppState) {
    if let Some(set) = state.log.pop_last() {
        info!(exercise = %set.exercise, "deleted last set");
        state.status_message = Some(format!("Deleted {}", set.summary()));
        persist_log(state);
    }
}

fn persist_log(state: &mut AppState) {
    if !state.log_writable {
        warn!("set log left untouched, it could not be read at startup");
        state.status_message = Some("Not saved: stored set log is unreadable".to_string());
        return;
    }
    if let Err(e) = state.log.save(state.store.as_mut()) {
        warn!("failed to save set log: {e}");
        state.status_message = Some(format!("Save failed: {e}"));
    }
}

// ── Picker modals (hardcoded keys) ──────────────────────────────

fn handle_picker_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let Some(picker) = state.active_picker_mut() else {
        return;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => picker.step(-1),
        KeyCode::Down | KeyCode::Char('j') => picker.step(1),
        KeyCode::PageUp => picker.step(-PAGE_STEP),
        KeyCode::PageDown => picker.step(PAGE_STEP),
        KeyCode::Home => picker.on_tap(0),
        KeyCode::End => picker.on_tap(usize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') => confirm_picker(state, now),
        KeyCode::Esc | KeyCode::Char('q') => dismiss_picker(state),
        _ => {}
    }
}

/// Apply the picker's selected value and close the modal.
fn confirm_picker(state: &mut AppState, now: Instant) {
    match state.active_view {
        ActiveView::WeightPicker => {
            state.weight = state.weight_picker.selected_value();
            state.weight_picker.cancel();
            debug!(weight = state.weight, "weight confirmed");
        }
        ActiveView::RepPicker => {
            let reps = state.rep_picker.selected_value().round().max(1.0) as u32;
            state.rep_picker.cancel();
            state.last_reps = reps;
            log_set(state, reps, now);
        }
        ActiveView::Workout => return,
    }
    state.press = None;
    state.active_view = ActiveView::Workout;
}

/// Close the modal without applying anything.
fn dismiss_picker(state: &mut AppState) {
    if let Some(picker) = state.active_picker_mut() {
        picker.cancel();
    }
    state.press = None;
    state.active_view = ActiveView::Workout;
}

fn log_set(state: &mut AppState, reps: u32, now: Instant) {
    let set = LoggedSet::new(state.exercise, state.weight, reps);
    info!(exercise = %set.exercise, weight = set.weight, reps, "set logged");
    state.status_message = Some(format!("Logged {}", set.summary()));
    state.log.push(set);
    persist_log(state);
    state.rest.reset(now);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    match state.active_view {
        ActiveView::Workout => handle_workout_mouse(state, mouse),
        ActiveView::WeightPicker | ActiveView::RepPicker => {
            handle_picker_mouse(state, mouse, now)
        }
    }
}

fn handle_workout_mouse(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let layout = AppLayout::from_area(state.terminal_area);
    let geom = workout_geometry(layout.main_area);
    if point_in_rect(geom.dumbbells, mouse.column, mouse.row) {
        open_weight_picker(state);
    } else if point_in_rect(geom.sets, mouse.column, mouse.row) {
        open_rep_picker(state);
    }
}

fn handle_picker_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let ts = state.timestamp_ms(now);
    let area = state.terminal_area;
    let press = state.press;
    let Some(picker) = state.active_picker_mut() else {
        return;
    };
    let config = picker.config();
    let geom = picker_geometry(area, config.visible_rows);
    let y = row_to_units(geom.viewport, mouse.row, config.row_height);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(geom.viewport, mouse.column, mouse.row) {
                picker.on_pointer_down(y, ts);
                state.press = Some(PointerPress {
                    start_row: mouse.row,
                    moved: false,
                });
            } else if point_in_rect(geom.ok_button, mouse.column, mouse.row) {
                confirm_picker(state, now);
            } else if point_in_rect(geom.cancel_button, mouse.column, mouse.row) {
                dismiss_picker(state);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(mut press) = press {
                picker.on_pointer_move(y, ts);
                press.moved |= mouse.row != press.start_row;
                state.press = Some(press);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(press) = press else {
                return;
            };
            // A release on the row it was pressed on is a tap.
            let tapped = if press.moved {
                None
            } else {
                picker.index_at(y)
            };
            match tapped {
                Some(index) => picker.on_tap(index),
                None => {
                    // The release is the final sample; a pause before it
                    // zeroes the velocity.
                    picker.on_pointer_move(y, ts);
                    picker.on_pointer_up();
                }
            }
            state.press = None;
        }
        MouseEventKind::ScrollUp => picker.step(-1),
        MouseEventKind::ScrollDown => picker.step(1),
        _ => {}
    }
}

// ── Frames ──────────────────────────────────────────────────────

/// Step the visible picker's animation and drain picker notifications.
/// Called after every event, including idle ticks.
pub fn advance_frame(state: &mut AppState, now: Instant) {
    let ts = state.timestamp_ms(now);
    if let Some(picker) = state.active_picker_mut() {
        if let Some(token) = picker.frame_request() {
            picker.on_frame(token, ts);
        }
    }

    for event in state.weight_picker.drain_events() {
        trace_picker_event("weight", event, format_weight);
    }
    for event in state.rep_picker.drain_events() {
        trace_picker_event("reps", event, |v| format!("{v}"));
    }
}

fn trace_picker_event(picker: &str, event: PickerEvent, fmt: impl Fn(f64) -> String) {
    match event {
        PickerEvent::HighlightChanged { index, value } => {
            debug!(picker, index, value = %fmt(value), "highlight");
        }
        PickerEvent::SelectionChanged { index, value } => {
            debug!(picker, index, value = %fmt(value), "selection changed");
        }
    }
}
