//! Momentum scroll picker: a vertical list of discrete values that is
//! dragged, flung or tapped and always settles on exactly one option.
//!
//! The picker is pure arithmetic over an authoritative `offset`: the list is
//! translated by `offset` relative to the viewport, row `i` starts at
//! `offset + i * row_height`, and row `i` is centred when
//! `offset == center_offset - i * row_height`.  Nothing here knows about
//! terminals or rendering; the host feeds pointer samples and frame ticks and
//! drains [`PickerEvent`]s.
//!
//! Animations are stepped by the host.  Each one is identified by a
//! generation token ([`FrameToken`]); any new gesture bumps the generation so
//! a frame scheduled for a superseded animation does nothing.

use thiserror::Error;
use tracing::debug;

use super::easing::{Easing, Tween};

// ───────────────────────────────────────── options ───────────

/// One selectable row: display label plus numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    label: String,
    value: f64,
}

impl PickerOption {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

// ───────────────────────────────────────── config ────────────

/// Tunable physics constants.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    /// Height of one option row, in pointer units.
    pub row_height: f64,
    /// Rows visible in the viewport.  The centre row holds the selection.
    pub visible_rows: u16,
    /// Pointer-to-offset scale applied while dragging.
    pub sensitivity: f64,
    /// Release speed (units/second) above which a fling gets momentum.
    pub momentum_threshold: f64,
    /// Seconds of release velocity carried into the fling distance.
    pub momentum_damping: f64,
    pub momentum_duration_ms: f64,
    pub snap_duration_ms: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            row_height: 30.0,
            visible_rows: 7,
            sensitivity: 1.0,
            momentum_threshold: 20.0,
            momentum_damping: 0.25,
            momentum_duration_ms: 400.0,
            snap_duration_ms: 250.0,
        }
    }
}

impl PickerConfig {
    /// Offset of the viewport's centre row from the top of the viewport.
    pub fn center_offset(&self) -> f64 {
        f64::from(self.visible_rows / 2) * self.row_height
    }

    fn validate(&self) -> Result<(), PickerError> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(PickerError::InvalidConfiguration(
                "row height must be a positive number",
            ));
        }
        if self.visible_rows == 0 {
            return Err(PickerError::InvalidConfiguration(
                "at least one row must be visible",
            ));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(PickerError::InvalidConfiguration(
                "sensitivity must be a positive number",
            ));
        }
        let non_negative = [
            self.momentum_threshold,
            self.momentum_damping,
            self.momentum_duration_ms,
            self.snap_duration_ms,
        ];
        if non_negative.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PickerError::InvalidConfiguration(
                "momentum and snap settings must be non-negative numbers",
            ));
        }
        Ok(())
    }
}

// ───────────────────────────────────────── public types ──────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("invalid picker configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Notifications for the host, drained with [`ScrollPicker::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerEvent {
    /// Provisional nearest option while dragging or flinging.  Advisory only.
    HighlightChanged { index: usize, value: f64 },
    /// A snap or tap committed a new selection.
    SelectionChanged { index: usize, value: f64 },
}

/// Handle to the animation that was in flight when it was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

/// What the picker is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Momentum,
    /// Selection is committed; only the rendered position is still easing in.
    Settling,
}

#[derive(Debug, Clone)]
enum Animation {
    Momentum(Tween),
    Settle(Tween),
}

// ───────────────────────────────────────── picker ────────────

#[derive(Debug, Clone)]
pub struct ScrollPicker {
    config: PickerConfig,
    options: Vec<PickerOption>,
    /// Authoritative list translation.
    offset: f64,
    /// Where the list is drawn; lags `offset` only while settling.
    display_offset: f64,
    selected: usize,
    highlighted: usize,
    dragging: bool,
    last_pointer_y: f64,
    last_sample_time: f64,
    /// Units per second, from the most recent usable pointer sample.
    velocity: f64,
    animation: Option<Animation>,
    generation: u64,
    events: Vec<PickerEvent>,
}

impl ScrollPicker {
    /// Build a picker over `options` seeded with `initial_value`.
    pub fn new(
        config: PickerConfig,
        options: Vec<PickerOption>,
        initial_value: f64,
    ) -> Result<Self, PickerError> {
        config.validate()?;
        let mut picker = Self {
            config,
            options: Vec::new(),
            offset: 0.0,
            display_offset: 0.0,
            selected: 0,
            highlighted: 0,
            dragging: false,
            last_pointer_y: 0.0,
            last_sample_time: 0.0,
            velocity: 0.0,
            animation: None,
            generation: 0,
            events: Vec::new(),
        };
        picker.initialize(options, initial_value)?;
        Ok(picker)
    }

    /// Replace the option list and seed the selection.  An empty list is
    /// rejected and leaves the picker untouched.
    pub fn initialize(
        &mut self,
        options: Vec<PickerOption>,
        initial_value: f64,
    ) -> Result<(), PickerError> {
        if options.is_empty() {
            return Err(PickerError::InvalidConfiguration(
                "picker needs at least one option",
            ));
        }
        self.options = options;
        self.show(initial_value);
        Ok(())
    }

    /// Reset to rest on the option matching `initial_value` (exact, else
    /// nearest).  Called every time the picker is presented.
    pub fn show(&mut self, initial_value: f64) {
        self.supersede();
        self.dragging = false;
        self.velocity = 0.0;
        self.events.clear();
        let index = self.index_for_value(initial_value);
        self.selected = index;
        self.highlighted = index;
        self.offset = self.rest_offset(index);
        self.display_offset = self.offset;
        debug!(index, value = self.options[index].value, "picker shown");
    }

    // ── pointer input ───────────────────────────────────────────

    /// Start a drag at `y`.  Any running animation is abandoned and the list
    /// continues from where it is currently drawn.
    pub fn on_pointer_down(&mut self, y: f64, timestamp_ms: f64) {
        self.supersede();
        self.offset = self.display_offset;
        self.dragging = true;
        self.last_pointer_y = y;
        self.last_sample_time = timestamp_ms;
        self.velocity = 0.0;
        debug!(y, offset = self.offset, "picker drag start");
    }

    pub fn on_pointer_move(&mut self, y: f64, timestamp_ms: f64) {
        if !self.dragging || !y.is_finite() {
            return;
        }
        let delta = y - self.last_pointer_y;
        self.offset += delta * self.config.sensitivity;
        self.display_offset = self.offset;

        // Skip the velocity sample on zero or negative elapsed time.
        let elapsed_ms = timestamp_ms - self.last_sample_time;
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            let velocity = delta / (elapsed_ms / 1000.0);
            if velocity.is_finite() {
                self.velocity = velocity;
            }
        }

        self.last_pointer_y = y;
        if timestamp_ms.is_finite() {
            self.last_sample_time = timestamp_ms;
        }
        self.refresh_highlight();
    }

    /// End the drag: fling if released fast enough, otherwise snap.
    pub fn on_pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;

        if self.velocity.abs() > self.config.momentum_threshold {
            let target = self.offset + self.velocity * self.config.momentum_damping;
            debug!(velocity = self.velocity, from = self.offset, target, "picker fling");
            self.generation = self.generation.wrapping_add(1);
            self.animation = Some(Animation::Momentum(Tween::new(
                self.offset,
                target,
                self.config.momentum_duration_ms,
                Easing::OutCubic,
            )));
        } else {
            self.snap();
        }
    }

    /// Select `index` directly, as if the list had been dragged there.
    /// Always commits, even when `index` is already selected.
    pub fn on_tap(&mut self, index: usize) {
        self.dragging = false;
        let index = index.min(self.options.len() - 1);
        self.commit(index);
    }

    /// Tap the option `delta` rows away from the current selection.
    pub fn step(&mut self, delta: isize) {
        let last = self.options.len() as isize - 1;
        let target = (self.selected as isize + delta).clamp(0, last);
        self.on_tap(target as usize);
    }

    /// Abandon any drag or fling without committing and return to rest on
    /// the current selection.
    pub fn cancel(&mut self) {
        self.supersede();
        self.dragging = false;
        self.velocity = 0.0;
        self.highlighted = self.selected;
        self.offset = self.rest_offset(self.selected);
        self.display_offset = self.offset;
        debug!(index = self.selected, "picker cancelled");
    }

    // ── frames ──────────────────────────────────────────────────

    /// Token for the animation currently in flight, if any.
    pub fn frame_request(&self) -> Option<FrameToken> {
        self.animation.as_ref().map(|_| FrameToken(self.generation))
    }

    /// Advance the animation identified by `token`.  Returns `true` while an
    /// animation is still running; a stale token is ignored.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) -> bool {
        if token.0 != self.generation {
            return false;
        }
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        match animation {
            Animation::Momentum(tween) => {
                let (value, done) = tween.sample(now_ms);
                self.offset = value;
                self.display_offset = value;
                self.refresh_highlight();
                if done {
                    self.animation = None;
                    self.snap();
                }
            }
            Animation::Settle(tween) => {
                let (value, done) = tween.sample(now_ms);
                self.display_offset = value;
                if done {
                    self.display_offset = self.offset;
                    self.animation = None;
                }
            }
        }
        self.animation.is_some()
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn selected_value(&self) -> f64 {
        self.options[self.selected].value
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset the list should be drawn at this frame.
    pub fn rendered_offset(&self) -> f64 {
        self.display_offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn phase(&self) -> Phase {
        match (&self.animation, self.dragging) {
            (_, true) => Phase::Dragging,
            (Some(Animation::Momentum(_)), false) => Phase::Momentum,
            (Some(Animation::Settle(_)), false) => Phase::Settling,
            (None, false) => Phase::Idle,
        }
    }

    /// Option drawn under viewport position `y`, if any.
    pub fn index_at(&self, y: f64) -> Option<usize> {
        let row = ((y - self.display_offset) / self.config.row_height).floor();
        if row.is_finite() && row >= 0.0 && (row as usize) < self.options.len() {
            Some(row as usize)
        } else {
            None
        }
    }

    /// Take all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── internals ───────────────────────────────────────────────

    /// Offset at which option `index` sits in the viewport centre.
    fn rest_offset(&self, index: usize) -> f64 {
        self.config.center_offset() - index as f64 * self.config.row_height
    }

    /// Option whose row is closest to the viewport centre at `offset`.
    /// Exactly half-way between two rows resolves to the lower index.
    fn nearest_index(&self, offset: f64) -> usize {
        let rows = (self.config.center_offset() - offset) / self.config.row_height;
        if !rows.is_finite() {
            return self.selected;
        }
        let last = (self.options.len() - 1) as f64;
        (rows - 0.5).ceil().clamp(0.0, last) as usize
    }

    fn index_for_value(&self, value: f64) -> usize {
        if !value.is_finite() {
            return 0;
        }
        if let Some(exact) = self.options.iter().position(|o| o.value == value) {
            return exact;
        }
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, option) in self.options.iter().enumerate() {
            let distance = (option.value - value).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    fn refresh_highlight(&mut self) {
        let index = self.nearest_index(self.offset);
        if index != self.highlighted {
            self.highlighted = index;
            self.events.push(PickerEvent::HighlightChanged {
                index,
                value: self.options[index].value,
            });
        }
    }

    fn snap(&mut self) {
        let index = self.nearest_index(self.offset);
        self.commit(index);
    }

    /// Select `index`, put `offset` at rest for it and ease the drawn list
    /// from wherever it currently is.
    fn commit(&mut self, index: usize) {
        self.supersede();
        let from = self.display_offset;
        self.selected = index;
        self.highlighted = index;
        self.velocity = 0.0;
        self.offset = self.rest_offset(index);

        if (from - self.offset).abs() > f64::EPSILON && self.config.snap_duration_ms > 0.0 {
            self.animation = Some(Animation::Settle(Tween::new(
                from,
                self.offset,
                self.config.snap_duration_ms,
                Easing::OutSine,
            )));
        } else {
            self.display_offset = self.offset;
        }

        let value = self.options[index].value;
        debug!(index, value, "picker committed");
        self.events.push(PickerEvent::SelectionChanged { index, value });
    }

    /// Invalidate whatever animation is in flight.
    fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reps() -> Vec<PickerOption> {
        (1..=20)
            .map(|r| PickerOption::new(r.to_string(), f64::from(r)))
            .collect()
    }

    fn picker(initial: f64) -> ScrollPicker {
        ScrollPicker::new(PickerConfig::default(), reps(), initial).unwrap()
    }

    fn rest_offset_for(p: &ScrollPicker, index: usize) -> f64 {
        p.config().center_offset() - index as f64 * p.config().row_height
    }

    fn assert_at_rest(p: &ScrollPicker) {
        assert!(!p.is_dragging());
        assert_ne!(p.phase(), Phase::Momentum);
        assert_eq!(p.offset(), rest_offset_for(p, p.selected_index()));
    }

    /// Step every pending frame 16ms apart until nothing is in flight.
    fn run_frames(p: &mut ScrollPicker, mut now: f64) -> f64 {
        for _ in 0..1_000 {
            let Some(token) = p.frame_request() else {
                return now;
            };
            p.on_frame(token, now);
            now += 16.0;
        }
        panic!("animation never finished");
    }

    fn selections(events: &[PickerEvent]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                PickerEvent::SelectionChanged { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initialize_selects_exact_value() {
        let p = picker(5.0);
        assert_eq!(p.selected_index(), 4);
        assert_eq!(p.offset(), p.config().center_offset() - 4.0 * 30.0);
        assert_eq!(p.selected_value(), 5.0);
        assert_eq!(p.phase(), Phase::Idle);
    }

    #[test]
    fn initialize_picks_nearest_and_clamps() {
        assert_eq!(picker(7.4).selected_index(), 6);
        // Half-way between 7 and 8 keeps the lower index.
        assert_eq!(picker(7.5).selected_index(), 6);
        assert_eq!(picker(-40.0).selected_index(), 0);
        assert_eq!(picker(400.0).selected_index(), 19);
    }

    #[test]
    fn non_finite_initial_value_falls_back_to_first() {
        assert_eq!(picker(f64::NAN).selected_index(), 0);
        assert_eq!(picker(f64::INFINITY).selected_index(), 0);
    }

    #[test]
    fn empty_options_are_rejected() {
        let err = ScrollPicker::new(PickerConfig::default(), Vec::new(), 1.0).unwrap_err();
        assert!(matches!(err, PickerError::InvalidConfiguration(_)));

        let mut p = picker(3.0);
        assert!(p.initialize(Vec::new(), 1.0).is_err());
        assert_eq!(p.options().len(), 20);
        assert_eq!(p.selected_value(), 3.0);
    }

    #[test]
    fn bad_row_height_is_rejected() {
        let config = PickerConfig {
            row_height: 0.0,
            ..PickerConfig::default()
        };
        assert!(ScrollPicker::new(config, reps(), 1.0).is_err());
    }

    #[test]
    fn negative_timings_are_rejected() {
        let config = PickerConfig {
            snap_duration_ms: -1.0,
            ..PickerConfig::default()
        };
        assert_eq!(
            ScrollPicker::new(config, reps(), 1.0).unwrap_err(),
            PickerError::InvalidConfiguration(
                "momentum and snap settings must be non-negative numbers"
            )
        );
    }

    #[test]
    fn drag_scales_by_sensitivity_and_moves_highlight() {
        let config = PickerConfig {
            sensitivity: 0.6,
            ..PickerConfig::default()
        };
        let mut p = ScrollPicker::new(config, reps(), 5.0).unwrap();
        let before = p.offset();

        p.on_pointer_down(100.0, 0.0);
        p.on_pointer_move(70.0, 16.0);

        assert!((before - p.offset() - 18.0).abs() < 1e-9);
        assert!(p.highlighted_index() > 4);
        // Highlight is provisional; nothing is committed mid-drag.
        assert_eq!(p.selected_index(), 4);
        let events = p.drain_events();
        assert!(matches!(
            events.as_slice(),
            [PickerEvent::HighlightChanged { index: 5, .. }]
        ));
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut p = picker(5.0);
        let before = p.offset();
        p.on_pointer_move(10.0, 5.0);
        p.on_pointer_up();
        assert_eq!(p.offset(), before);
        assert!(p.drain_events().is_empty());
    }

    #[test]
    fn slow_release_snaps_to_nearest() {
        let mut p = picker(5.0);
        p.on_pointer_down(100.0, 0.0);
        // 10 units over one second: 10 units/s, below the threshold of 20.
        p.on_pointer_move(110.0, 1_000.0);
        assert!((p.velocity() - 10.0).abs() < 1e-9);

        p.on_pointer_up();
        assert_ne!(p.phase(), Phase::Momentum);
        // 10 units down is a third of a row: still option 5.
        assert_eq!(p.selected_index(), 4);
        assert_at_rest(&p);
        assert_eq!(selections(&p.drain_events()), vec![5.0]);
    }

    #[test]
    fn velocity_gates_momentum() {
        let mut below = picker(5.0);
        below.on_pointer_down(100.0, 0.0);
        below.on_pointer_move(81.0, 1_000.0);
        below.on_pointer_up();
        assert_ne!(below.phase(), Phase::Momentum);

        let mut above = picker(5.0);
        above.on_pointer_down(100.0, 0.0);
        above.on_pointer_move(79.0, 1_000.0);
        above.on_pointer_up();
        assert_eq!(above.phase(), Phase::Momentum);
        assert!(selections(&above.drain_events()).is_empty());
    }

    #[test]
    fn short_fast_flick_still_gets_momentum() {
        let mut p = picker(5.0);
        p.on_pointer_down(100.0, 0.0);
        p.on_pointer_move(98.0, 10.0);
        p.on_pointer_up();
        assert_eq!(p.phase(), Phase::Momentum);
    }

    #[test]
    fn fling_carries_past_highlight_and_commits_once() {
        let mut p = picker(5.0);
        p.on_pointer_down(200.0, 0.0);
        // Upward fling: 60 units in 50ms = -1200 units/s.
        p.on_pointer_move(140.0, 50.0);
        let released_at = p.highlighted_index();
        p.on_pointer_up();
        assert_eq!(p.phase(), Phase::Momentum);
        // Only events from the momentum frames below are inspected.
        p.drain_events();

        run_frames(&mut p, 60.0);

        assert!(p.selected_index() > released_at);
        assert_at_rest(&p);
        assert_eq!(p.phase(), Phase::Idle);
        assert_eq!(p.rendered_offset(), p.offset());
        let events = p.drain_events();
        assert_eq!(selections(&events).len(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, PickerEvent::HighlightChanged { .. })));
    }

    #[test]
    fn new_drag_supersedes_pending_frames() {
        let mut p = picker(5.0);
        p.on_pointer_down(200.0, 0.0);
        p.on_pointer_move(140.0, 50.0);
        p.on_pointer_up();
        let stale = p.frame_request().unwrap();
        p.on_frame(stale, 100.0);
        let mid_flight = p.offset();

        p.on_pointer_down(50.0, 120.0);
        assert_eq!(p.frame_request(), None);
        assert!(!p.on_frame(stale, 200.0));
        assert_eq!(p.offset(), mid_flight);
        assert_eq!(p.phase(), Phase::Dragging);
    }

    #[test]
    fn dragging_past_the_ends_clamps_the_selection() {
        let mut p = picker(10.0);
        p.on_pointer_down(0.0, 0.0);
        p.on_pointer_move(-5_000.0, 60_000.0);
        p.on_pointer_up();
        run_frames(&mut p, 60_016.0);
        assert_eq!(p.selected_index(), 19);
        assert_at_rest(&p);

        p.on_pointer_down(0.0, 70_000.0);
        p.on_pointer_move(5_000.0, 130_000.0);
        p.on_pointer_up();
        run_frames(&mut p, 130_016.0);
        assert_eq!(p.selected_index(), 0);
        assert_at_rest(&p);
    }

    #[test]
    fn tap_commits_every_time() {
        let mut p = picker(5.0);
        p.on_tap(11);
        p.on_tap(11);
        assert_eq!(p.selected_value(), 12.0);
        assert_eq!(selections(&p.drain_events()), vec![12.0, 12.0]);
        assert_at_rest(&p);
    }

    #[test]
    fn tap_out_of_range_clamps() {
        let mut p = picker(5.0);
        p.on_tap(999);
        assert_eq!(p.selected_index(), 19);
    }

    #[test]
    fn step_moves_relative_to_selection() {
        let mut p = picker(5.0);
        p.step(2);
        assert_eq!(p.selected_value(), 7.0);
        p.step(-50);
        assert_eq!(p.selected_value(), 1.0);
    }

    #[test]
    fn settle_eases_rendered_offset_only() {
        let mut p = picker(5.0);
        p.on_tap(9);
        assert_eq!(p.phase(), Phase::Settling);
        assert_at_rest(&p);
        assert_ne!(p.rendered_offset(), p.offset());

        run_frames(&mut p, 0.0);
        assert_eq!(p.rendered_offset(), p.offset());
        assert_eq!(p.phase(), Phase::Idle);
    }

    #[test]
    fn cancel_mid_drag_fires_nothing() {
        let mut p = picker(5.0);
        p.on_pointer_down(100.0, 0.0);
        p.on_pointer_move(10.0, 30.0);
        p.drain_events();

        p.cancel();
        assert!(selections(&p.drain_events()).is_empty());
        assert_eq!(p.selected_index(), 4);
        assert_at_rest(&p);

        p.initialize(reps(), 5.0).unwrap();
        assert_eq!(p.selected_index(), 4);
        assert_eq!(p.phase(), Phase::Idle);
        assert_at_rest(&p);
    }

    #[test]
    fn cancel_during_fling_drops_the_animation() {
        let mut p = picker(5.0);
        p.on_pointer_down(200.0, 0.0);
        p.on_pointer_move(100.0, 40.0);
        p.on_pointer_up();
        let token = p.frame_request().unwrap();

        p.cancel();
        assert!(!p.on_frame(token, 100.0));
        assert!(selections(&p.drain_events()).is_empty());
        assert_at_rest(&p);
    }

    #[test]
    fn backwards_or_repeated_timestamps_skip_velocity() {
        let mut p = picker(5.0);
        p.on_pointer_down(100.0, 500.0);
        p.on_pointer_move(90.0, 500.0);
        assert_eq!(p.velocity(), 0.0);
        p.on_pointer_move(80.0, 400.0);
        assert_eq!(p.velocity(), 0.0);
        p.on_pointer_move(70.0, f64::NAN);
        assert_eq!(p.velocity(), 0.0);

        p.on_pointer_up();
        assert_ne!(p.phase(), Phase::Momentum);
        assert!(p.velocity().is_finite());
    }

    #[test]
    fn repeated_pointer_down_restarts_drag() {
        let mut p = picker(5.0);
        p.on_pointer_down(100.0, 0.0);
        p.on_pointer_move(40.0, 10.0);
        p.on_pointer_down(300.0, 20.0);
        assert_eq!(p.velocity(), 0.0);
        let before = p.offset();
        p.on_pointer_move(300.0, 40.0);
        assert_eq!(p.offset(), before);
    }

    #[test]
    fn drag_starts_from_drawn_position_while_settling() {
        let mut p = picker(5.0);
        p.on_tap(15);
        p.on_frame(p.frame_request().unwrap(), 0.0);
        p.on_frame(p.frame_request().unwrap(), 50.0);
        let drawn = p.rendered_offset();

        p.on_pointer_down(0.0, 60.0);
        assert_eq!(p.offset(), drawn);
    }

    #[test]
    fn index_at_maps_viewport_rows() {
        let p = picker(1.0);
        let center = p.config().center_offset();
        assert_eq!(p.index_at(center + 1.0), Some(0));
        assert_eq!(p.index_at(center + 31.0), Some(1));
        assert_eq!(p.index_at(center - 1.0), None);
        assert_eq!(p.index_at(center + 20.0 * 30.0), None);
    }

    #[test]
    fn show_reseeds_and_clears_pending_events() {
        let mut p = picker(5.0);
        p.on_tap(2);
        p.show(12.0);
        assert_eq!(p.selected_value(), 12.0);
        assert!(p.drain_events().is_empty());
        assert_at_rest(&p);
    }
}
