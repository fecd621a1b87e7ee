//! Workout model: exercises, picker option lists, the logged-set history
//! and rest timing.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::picker::PickerOption;
use super::store::{KeyValueStore, StoreError};

pub const DEFAULT_DUMBBELL_WEIGHT: f64 = 5.0;
pub const DEFAULT_REPS: u32 = 5;
pub const WEIGHT_STEP: f64 = 2.5;
pub const MAX_DUMBBELL_WEIGHT: f64 = 50.0;
pub const MAX_REPS: u32 = 20;
/// How many of the current exercise's sets the summary shows.
pub const RECENT_SETS_SHOWN: usize = 3;
/// Store key holding the JSON array of logged dumbbell sets.
pub const DUMBBELL_SETS_KEY: &str = "gym-dumbbell-sets";

// ───────────────────────────────────────── exercises ─────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Exercise {
    #[default]
    ShoulderPress,
    BenchPress,
    Row,
    Curl,
    LateralRaise,
}

impl Exercise {
    pub const ALL: &[Exercise] = &[
        Exercise::ShoulderPress,
        Exercise::BenchPress,
        Exercise::Row,
        Exercise::Curl,
        Exercise::LateralRaise,
    ];

    /// Identifier stored with each set.
    pub fn key(self) -> &'static str {
        match self {
            Exercise::ShoulderPress => "shoulder_press",
            Exercise::BenchPress => "bench_press",
            Exercise::Row => "row",
            Exercise::Curl => "curl",
            Exercise::LateralRaise => "lateral_raise",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.key() == s)
    }

    /// Upper-case heading, e.g. `SHOULDER PRESS`.
    pub fn heading(self) -> String {
        self.key().to_uppercase().replace('_', " ")
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ───────────────────────────────────────── picker options ────

/// `5kg`, `7.5kg`, `12.5kg`.
pub fn format_weight(kg: f64) -> String {
    if kg.fract() == 0.0 {
        format!("{kg:.0}kg")
    } else {
        format!("{kg}kg")
    }
}

/// Reps 1 through 20.
pub fn rep_options() -> Vec<PickerOption> {
    (1..=MAX_REPS)
        .map(|r| PickerOption::new(r.to_string(), f64::from(r)))
        .collect()
}

/// Dumbbell weights 2.5 kg through 50 kg in 2.5 kg steps.
pub fn dumbbell_weight_options() -> Vec<PickerOption> {
    let steps = (MAX_DUMBBELL_WEIGHT / WEIGHT_STEP).round() as u32;
    (1..=steps)
        .map(|i| {
            let kg = f64::from(i) * WEIGHT_STEP;
            PickerOption::new(format_weight(kg), kg)
        })
        .collect()
}

// ───────────────────────────────────────── set log ───────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub date: DateTime<Utc>,
}

impl LoggedSet {
    pub fn new(exercise: Exercise, weight: f64, reps: u32) -> Self {
        Self {
            exercise: exercise.key().to_string(),
            weight,
            reps,
            date: Utc::now(),
        }
    }

    /// `12.5kg × 8`
    pub fn summary(&self) -> String {
        format!("{} × {}", format_weight(self.weight), self.reps)
    }
}

/// Every logged set in chronological order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetLog {
    sets: Vec<LoggedSet>,
}

impl SetLog {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let sets = match store.get(DUMBBELL_SETS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
            _ => Vec::new(),
        };
        Ok(Self { sets })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.sets)?;
        store.set(DUMBBELL_SETS_KEY, &raw)
    }

    pub fn push(&mut self, set: LoggedSet) {
        self.sets.push(set);
    }

    /// Remove the most recent set regardless of exercise.
    pub fn pop_last(&mut self) -> Option<LoggedSet> {
        self.sets.pop()
    }

    pub fn sets(&self) -> &[LoggedSet] {
        &self.sets
    }

    /// Last `n` sets of `exercise`, oldest first.
    pub fn recent(&self, exercise: Exercise, n: usize) -> Vec<&LoggedSet> {
        let mut recent: Vec<&LoggedSet> = self
            .sets
            .iter()
            .rev()
            .filter(|s| s.exercise == exercise.key())
            .take(n)
            .collect();
        recent.reverse();
        recent
    }

    /// Heading plus recent sets, or `No sets yet`.
    pub fn summary_lines(&self, exercise: Exercise) -> Vec<String> {
        let recent = self.recent(exercise, RECENT_SETS_SHOWN);
        if recent.is_empty() {
            return vec!["No sets yet".to_string()];
        }
        let mut lines = vec![format!("{}:", exercise.heading())];
        lines.extend(recent.iter().map(|s| s.summary()));
        lines
    }
}

// ───────────────────────────────────────── rest timer ────────

/// Counts up from the last logged set.
#[derive(Debug, Clone)]
pub struct RestTimer {
    since: Instant,
}

impl RestTimer {
    pub fn start(now: Instant) -> Self {
        Self { since: now }
    }

    pub fn reset(&mut self, now: Instant) {
        self.since = now;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.since)
    }

    pub fn label(&self, now: Instant) -> String {
        format_rest(self.elapsed(now).as_secs())
    }
}

/// `Rest: 1:05`
pub fn format_rest(secs: u64) -> String {
    format!("Rest: {}:{:02}", secs / 60, secs % 60)
}
