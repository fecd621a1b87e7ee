//! Workout screen: exercise, dumbbell weight, rest timer and recent sets.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::state::AppState;
use crate::core::workout::format_weight;

use super::theme::Theme;

/// Regions of the workout pane, shared with the mouse handler.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutGeometry {
    pub inner: Rect,
    /// The two dumbbells; clicking them opens the weight picker.
    pub dumbbells: Rect,
    pub rest: Rect,
    pub sets: Rect,
}

pub fn workout_geometry(area: Rect) -> WorkoutGeometry {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // weight label
            Constraint::Length(1),
            Constraint::Length(3), // dumbbells
            Constraint::Length(1),
            Constraint::Length(1), // rest timer
            Constraint::Length(1),
            Constraint::Min(1), // recent sets
        ])
        .split(inner);

    WorkoutGeometry {
        inner,
        dumbbells: chunks[2],
        rest: chunks[4],
        sets: chunks[6],
    }
}

pub struct WorkoutView<'a> {
    pub state: &'a AppState,
    pub now: Instant,
}

impl Widget for WorkoutView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let geom = workout_geometry(area);

        Block::default()
            .title(format!(" {} ", state.exercise.heading()))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style())
            .render(area, buf);

        let weight = format_weight(state.weight);
        Paragraph::new(Line::from(Span::styled(
            format!("Weight: {} (each)", weight),
            Theme::weight_style(),
        )))
        .alignment(Alignment::Center)
        .render(Rect { height: 1, ..geom.inner }, buf);

        let bell = format!("  {weight}  ");
        let blank = " ".repeat(bell.chars().count());
        let bar = |text: &str| {
            Line::from(vec![
                Span::styled(text.to_string(), Theme::dumbbell_style()),
                Span::raw("    "),
                Span::styled(text.to_string(), Theme::dumbbell_style()),
            ])
        };
        Paragraph::new(vec![bar(&blank), bar(&bell), bar(&blank)])
            .alignment(Alignment::Center)
            .render(geom.dumbbells, buf);

        Paragraph::new(Line::from(Span::styled(
            state.rest.label(self.now),
            Theme::rest_style(),
        )))
        .alignment(Alignment::Center)
        .render(geom.rest, buf);

        let sets: Vec<Line> = state
            .log
            .summary_lines(state.exercise)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Theme::label_style())))
            .collect();
        Paragraph::new(sets)
            .alignment(Alignment::Center)
            .render(geom.sets, buf);
    }
}
