//! Modal scroll-picker overlay.
//!
//! Geometry lives in [`picker_geometry`] so the renderer and the mouse
//! handler agree on where the viewport and the buttons are.  One option row
//! is one terminal row; pointer rows are converted to picker units by
//! [`row_to_units`].

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::picker::ScrollPicker;

use super::layout::centered_fixed;
use super::theme::Theme;

const POPUP_WIDTH: u16 = 28;
const CANCEL_LABEL: &str = "[ Cancel ]";
const OK_LABEL: &str = "[ OK ]";

// ───────────────────────────────────────── geometry ──────────

/// Screen regions of the picker modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerGeometry {
    pub popup: Rect,
    /// Rows the option list scrolls through.
    pub viewport: Rect,
    pub cancel_button: Rect,
    pub ok_button: Rect,
}

pub fn picker_geometry(area: Rect, visible_rows: u16) -> PickerGeometry {
    // Border, list, spacer, buttons, border.
    let popup = centered_fixed(POPUP_WIDTH, visible_rows + 4, area);
    let inner = Rect::new(
        popup.x.saturating_add(1),
        popup.y.saturating_add(1),
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );
    let viewport = Rect::new(inner.x, inner.y, inner.width, visible_rows.min(inner.height));

    let button_y = inner.y + visible_rows + 1;
    let button_h = u16::from(button_y < inner.bottom());
    let cancel_w = (CANCEL_LABEL.len() as u16).min(inner.width);
    let ok_w = (OK_LABEL.len() as u16).min(inner.width);

    PickerGeometry {
        popup,
        viewport,
        cancel_button: Rect::new(inner.x.saturating_add(1), button_y, cancel_w, button_h),
        ok_button: Rect::new(
            inner.right().saturating_sub(ok_w + 1),
            button_y,
            ok_w,
            button_h,
        ),
    }
}

/// Vertical picker position of the centre of terminal `row`.
pub fn row_to_units(viewport: Rect, row: u16, row_height: f64) -> f64 {
    (f64::from(row) - f64::from(viewport.y) + 0.5) * row_height
}

// ───────────────────────────────────────── widget ────────────

pub struct PickerWidget<'a> {
    pub picker: &'a ScrollPicker,
    pub title: &'a str,
}

impl Widget for PickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let config = self.picker.config();
        let geom = picker_geometry(area, config.visible_rows);
        Clear.render(geom.popup, buf);

        Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .render(geom.popup, buf);

        let center_row = config.visible_rows / 2;
        let options = self.picker.options();
        let highlighted = self.picker.highlighted_index();

        let lines: Vec<Line> = (0..geom.viewport.height)
            .map(|r| {
                let y = (f64::from(r) + 0.5) * config.row_height;
                let Some(index) = self.picker.index_at(y) else {
                    return Line::raw("");
                };
                let label = options[index].label();
                if r == center_row {
                    Line::from(Span::styled(
                        format!("▸ {label} ◂"),
                        Theme::picker_center_style(),
                    ))
                } else if index == highlighted {
                    Line::from(Span::styled(label.to_string(), Theme::picker_highlight_style()))
                } else {
                    Line::from(Span::styled(label.to_string(), Theme::dim_style()))
                }
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(geom.viewport, buf);

        if geom.ok_button.height > 0 {
            buf.set_string(
                geom.cancel_button.x,
                geom.cancel_button.y,
                CANCEL_LABEL,
                Theme::dim_style(),
            );
            buf.set_string(geom.ok_button.x, geom.ok_button.y, OK_LABEL, Theme::button_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::picker::PickerConfig;
    use crate::core::workout;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn geometry_places_buttons_below_viewport() {
        let geom = picker_geometry(Rect::new(0, 0, 80, 24), 7);
        assert_eq!(geom.popup.height, 11);
        assert_eq!(geom.viewport.height, 7);
        assert_eq!(geom.viewport.y, geom.popup.y + 1);
        assert_eq!(geom.ok_button.y, geom.viewport.y + 8);
        assert_eq!(geom.ok_button.height, 1);
        assert!(geom.cancel_button.right() <= geom.ok_button.x);
    }

    #[test]
    fn tiny_terminal_drops_buttons() {
        let geom = picker_geometry(Rect::new(0, 0, 40, 6), 7);
        assert_eq!(geom.ok_button.height, 0);
        assert!(geom.viewport.height <= 4);
    }

    #[test]
    fn row_units_hit_row_centres() {
        let viewport = Rect::new(0, 5, 10, 7);
        assert_eq!(row_to_units(viewport, 5, 30.0), 15.0);
        assert_eq!(row_to_units(viewport, 8, 30.0), 105.0);
        assert!(row_to_units(viewport, 2, 30.0) < 0.0);
    }

    #[test]
    fn selected_option_renders_on_centre_row() {
        let picker = ScrollPicker::new(
            PickerConfig::default(),
            workout::dumbbell_weight_options(),
            12.5,
        )
        .unwrap();
        let area = Rect::new(0, 0, 40, 15);
        let mut buf = Buffer::empty(area);
        PickerWidget {
            picker: &picker,
            title: "Weight",
        }
        .render(area, &mut buf);

        let geom = picker_geometry(area, 7);
        let centre = row_text(&buf, geom.viewport.y + 3);
        assert!(centre.contains("▸ 12.5kg ◂"), "{centre:?}");
        assert!(row_text(&buf, geom.viewport.y + 2).contains("10kg"));
        assert!(row_text(&buf, geom.viewport.y + 4).contains("15kg"));
        assert!(row_text(&buf, geom.ok_button.y).contains("[ OK ]"));
    }
}
