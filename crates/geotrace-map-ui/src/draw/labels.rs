use std::sync::Arc;

use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, epaint::Galley, vec2};

use crate::draw::{MARKER_RADIUS, PATH_COLOR};

const TEXT_COLOR: Color32 = Color32::BLACK;
const LINE_SPACING: f32 = 2.0;

/// Lays out `text` one galley per line
fn layout_lines(painter: &Painter, text: &str, font_id: &FontId) -> (Vec<Arc<Galley>>, egui::Vec2) {
    let galleys: Vec<Arc<Galley>> = text
        .lines()
        .map(|line| painter.layout_no_wrap(line.to_owned(), font_id.clone(), TEXT_COLOR))
        .collect();

    let mut max_width: f32 = 0.0;
    let mut total_height: f32 = 0.0;
    for galley in &galleys {
        max_width = max_width.max(galley.size().x);
        total_height += galley.size().y;
    }
    total_height += LINE_SPACING * (galleys.len().saturating_sub(1) as f32);

    (galleys, vec2(max_width, total_height))
}

fn paint_lines(painter: &Painter, mut pos: Pos2, galleys: Vec<Arc<Galley>>) {
    for galley in galleys {
        let height = galley.size().y;
        painter.galley(pos, galley, TEXT_COLOR);
        pos.y += height + LINE_SPACING;
    }
}

/// Segment distance centred on the segment midpoint
pub(crate) fn draw_distance_label(painter: &Painter, center: Pos2, text: &str) {
    const FONT_ID: FontId = FontId::proportional(12.0);

    let (galleys, size) = layout_lines(painter, text, &FONT_ID);
    let text_rect = Rect::from_center_size(center, size);
    let padded_rect = text_rect.expand2(vec2(4.0, 2.0));

    painter.rect_filled(padded_rect, 3.0, Color32::WHITE.gamma_multiply(0.9));
    painter.rect_stroke(
        padded_rect,
        3.0,
        Stroke::new(1.0, Color32::GRAY),
        egui::StrokeKind::Outside,
    );
    paint_lines(painter, text_rect.min, galleys);
}

/// Popup anchored above a marker, returns the screen area it covers
pub(crate) fn draw_popup(painter: &Painter, anchor: Pos2, text: &str) -> Rect {
    const FONT_ID: FontId = FontId::proportional(13.0);
    const PADDING: f32 = 8.0;
    const TAIL: f32 = 8.0;

    let (galleys, size) = layout_lines(painter, text, &FONT_ID);
    let bottom_center = anchor - vec2(0.0, MARKER_RADIUS + TAIL);
    let popup_rect = Rect::from_center_size(
        bottom_center - vec2(0.0, size.y / 2.0 + PADDING),
        size + vec2(2.0 * PADDING, 2.0 * PADDING),
    );

    let bg_color = Color32::WHITE;
    let border = Stroke::new(1.0, PATH_COLOR.gamma_multiply(0.6));
    painter.rect_filled(popup_rect, 6.0, bg_color);
    painter.rect_stroke(popup_rect, 6.0, border, egui::StrokeKind::Outside);
    painter.add(Shape::convex_polygon(
        vec![
            bottom_center - vec2(TAIL, 0.0),
            bottom_center + vec2(TAIL, 0.0),
            bottom_center + vec2(0.0, TAIL),
        ],
        bg_color,
        Stroke::NONE,
    ));
    paint_lines(painter, popup_rect.min + vec2(PADDING, PADDING), galleys);

    popup_rect
}
