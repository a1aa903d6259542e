use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2, vec2};

pub(crate) mod labels;

/// Leaflet's default path blue
pub(crate) const PATH_COLOR: Color32 = Color32::from_rgb(0x33, 0x88, 0xFF);
pub(crate) const MARKER_RADIUS: f32 = 7.0;

/// Role of a marker within the path, the first and last are drawn distinctly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerRole {
    Start,
    Intermediate,
    End,
}

impl MarkerRole {
    pub(crate) fn of(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Start
        } else if index + 1 == len {
            Self::End
        } else {
            Self::Intermediate
        }
    }
}

pub(crate) fn draw_polyline(painter: &Painter, screen_points: Vec<Pos2>) {
    if screen_points.len() < 2 {
        return;
    }
    painter.add(Shape::line(screen_points, Stroke::new(3.0, PATH_COLOR)));
}

pub(crate) fn draw_marker(painter: &Painter, center: Pos2, role: MarkerRole) {
    match role {
        MarkerRole::Start => draw_start_marker(painter, center),
        MarkerRole::Intermediate => {
            painter.circle_filled(center, MARKER_RADIUS + 1.0, Color32::WHITE);
            painter.circle_filled(center, MARKER_RADIUS, PATH_COLOR);
        }
        MarkerRole::End => {
            painter.circle_filled(center, MARKER_RADIUS + 1.0, Color32::WHITE);
            painter.circle_filled(center, MARKER_RADIUS, PATH_COLOR);
            draw_end_cross(painter, center);
        }
    }
}

fn draw_start_marker(painter: &Painter, center: Pos2) {
    painter.circle_filled(center, MARKER_RADIUS + 1.0, Color32::WHITE);
    painter.circle_filled(center, MARKER_RADIUS, Color32::BLACK);
}

fn draw_end_cross(painter: &Painter, center: Pos2) {
    const CROSS_SIZE: f32 = 4.0;
    const CROSS_THICKNESS: f32 = 2.0;

    let stroke = Stroke::new(CROSS_THICKNESS, Color32::WHITE);
    painter.line_segment(
        [
            center + vec2(-CROSS_SIZE, -CROSS_SIZE),
            center + vec2(CROSS_SIZE, CROSS_SIZE),
        ],
        stroke,
    );
    painter.line_segment(
        [
            center + Vec2::new(-CROSS_SIZE, CROSS_SIZE),
            center + Vec2::new(CROSS_SIZE, -CROSS_SIZE),
        ],
        stroke,
    );
}

/// Ring around a marker, to show that the pointer hovering at it is recognized
pub(crate) fn draw_hover_highlight(painter: &Painter, center: Pos2) {
    painter.circle_stroke(center, MARKER_RADIUS + 4.0, Stroke::new(5.0, Color32::BLACK));
    painter.circle_stroke(center, MARKER_RADIUS + 4.0, Stroke::new(3.0, PATH_COLOR));
}

/// Marker being dragged: the old position faded, the pending one solid, and
/// dashed lines to the neighbours so the new segments can be previewed
pub(crate) fn draw_drag_ghost(
    painter: &Painter,
    from: Pos2,
    to: Pos2,
    neighbours: impl IntoIterator<Item = Pos2>,
) {
    let faded = PATH_COLOR.gamma_multiply(0.4);
    painter.circle_filled(from, MARKER_RADIUS, faded);
    for n in neighbours {
        painter.extend(Shape::dashed_line(
            &[n, to],
            Stroke::new(2.0, PATH_COLOR),
            6.0,
            4.0,
        ));
    }
    painter.circle_filled(to, MARKER_RADIUS + 1.0, Color32::WHITE);
    painter.circle_filled(to, MARKER_RADIUS, PATH_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marker_roles() {
        let roles: Vec<MarkerRole> = (0..3).map(|i| MarkerRole::of(i, 3)).collect();
        assert_eq!(
            roles,
            [MarkerRole::Start, MarkerRole::Intermediate, MarkerRole::End]
        );
        assert_eq!(MarkerRole::of(0, 1), MarkerRole::Start);
    }
}
