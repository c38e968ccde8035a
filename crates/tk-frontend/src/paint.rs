//! Rasterize markers with an egui painter

use egui::{Align2, Color32, FontId, Pos2, Shape, Stroke};
use glam::Vec2;
use tk_core::Color;
use tk_gizmo::{MarkerCommand, MarkerShape};

/// Font size for text markers
const TEXT_SIZE: f32 = 14.0;

/// Convert a gizmo color to egui
pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn finite(points: &[Vec2]) -> bool {
    points.iter().all(|p| p.is_finite())
}

/// Paint viewport-relative markers into `painter`, offset by the viewport's
/// top-left corner. Markers with non-finite coordinates are skipped.
pub fn paint_markers(painter: &egui::Painter, origin: Pos2, markers: &[MarkerCommand]) {
    let at = |p: Vec2| origin + egui::vec2(p.x, p.y);

    for marker in markers {
        let color = to_color32(marker.color);
        match &marker.shape {
            MarkerShape::Line { p0, p1 } => {
                if !finite(&[*p0, *p1]) {
                    continue;
                }
                let width = marker.thickness.unwrap_or(1.0);
                painter.line_segment([at(*p0), at(*p1)], Stroke::new(width, color));
            }
            MarkerShape::Triangle { p0, p1, p2 } => {
                if !finite(&[*p0, *p1, *p2]) {
                    continue;
                }
                let points = vec![at(*p0), at(*p1), at(*p2)];
                match marker.thickness {
                    Some(width) => {
                        painter.add(Shape::closed_line(points, Stroke::new(width, color)));
                    }
                    None => {
                        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
                    }
                }
            }
            MarkerShape::Circle { center, radius } => {
                if !center.is_finite() || !radius.is_finite() {
                    continue;
                }
                match marker.thickness {
                    Some(width) => {
                        painter.circle_stroke(at(*center), *radius, Stroke::new(width, color))
                    }
                    None => painter.circle_filled(at(*center), *radius, color),
                };
            }
            MarkerShape::Polyline { points } => {
                if points.len() < 2 || !finite(points) {
                    continue;
                }
                let points: Vec<Pos2> = points.iter().map(|p| at(*p)).collect();
                match marker.thickness {
                    Some(width) => {
                        painter.add(Shape::line(points, Stroke::new(width, color)));
                    }
                    None => {
                        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
                    }
                }
            }
            MarkerShape::Text { pos, label } => {
                if !pos.is_finite() {
                    continue;
                }
                painter.text(
                    at(*pos),
                    Align2::LEFT_TOP,
                    label,
                    FontId::proportional(TEXT_SIZE),
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(Color::ORANGE), Color32::from_rgb(255, 136, 0));
        assert_eq!(
            to_color32(Color::WHITE.with_alpha(0)),
            Color32::from_rgba_unmultiplied(255, 255, 255, 0)
        );
    }

    #[test]
    fn test_finite_check() {
        assert!(finite(&[Vec2::ZERO, Vec2::ONE]));
        assert!(!finite(&[Vec2::ZERO, Vec2::new(f32::NAN, 0.0)]));
    }
}
