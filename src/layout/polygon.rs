use serde::{Deserialize, Serialize};

use super::types::Rect;

/// Resolved polygon vertex in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One coordinate of a polygon vertex as written in a scene file: a raw pixel
/// number, or a string with a `px`/`vw`/`vh` suffix resolved against the
/// viewport. Anything unparseable resolves to 0 rather than failing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Length {
    Px(f32),
    Expr(String),
}

impl Length {
    pub fn resolve(&self, viewport_w: f32, viewport_h: f32) -> f32 {
        match self {
            Length::Px(v) => *v,
            Length::Expr(s) => {
                let s = s.trim();
                if let Some(v) = s.strip_suffix("vw") {
                    v.trim().parse::<f32>().unwrap_or(0.0) / 100.0 * viewport_w
                } else if let Some(v) = s.strip_suffix("vh") {
                    v.trim().parse::<f32>().unwrap_or(0.0) / 100.0 * viewport_h
                } else if let Some(v) = s.strip_suffix("px") {
                    v.trim().parse::<f32>().unwrap_or(0.0)
                } else {
                    s.parse::<f32>().unwrap_or(0.0)
                }
            }
        }
    }
}

/// Point-in-polygon by ray casting: a point is inside when a horizontal ray
/// to +infinity crosses an odd number of edges.
pub fn contains_point(polygon: &[Point], x: f32, y: f32) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A chip rectangle counts as inside only when its center and all four
/// corners pass the ray-casting test.
pub fn contains_chip(polygon: &[Point], rect: &Rect) -> bool {
    let (cx, cy) = rect.center();
    if !contains_point(polygon, cx, cy) {
        return false;
    }
    let corners = [
        (rect.x, rect.y),
        (rect.right(), rect.y),
        (rect.x, rect.bottom()),
        (rect.right(), rect.bottom()),
    ];
    corners.iter().all(|&(px, py)| contains_point(polygon, px, py))
}

/// Axis-aligned bounds of the polygon, clamped to non-negative coordinates.
pub fn bounds(polygon: &[Point]) -> Rect {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in polygon {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let min_x = min_x.max(0.0);
    let min_y = min_y.max(0.0);
    Rect::new(min_x, min_y, (max_x - min_x).max(0.0), (max_y - min_y).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point { x: 0.0, y: 0.0 },
            Point { x: 100.0, y: 0.0 },
            Point { x: 50.0, y: 100.0 },
        ]
    }

    #[test]
    fn centroid_is_inside_triangle() {
        assert!(contains_point(&triangle(), 50.0, 30.0));
    }

    #[test]
    fn point_past_slanted_edge_is_outside() {
        assert!(!contains_point(&triangle(), 5.0, 60.0));
        assert!(!contains_point(&triangle(), 95.0, 60.0));
    }

    #[test]
    fn chip_needs_center_and_corners_inside() {
        let poly = triangle();
        // Near the apex the rect corners poke out even though the center fits.
        let wide = Rect::new(20.0, 60.0, 60.0, 20.0);
        assert!(!contains_chip(&poly, &wide));
        let small = Rect::new(40.0, 20.0, 20.0, 10.0);
        assert!(contains_chip(&poly, &small));
    }

    #[test]
    fn bounds_clamp_to_origin() {
        let poly = vec![
            Point { x: -40.0, y: -10.0 },
            Point { x: 60.0, y: -10.0 },
            Point { x: 60.0, y: 30.0 },
        ];
        let b = bounds(&poly);
        assert_eq!((b.x, b.y), (0.0, 0.0));
        assert_eq!((b.right(), b.bottom()), (60.0, 30.0));
    }

    #[test]
    fn length_resolves_viewport_units() {
        assert_eq!(Length::Px(42.0).resolve(1000.0, 800.0), 42.0);
        assert_eq!(Length::Expr("60vw".into()).resolve(1000.0, 800.0), 600.0);
        assert_eq!(Length::Expr("25vh".into()).resolve(1000.0, 800.0), 200.0);
        assert_eq!(Length::Expr("12px".into()).resolve(1000.0, 800.0), 12.0);
        assert_eq!(Length::Expr("nope".into()).resolve(1000.0, 800.0), 0.0);
    }
}
