use crate::config::ZoneConfig;
use crate::scene::{PolyPointSpec, ZoneSpec};

use super::polygon::Point;
use super::types::{Rect, Zone};

/// Host-measurement seam: anchor rectangles and viewport size come from the
/// embedding environment (live DOM in a browser host, declared rects in a
/// scene file). Lookups may fail; the resolver falls back silently.
pub trait Measurements {
    fn anchor_rect(&self, id: &str) -> Option<Rect>;
    fn viewport(&self) -> (f32, f32);
}

/// Resolve the zone from per-edge anchors and percentage/pixel fallbacks.
/// Pure with respect to its inputs: identical measurements yield an
/// identical zone.
pub fn resolve_zone(
    spec: &ZoneSpec,
    polygon: Option<&[PolyPointSpec]>,
    m: &dyn Measurements,
    cfg: &ZoneConfig,
) -> Zone {
    let (vw, vh) = m.viewport();

    let mut left = (vw * spec.left_vw / 100.0).floor();
    if let Some(rect) = spec.anchor_left.as_deref().and_then(|id| m.anchor_rect(id)) {
        left = left.max((rect.right() + spec.pad_left).round());
    }

    let mut right = vw - spec.right_px;
    if let Some(rect) = spec.anchor_right.as_deref().and_then(|id| m.anchor_rect(id)) {
        right = right.min((rect.x - spec.pad_right).round());
    }
    right += spec.right_shift;

    let mut top = spec.top_px;
    if let Some(rect) = spec.anchor_top.as_deref().and_then(|id| m.anchor_rect(id)) {
        top = top.max((rect.bottom() + spec.pad_top).round());
    }
    top += spec.top_shift;

    let mut bottom = vh - spec.bottom_offset;
    let bottom_edges: Vec<f32> = spec
        .anchor_bottom
        .iter()
        .filter_map(|id| m.anchor_rect(id))
        .map(|rect| (rect.y - spec.pad_bottom).round())
        .collect();
    if !bottom_edges.is_empty() {
        bottom = bottom_edges.iter().copied().fold(f32::INFINITY, f32::min);
    }
    bottom += spec.bottom_shift;

    // Guards against zero-area zones when anchors are missing or misplaced.
    if right - left < cfg.min_width {
        right = left + cfg.min_width;
    }
    if bottom - top < cfg.min_height {
        bottom = top + cfg.min_height;
    }

    Zone {
        rect: Rect::new(left, top, right - left, bottom - top),
        polygon: polygon.and_then(|pts| resolve_polygon(pts, vw, vh)),
    }
}

/// Convert scene polygon points to pixels. Fewer than 3 points means the
/// mask is unusable and the rectangular zone applies instead.
fn resolve_polygon(points: &[PolyPointSpec], vw: f32, vh: f32) -> Option<Vec<Point>> {
    if points.len() < 3 {
        return None;
    }
    Some(
        points
            .iter()
            .map(|p| Point {
                x: p.x.resolve(vw, vh),
                y: p.y.resolve(vw, vh),
            })
            .collect(),
    )
}
