use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::PackerConfig;

use super::grid::SlotGrid;
use super::polygon;
use super::types::{ChipSize, Rect, Zone};

/// Place one slot per label when space allows, by rejection sampling inside
/// the zone. Width candidates are drawn from the full estimated-width set
/// rather than walking labels in order, so early slots show size variety.
///
/// The attempt budget bounds runtime regardless of zone size; a zone too
/// small or too irregular simply yields fewer slots than labels.
pub fn pack_labels<R: Rng>(
    zone: &Zone,
    sizes: &[ChipSize],
    cfg: &PackerConfig,
    rng: &mut R,
) -> Vec<Rect> {
    if sizes.is_empty() || !zone.usable() {
        return Vec::new();
    }

    let bbox = match &zone.polygon {
        Some(poly) => polygon::bounds(poly),
        None => zone.rect,
    };
    let min_x = bbox.x.max(0.0);
    let min_y = bbox.y.max(0.0);
    let max_x = bbox.right();
    let max_y = bbox.bottom();

    let mut placed: Vec<Rect> = Vec::new();
    let mut grid = SlotGrid::new(cfg.cell_size);
    let mut attempts = 0usize;

    while attempts < cfg.max_attempts && placed.len() < sizes.len() {
        attempts += 1;

        let pick = sizes[rng.gen_range(0..sizes.len())];
        let (w, h) = (pick.width, pick.height);

        let x_lo = min_x + cfg.edge_inset;
        let x_hi = max_x - w - cfg.edge_inset;
        let y_lo = min_y;
        let y_hi = max_y - h;
        if x_hi < x_lo || y_hi < y_lo {
            // This width class cannot fit at all; other classes may.
            continue;
        }

        let x = rng.gen_range(x_lo..=x_hi).round();
        let y = rng.gen_range(y_lo..=y_hi).round();
        let rect = Rect::new(x, y, w, h);

        let contained = match &zone.polygon {
            Some(poly) => polygon::contains_chip(poly, &rect),
            None => zone.rect.contains_rect(&rect),
        };
        if !contained {
            continue;
        }

        let probe = rect.inflate(cfg.margin);
        let clear = grid
            .query(&probe)
            .all(|idx| !rect.overlaps_within(&placed[idx], cfg.margin));
        if !clear {
            continue;
        }

        grid.insert(placed.len(), &rect);
        placed.push(rect);
    }

    // Slot order drives the reveal stagger; shuffle so it does not mirror
    // acceptance order.
    placed.shuffle(rng);
    placed
}
