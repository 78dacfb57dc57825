use crate::config::ColumnsConfig;

use super::types::{ChipSize, Rect, Zone};

/// Deterministic fallback layout: chips flow top-down through two or three
/// columns, round-robin, one slot per label. Three columns are used only
/// when each would still get `min_col_width`.
pub fn flow_columns(zone: &Zone, sizes: &[ChipSize], cfg: &ColumnsConfig) -> Vec<Rect> {
    if sizes.is_empty() || !zone.usable() {
        return Vec::new();
    }

    let three_fit = (zone.rect.w - 2.0 * cfg.gap_x) / 3.0 >= cfg.min_col_width;
    let cols = if three_fit { 3 } else { 2 };
    let col_w = (zone.rect.w - (cols as f32 - 1.0) * cfg.gap_x) / cols as f32;

    let mut col_y = vec![zone.rect.y; cols];
    let mut slots = Vec::with_capacity(sizes.len());
    for (i, size) in sizes.iter().enumerate() {
        let col = i % cols;
        let w = size.width.min(col_w);
        let x = zone.rect.x + col as f32 * (col_w + cfg.gap_x);
        let y = col_y[col];
        col_y[col] += size.height + cfg.gap_y;
        slots.push(Rect::new(x.round(), y.round(), w, size.height));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(widths: &[f32]) -> Vec<ChipSize> {
        widths
            .iter()
            .map(|&width| ChipSize {
                width,
                height: 36.0,
            })
            .collect()
    }

    #[test]
    fn wide_zone_gets_three_columns() {
        let zone = Zone::rectangular(Rect::new(0.0, 0.0, 600.0, 400.0));
        let cfg = ColumnsConfig::default();
        let slots = flow_columns(&zone, &sizes(&[100.0; 6]), &cfg);
        let xs: Vec<f32> = slots.iter().map(|s| s.x).collect();
        let distinct: std::collections::BTreeSet<i64> =
            xs.iter().map(|x| *x as i64).collect();
        assert_eq!(distinct.len(), 3, "expected 3 column origins, got {xs:?}");
    }

    #[test]
    fn narrow_zone_falls_back_to_two_columns() {
        let zone = Zone::rectangular(Rect::new(0.0, 0.0, 300.0, 400.0));
        let cfg = ColumnsConfig::default();
        let slots = flow_columns(&zone, &sizes(&[100.0; 4]), &cfg);
        let distinct: std::collections::BTreeSet<i64> =
            slots.iter().map(|s| s.x as i64).collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn every_label_gets_a_slot() {
        let zone = Zone::rectangular(Rect::new(100.0, 50.0, 500.0, 300.0));
        let slots = flow_columns(&zone, &sizes(&[90.0; 11]), &ColumnsConfig::default());
        assert_eq!(slots.len(), 11);
    }

    #[test]
    fn stacked_chips_keep_the_column_gap() {
        let zone = Zone::rectangular(Rect::new(0.0, 0.0, 300.0, 400.0));
        let cfg = ColumnsConfig::default();
        let slots = flow_columns(&zone, &sizes(&[100.0; 4]), &cfg);
        // Labels 0 and 2 share the first column.
        assert_eq!(slots[2].y - slots[0].bottom(), cfg.gap_y);
    }

    #[test]
    fn chip_width_clamps_to_column_width() {
        let zone = Zone::rectangular(Rect::new(0.0, 0.0, 300.0, 400.0));
        let cfg = ColumnsConfig::default();
        let slots = flow_columns(&zone, &sizes(&[260.0, 80.0]), &cfg);
        let col_w = (300.0 - cfg.gap_x) / 2.0;
        assert_eq!(slots[0].w, col_w);
        assert_eq!(slots[1].w, 80.0);
    }
}
