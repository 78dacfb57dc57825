use std::collections::HashMap;
use std::sync::Mutex;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use ttf_parser::Face;

use crate::config::MetricsConfig;
use crate::layout::ChipSize;
use crate::theme::Theme;

static CHIP_MEASURER: Lazy<Mutex<ChipMeasurer>> = Lazy::new(|| Mutex::new(ChipMeasurer::new()));

/// Estimated chip boxes for a tag list. The length heuristic keeps the
/// packer independent of any font machinery; `measure_text` swaps in real
/// glyph advances so rendered chips hug their labels.
pub fn estimate_sizes(tags: &[String], cfg: &MetricsConfig, theme: &Theme) -> Vec<ChipSize> {
    tags.iter()
        .map(|tag| ChipSize {
            width: chip_width(tag, cfg, theme),
            height: cfg.chip_height,
        })
        .collect()
}

pub fn chip_width(label: &str, cfg: &MetricsConfig, theme: &Theme) -> f32 {
    if cfg.measure_text
        && let Some(text_w) = measure_text_width(label, theme.font_size, &theme.font_family)
    {
        let w = text_w + 2.0 * cfg.text_pad_x;
        return w.round().clamp(cfg.min_width, cfg.max_width);
    }
    estimate_chip_width(label, cfg)
}

/// Length heuristic: base plus a per-character step, clamped so outliers
/// stay chip-shaped.
pub fn estimate_chip_width(label: &str, cfg: &MetricsConfig) -> f32 {
    let w = cfg.base_width + cfg.per_char * label.chars().count() as f32;
    w.round().clamp(cfg.min_width, cfg.max_width)
}

/// Measure `text` against the first system face matching `font_family`.
/// Returns None when no face resolves (headless or stripped environments);
/// callers fall back to the heuristic.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = CHIP_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct ChipMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FaceMetrics>>,
}

impl ChipMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let metrics = self.load_metrics(font_family);
            self.cache.insert(key.clone(), metrics);
        }
        let metrics = self.cache.get(&key)?.as_ref()?;
        Some(metrics.width_of(text, font_size))
    }

    fn load_metrics(&mut self, font_family: &str) -> Option<FaceMetrics> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let mut names: Vec<String> = Vec::new();
        let mut families: Vec<Family<'_>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    families.push(Family::SansSerif)
                }
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                _ => names.push(raw.to_string()),
            }
        }
        for name in &names {
            families.push(Family::Name(name.as_str()));
        }
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut metrics: Option<FaceMetrics> = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                metrics = Some(FaceMetrics::from_face(&face));
            }
        });
        metrics
    }
}

/// ASCII advance table extracted once per face. Chip labels are short tag
/// words, so a per-codepoint table plus a fallback advance covers them.
struct FaceMetrics {
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FaceMetrics {
    fn from_face(face: &Face<'_>) -> Self {
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Self {
            units_per_em: face.units_per_em().max(1),
            ascii_advances,
        }
    }

    fn width_of(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                self.ascii_advances[ch as usize]
            } else {
                0
            };
            if advance == 0 {
                width += fallback;
            } else {
                width += advance as f32 * scale;
            }
        }
        width.max(0.0)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_grows_with_length_and_clamps() {
        let cfg = MetricsConfig::default();
        let short = estimate_chip_width("Go", &cfg);
        let medium = estimate_chip_width("TypeScript", &cfg);
        let long = estimate_chip_width("a very very long framework name here", &cfg);
        assert_eq!(short, cfg.min_width, "short labels clamp to the minimum");
        assert!(medium > short);
        assert_eq!(long, cfg.max_width, "long labels clamp to the maximum");
    }

    #[test]
    fn heuristic_matches_formula_between_clamps() {
        let cfg = MetricsConfig::default();
        // 10 chars: 30 + 8 * 10 = 110.
        assert_eq!(estimate_chip_width("TypeScript", &cfg), 110.0);
    }

    #[test]
    fn estimate_sizes_uses_fixed_height() {
        let cfg = MetricsConfig::default();
        let sizes = estimate_sizes(
            &["Rust".to_string(), "Docker".to_string()],
            &cfg,
            &Theme::default(),
        );
        assert!(sizes.iter().all(|s| s.height == cfg.chip_height));
    }

    #[test]
    fn empty_text_measures_zero() {
        assert_eq!(measure_text_width("", 15.0, "sans-serif"), Some(0.0));
    }
}
