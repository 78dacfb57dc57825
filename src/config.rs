use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Zone guard rails applied after anchor/fallback resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            min_width: 240.0,
            min_height: 220.0,
        }
    }
}

/// Rejection-sampling knobs: 10px chip margin, 64px grid cells, a 12k
/// attempt cap, 6px horizontal sampling inset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    pub margin: f32,
    pub cell_size: f32,
    pub max_attempts: usize,
    pub edge_inset: f32,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            cell_size: 64.0,
            max_attempts: 12_000,
            edge_inset: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub gap_x: f32,
    pub gap_y: f32,
    pub min_col_width: f32,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            gap_x: 14.0,
            gap_y: 10.0,
            min_col_width: 180.0,
        }
    }
}

/// Chip sizing. The width heuristic is `base_width + per_char * len`
/// clamped to `[min_width, max_width]`; `measure_text` upgrades to real
/// glyph advances when a system font is available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub base_width: f32,
    pub per_char: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub chip_height: f32,
    pub text_pad_x: f32,
    pub measure_text: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            base_width: 30.0,
            per_char: 8.0,
            min_width: 90.0,
            max_width: 260.0,
            chip_height: 36.0,
            text_pad_x: 16.0,
            measure_text: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub chip_radius: f32,
    pub pin_radius: f32,
    pub animate: bool,
    pub debug_zone: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chip_radius: 12.0,
            pin_radius: 5.0,
            animate: true,
            debug_zone: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub zone: ZoneConfig,
    pub packer: PackerConfig,
    pub columns: ColumnsConfig,
    pub metrics: MetricsConfig,
    pub render: RenderConfig,
    pub theme: Theme,
}

/// Load a JSON5 config file over the defaults; `None` means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = json5::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_wall_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.packer.margin, 10.0);
        assert_eq!(cfg.packer.cell_size, 64.0);
        assert_eq!(cfg.packer.max_attempts, 12_000);
        assert_eq!(cfg.metrics.chip_height, 36.0);
        assert_eq!(cfg.columns.min_col_width, 180.0);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let cfg: Config =
            json5::from_str(r#"{ packer: { margin: 4 }, render: { debug_zone: true } }"#)
                .expect("parses");
        assert_eq!(cfg.packer.margin, 4.0);
        assert_eq!(cfg.packer.cell_size, 64.0, "untouched fields keep defaults");
        assert!(cfg.render.debug_zone);
    }
}
