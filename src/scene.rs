use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{Length, Measurements, Rect};

/// Errors surfaced while loading a scene file. Placement itself never
/// errors; only malformed input does.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene is not valid JSON5: {0}")]
    Parse(#[from] json5::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    BadViewport { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSpec {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Polygon vertex as written in the scene; units resolve at layout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyPointSpec {
    pub x: Length,
    pub y: Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    Random,
    Columns,
}

/// Reveal timing. `delay_start`/`per_item_delay` only shape the rendered
/// entry animation; the cycling fields drive the state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSpec {
    pub delay_start: f32,
    pub per_item_delay: f32,
    pub cycle: bool,
    pub cycle_interval: f32,
    pub stop_after_one_pass: bool,
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self {
            delay_start: 0.35,
            per_item_delay: 0.25,
            cycle: true,
            cycle_interval: 2.6,
            stop_after_one_pass: true,
        }
    }
}

/// Per-edge zone shaping: an optional anchor identifier per edge, with
/// percentage/pixel fallbacks when the anchor is absent, plus paddings
/// applied off the anchor and manual shifts applied either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSpec {
    pub anchor_left: Option<String>,
    pub anchor_right: Option<String>,
    pub anchor_top: Option<String>,
    pub anchor_bottom: Vec<String>,

    pub left_vw: f32,
    pub right_px: f32,
    pub top_px: f32,
    pub bottom_offset: f32,

    pub pad_left: f32,
    pub pad_right: f32,
    pub pad_top: f32,
    pub pad_bottom: f32,

    pub top_shift: f32,
    pub right_shift: f32,
    pub bottom_shift: f32,
}

impl Default for ZoneSpec {
    fn default() -> Self {
        Self {
            anchor_left: None,
            anchor_right: None,
            anchor_top: None,
            anchor_bottom: Vec::new(),
            left_vw: 50.0,
            right_px: 24.0,
            top_px: 160.0,
            bottom_offset: 140.0,
            pad_left: 12.0,
            pad_right: 12.0,
            pad_top: 8.0,
            pad_bottom: 18.0,
            top_shift: 0.0,
            right_shift: 0.0,
            bottom_shift: 0.0,
        }
    }
}

/// Everything one wall needs: the labels, the screen the wall lives on
/// (viewport plus the anchor rectangles other page elements occupy), and
/// the placement/timing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub show: bool,
    pub tags: Vec<String>,
    pub viewport: ViewportSpec,
    pub anchors: HashMap<String, Rect>,
    pub zone: ZoneSpec,
    pub polygon: Option<Vec<PolyPointSpec>>,
    pub mode: PlacementMode,
    pub timing: TimingSpec,
    pub seed: Option<u64>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            show: true,
            tags: Vec::new(),
            viewport: ViewportSpec::default(),
            anchors: HashMap::new(),
            zone: ZoneSpec::default(),
            polygon: None,
            mode: PlacementMode::Random,
            timing: TimingSpec::default(),
            seed: None,
        }
    }
}

impl Scene {
    /// Measurement provider backed by the scene's declared anchors, the
    /// file-driven stand-in for live host measurements.
    pub fn measurements(&self) -> StaticMeasurements {
        StaticMeasurements {
            viewport: (self.viewport.width, self.viewport.height),
            anchors: self.anchors.clone(),
        }
    }
}

pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let scene: Scene = json5::from_str(input)?;
    if scene.viewport.width <= 0.0 || scene.viewport.height <= 0.0 {
        return Err(SceneError::BadViewport {
            width: scene.viewport.width,
            height: scene.viewport.height,
        });
    }
    Ok(scene)
}

#[derive(Debug, Clone)]
pub struct StaticMeasurements {
    viewport: (f32, f32),
    anchors: HashMap<String, Rect>,
}

impl StaticMeasurements {
    pub fn new(viewport: (f32, f32), anchors: HashMap<String, Rect>) -> Self {
        Self { viewport, anchors }
    }
}

impl Measurements for StaticMeasurements {
    fn anchor_rect(&self, id: &str) -> Option<Rect> {
        self.anchors.get(id).copied()
    }

    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }
}
