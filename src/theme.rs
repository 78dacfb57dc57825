use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub chip_fill: String,
    pub chip_text_color: String,
    pub chip_border_color: String,
    pub pin_color: String,
    pub background: String,
}

impl Theme {
    /// Warm yellow chips with a dark pin, on white.
    pub fn portfolio() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 15.0,
            chip_fill: "rgba(253, 224, 71, 0.9)".to_string(),
            chip_text_color: "#171717".to_string(),
            chip_border_color: "rgba(23, 23, 23, 0.1)".to_string(),
            pin_color: "#171717".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn slate() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 15.0,
            chip_fill: "#E2E8F0".to_string(),
            chip_text_color: "#0F172A".to_string(),
            chip_border_color: "rgba(15, 23, 42, 0.12)".to_string(),
            pin_color: "#334155".to_string(),
            background: "#0B1220".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::portfolio()
    }
}
