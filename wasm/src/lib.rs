use serde::Deserialize;
use wasm_bindgen::prelude::*;

use tagwall::{Config, Theme, compute_frame, parse_scene, render};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WallOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    animate: Option<bool>,
    debug_zone: Option<bool>,
}

fn build_config(options: WallOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("slate") {
        config.theme = Theme::slate();
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(animate) = options.animate {
        config.render.animate = animate;
    }
    if let Some(debug_zone) = options.debug_zone {
        config.render.debug_zone = debug_zone;
    }
    config
}

fn parse_options(options_json: Option<String>) -> Result<WallOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<WallOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(WallOptions::default()),
    }
}

/// Lay out a scene and return the frame as JSON: resolved zone, slots, and
/// slot-to-label assignments for the host to animate itself.
#[wasm_bindgen]
pub fn pack_wall(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    let scene = parse_scene(scene_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let frame = compute_frame(scene, &config);
    serde_json::to_string(&frame).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Lay out a scene and render it straight to SVG.
#[wasm_bindgen]
pub fn render_wall_svg(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    let scene = parse_scene(scene_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let frame = compute_frame(scene, &config);
    Ok(render::render_svg(&frame, &config.theme, &config))
}
