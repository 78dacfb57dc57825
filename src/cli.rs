use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::load_config;
use crate::layout::TagWall;
use crate::render::{render_svg, write_output_svg};
use crate::scene::parse_scene;

#[derive(Parser, Debug)]
#[command(name = "tagwall", version, about = "Tag wall layout engine and renderer")]
pub struct Args {
    /// Scene file (.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG/JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (packer/zone/render/theme overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Number of cycler frames to emit (frame 0 is the initial fill)
    #[arg(long = "frames", default_value_t = 1)]
    pub frames: usize,

    /// Override the scene's RNG seed
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Override the scene viewport width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Override the scene viewport height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Outline the resolved zone and polygon in the output
    #[arg(long = "debug-zone", default_value_t = false)]
    pub debug_zone: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.debug_zone {
        config.render.debug_zone = true;
    }

    let input = read_input(args.input.as_deref())?;
    let mut scene = parse_scene(&input)?;
    if let Some(width) = args.width {
        scene.viewport.width = width;
    }
    if let Some(height) = args.height {
        scene.viewport.height = height;
    }

    let frames = args.frames.max(1);
    if frames > 1 && args.output.is_none() {
        return Err(anyhow::anyhow!("--frames > 1 requires an output path"));
    }
    if args.output_format == OutputFormat::Png && args.output.is_none() {
        return Err(anyhow::anyhow!("Output path required for PNG output"));
    }

    let measurements = scene.measurements();
    let mut wall = match args.seed {
        Some(seed) => TagWall::with_seed(scene, config.clone(), seed),
        None => TagWall::new(scene, config.clone()),
    };
    wall.layout(&measurements);

    for frame_idx in 0..frames {
        let frame = wall.frame();
        let output = args
            .output
            .as_deref()
            .map(|base| frame_path(base, frame_idx, frames));
        match args.output_format {
            OutputFormat::Svg => {
                let svg = render_svg(&frame, &config.theme, &config);
                write_output_svg(&svg, output.as_deref())?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&frame)?;
                match output.as_deref() {
                    Some(path) => std::fs::write(path, json)?,
                    None => println!("{json}"),
                }
            }
            OutputFormat::Png => {
                #[cfg(feature = "png")]
                {
                    let svg = render_svg(&frame, &config.theme, &config);
                    let path = output
                        .as_deref()
                        .ok_or_else(|| anyhow::anyhow!("Output path required for PNG output"))?;
                    crate::render::write_output_png(&svg, path)?;
                }
                #[cfg(not(feature = "png"))]
                return Err(anyhow::anyhow!(
                    "PNG output requires building with the `png` feature"
                ));
            }
        }
        if frame_idx + 1 < frames {
            wall.tick();
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        None => Err(anyhow::anyhow!("No scene input; pass --input FILE or '-'")),
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// `wall.svg` with 3 frames becomes `wall-000.svg`, `wall-001.svg`, ...
fn frame_path(base: &Path, frame_idx: usize, frames: usize) -> PathBuf {
    if frames <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = base
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svg".to_string());
    base.with_file_name(format!("{stem}-{frame_idx:03}.{ext}"))
}
