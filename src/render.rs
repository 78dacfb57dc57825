use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::layout::{Frame, chip_tilt};
use crate::theme::Theme;

/// Render one frame of the wall as a standalone SVG. Chips carry a CSS
/// entry animation staggered by assignment order; the generation id keys
/// each chip group so a swapped label is a new element, replaying the
/// animation instead of reflowing in place.
pub fn render_svg(frame: &Frame, theme: &Theme, config: &Config) -> String {
    let mut svg = String::new();
    let width = frame.viewport_width.max(1.0);
    let height = frame.viewport_height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    if !theme.background.eq_ignore_ascii_case("transparent") {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            theme.background
        ));
    }

    if config.render.animate && !frame.assignments.is_empty() {
        svg.push_str("<style>");
        svg.push_str(
            "@keyframes chip-drop{from{opacity:0;transform:translate(24px,-80px) scale(0.95);}to{opacity:1;transform:none;}}",
        );
        svg.push_str(
            ".chip{opacity:0;animation:chip-drop 0.55s cubic-bezier(0.2,0.9,0.3,1.15) forwards;}",
        );
        svg.push_str("</style>");
    }

    if config.render.debug_zone {
        svg.push_str(&zone_outline_svg(frame));
    }

    for (i, assignment) in frame.assignments.iter().enumerate() {
        let Some(slot) = frame.slots.get(assignment.slot) else {
            continue;
        };
        let Some(label) = frame.labels.get(assignment.label) else {
            continue;
        };

        let (cx, cy) = slot.center();
        let tilt = chip_tilt(assignment.generation);
        let delay = frame.timing_delay(i);

        let class = if config.render.animate {
            " class=\"chip\""
        } else {
            ""
        };
        let style = if config.render.animate {
            format!(
                " style=\"animation-delay:{delay:.2}s;transform-origin:{cx:.1}px {cy:.1}px;\""
            )
        } else {
            String::new()
        };
        svg.push_str(&format!(
            "<g data-generation=\"{}\"{class}{style} transform=\"rotate({tilt:.2} {cx:.1} {cy:.1})\">",
            assignment.generation
        ));
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            slot.x,
            slot.y,
            slot.w,
            slot.h,
            theme.chip_fill,
            theme.chip_border_color,
            r = config.render.chip_radius,
        ));
        svg.push_str(&format!(
            "<circle cx=\"{cx:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"{}\"/>",
            slot.y - 2.0,
            config.render.pin_radius,
            theme.pin_color
        ));
        svg.push_str(&format!(
            "<text x=\"{cx:.1}\" y=\"{:.1}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            cy,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.chip_text_color,
            escape_xml(label)
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn zone_outline_svg(frame: &Frame) -> String {
    let mut out = String::new();
    let rect = frame.zone.rect;
    out.push_str(&format!(
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#FF3366\" stroke-dasharray=\"6 4\" stroke-width=\"1\"/>",
        rect.x, rect.y, rect.w, rect.h
    ));
    if let Some(poly) = &frame.zone.polygon
        && poly.len() >= 3
    {
        let mut d = format!("M {:.1} {:.1}", poly[0].x, poly[0].y);
        for p in &poly[1..] {
            d.push_str(&format!(" L {:.1} {:.1}", p.x, p.y));
        }
        d.push_str(" Z");
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"#3366FF\" stroke-dasharray=\"2 3\" stroke-width=\"1\"/>"
        ));
    }
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
