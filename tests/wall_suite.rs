use std::path::Path;

use tagwall::layout::frame_has_overlaps;
use tagwall::{Config, Frame, compute_frame, parse_scene};

fn load_fixture(name: &str) -> Frame {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let scene = parse_scene(&input).expect("fixture parse failed");
    compute_frame(scene, &Config::default())
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg> tag");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = [
        "generous.json5",
        "anchored.json5",
        "polygon.json5",
        "triangle.json5",
        "columns.json5",
    ];

    let config = Config::default();
    for name in fixtures {
        let frame = load_fixture(name);
        let svg = tagwall::render::render_svg(&frame, &config.theme, &config);
        assert_valid_svg(&svg, name);
    }
}

#[test]
fn generous_fixture_places_every_tag() {
    let frame = load_fixture("generous.json5");
    assert_eq!(frame.slots.len(), frame.labels.len());
    assert_eq!(frame.assignments.len(), frame.labels.len());
    assert!(!frame_has_overlaps(&frame, Config::default().packer.margin));
}

#[test]
fn anchored_fixture_respects_anchor_edges() {
    let frame = load_fixture("anchored.json5");
    // heroName bottom is 240, projectsRail left is 1380, quote top is 760.
    assert!(frame.zone.rect.y >= 240.0);
    assert!(frame.zone.rect.right() <= 1380.0);
    assert!(frame.zone.rect.bottom() <= 760.0);
    for slot in &frame.slots {
        assert!(
            frame.zone.rect.contains_rect(slot),
            "slot escaped anchored zone: {slot:?}"
        );
    }
}

#[test]
fn polygon_fixture_keeps_chips_in_mask() {
    let frame = load_fixture("polygon.json5");
    let poly = frame.zone.polygon.as_ref().expect("polygon resolved");
    assert!(!frame.slots.is_empty(), "the masked zone has room to spare");
    for slot in &frame.slots {
        let corners = [
            (slot.x, slot.y),
            (slot.right(), slot.y),
            (slot.x, slot.bottom()),
            (slot.right(), slot.bottom()),
        ];
        for (x, y) in corners {
            assert!(
                tagwall::layout::contains_point(poly, x, y),
                "corner ({x}, {y}) escaped the mask"
            );
        }
    }
}

#[test]
fn triangle_fixture_degrades_to_empty() {
    let frame = load_fixture("triangle.json5");
    assert!(frame.slots.is_empty(), "nothing fits the pointy mask");
    assert!(frame.assignments.is_empty());
}

#[test]
fn columns_fixture_is_deterministic_and_complete() {
    let a = load_fixture("columns.json5");
    let b = load_fixture("columns.json5");
    assert_eq!(a.slots, b.slots);
    assert_eq!(a.slots.len(), a.labels.len(), "columns always seat every tag");
}
