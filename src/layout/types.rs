use serde::{Deserialize, Serialize};

use super::polygon::Point;

/// Axis-aligned rectangle in page coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    pub fn inflate(&self, pad: f32) -> Self {
        if pad <= 0.0 {
            return *self;
        }
        Self {
            x: self.x - pad,
            y: self.y - pad,
            w: self.w + pad * 2.0,
            h: self.h + pad * 2.0,
        }
    }

    /// True when the rectangles are closer than `margin` on both axes.
    /// A gap of exactly `margin` or more keeps them clear.
    pub fn overlaps_within(&self, other: &Rect, margin: f32) -> bool {
        !(self.right() + margin < other.x
            || other.right() + margin < self.x
            || self.bottom() + margin < other.y
            || other.bottom() + margin < self.y)
    }

    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }
}

/// Screen region eligible to receive chips. The rectangle is always present;
/// the polygon, when set, further restricts placement.
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    pub rect: Rect,
    pub polygon: Option<Vec<Point>>,
}

impl Zone {
    pub fn rectangular(rect: Rect) -> Self {
        Self {
            rect,
            polygon: None,
        }
    }

    pub fn usable(&self) -> bool {
        self.rect.w > 0.0 && self.rect.h > 0.0
    }
}

/// Estimated chip box for one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipSize {
    pub width: f32,
    pub height: f32,
}

/// One label currently occupying one slot. `generation` changes every time a
/// label is swapped into the slot and is the animation identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub slot: usize,
    pub label: usize,
    pub generation: u64,
}

/// Snapshot of the wall at one point in time, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub zone: Zone,
    pub slots: Vec<Rect>,
    pub assignments: Vec<Assignment>,
    pub labels: Vec<String>,
    pub delay_start: f32,
    pub per_item_delay: f32,
}

impl Frame {
    pub fn empty(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            zone: Zone::rectangular(Rect::new(0.0, 0.0, 0.0, 0.0)),
            slots: Vec::new(),
            assignments: Vec::new(),
            labels: Vec::new(),
            delay_start: 0.0,
            per_item_delay: 0.0,
        }
    }

    /// Entry-animation delay for the chip at reveal position `i`.
    pub fn timing_delay(&self, i: usize) -> f32 {
        self.delay_start + i as f32 * self.per_item_delay
    }
}
