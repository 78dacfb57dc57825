mod columns;
mod cycler;
mod grid;
mod packer;
pub(crate) mod polygon;
pub(crate) mod types;
mod zone;

pub use cycler::{Cycler, CyclerConfig, CyclerState};
pub use polygon::{Length, Point, contains_point};
pub use types::*;
pub use zone::{Measurements, resolve_zone};

pub use columns::flow_columns;
pub use packer::pack_labels;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::chip_metrics;
use crate::config::Config;
use crate::scene::{PlacementMode, Scene};

/// One wall instance: owns its zone, slots, assignment state, and RNG.
/// Nothing is shared across instances, so tearing one down is just dropping
/// it. The pipeline is strict: zone resolution, then packing, then
/// assignment; any input change reruns it from the top via `layout`.
pub struct TagWall {
    scene: Scene,
    config: Config,
    rng: StdRng,
    zone: Option<Zone>,
    slots: Vec<Rect>,
    cycler: Cycler,
}

impl TagWall {
    pub fn new(scene: Scene, config: Config) -> Self {
        let rng = match scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(scene, config, rng)
    }

    pub fn with_seed(scene: Scene, config: Config, seed: u64) -> Self {
        Self::with_rng(scene, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scene: Scene, config: Config, rng: StdRng) -> Self {
        let cycler = Cycler::new(CyclerConfig {
            cycle: scene.timing.cycle,
            interval_secs: scene.timing.cycle_interval,
            stop_after_one_pass: scene.timing.stop_after_one_pass,
        });
        Self {
            scene,
            config,
            rng,
            zone: None,
            slots: Vec::new(),
            cycler,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn cycler_state(&self) -> CyclerState {
        self.cycler.state()
    }

    /// Run the full pipeline against current measurements. Also the resize
    /// handler: any pending cycling schedule is discarded before the new
    /// zone and slots take effect.
    pub fn layout(&mut self, m: &dyn Measurements) {
        self.cycler.reset();
        self.slots.clear();
        self.zone = None;

        if !self.scene.show || self.scene.tags.is_empty() {
            return;
        }

        let zone = resolve_zone(
            &self.scene.zone,
            self.scene.polygon.as_deref(),
            m,
            &self.config.zone,
        );
        let sizes = chip_metrics::estimate_sizes(
            &self.scene.tags,
            &self.config.metrics,
            &self.config.theme,
        );

        self.slots = match self.scene.mode {
            PlacementMode::Random => {
                pack_labels(&zone, &sizes, &self.config.packer, &mut self.rng)
            }
            PlacementMode::Columns => flow_columns(&zone, &sizes, &self.config.columns),
        };
        self.zone = Some(zone);

        self.cycler
            .start(self.scene.tags.len(), self.slots.len(), &mut self.rng);
    }

    /// Advance the cycler one timer period.
    pub fn tick(&mut self) -> Option<usize> {
        self.cycler.tick(&mut self.rng)
    }

    pub fn frame(&self) -> Frame {
        let (vw, vh) = (self.scene.viewport.width, self.scene.viewport.height);
        let Some(zone) = &self.zone else {
            return Frame::empty(vw, vh);
        };
        Frame {
            viewport_width: vw,
            viewport_height: vh,
            zone: zone.clone(),
            slots: self.slots.clone(),
            assignments: self.cycler.assignments().to_vec(),
            labels: self.scene.tags.clone(),
            delay_start: self.scene.timing.delay_start,
            per_item_delay: self.scene.timing.per_item_delay,
        }
    }
}

/// Convenience entry point: lay out a scene once and return the first frame.
pub fn compute_frame(scene: Scene, config: &Config) -> Frame {
    let m = scene.measurements();
    let mut wall = TagWall::new(scene, config.clone());
    wall.layout(&m);
    wall.frame()
}

/// Check a sampled rect against the rest of the frame the way the packer
/// does. Exposed for tests and debug tooling.
pub fn frame_has_overlaps(frame: &Frame, margin: f32) -> bool {
    for i in 0..frame.slots.len() {
        for j in (i + 1)..frame.slots.len() {
            if frame.slots[i].overlaps_within(&frame.slots[j], margin) {
                return true;
            }
        }
    }
    false
}

/// Deterministic per-chip tilt in degrees, derived from the assignment
/// identity so a swapped-in chip gets a fresh lean without consuming the
/// layout RNG.
pub fn chip_tilt(generation: u64) -> f32 {
    let mut x = generation.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 33;
    let unit = (x % 1000) as f32 / 1000.0;
    (unit * 2.0 - 1.0) * 1.6
}
