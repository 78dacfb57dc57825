use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use super::types::Assignment;

/// Cycling behavior. `interval_secs` is the host's timer period; the state
/// machine itself is advanced one step per `tick` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclerConfig {
    pub cycle: bool,
    pub interval_secs: f32,
    pub stop_after_one_pass: bool,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            cycle: true,
            interval_secs: 2.6,
            stop_after_one_pass: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclerState {
    Idle,
    Filling,
    Cycling,
    Settled,
}

/// Temporal reveal of labels into slots. Owns its queue, assignments, and
/// generation counter; the host owns the timer and calls `tick` per period.
/// `reset` is the teardown analog and must run whenever slots, labels, or
/// visibility change, so a stale schedule can never mutate fresh state.
#[derive(Debug)]
pub struct Cycler {
    cfg: CyclerConfig,
    state: CyclerState,
    label_count: usize,
    queue: VecDeque<usize>,
    assignments: Vec<Assignment>,
    generation: u64,
}

impl Cycler {
    pub fn new(cfg: CyclerConfig) -> Self {
        Self {
            cfg,
            state: CyclerState::Idle,
            label_count: 0,
            queue: VecDeque::new(),
            assignments: Vec::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> CyclerState {
        self.state
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Fill slots with a random permutation of labels, then arm cycling if
    /// labels remain. No-op unless idle; call `reset` first to restart.
    pub fn start<R: Rng>(&mut self, label_count: usize, slot_count: usize, rng: &mut R) {
        if self.state != CyclerState::Idle {
            return;
        }
        self.state = CyclerState::Filling;
        self.label_count = label_count;

        let mut order: Vec<usize> = (0..label_count).collect();
        order.shuffle(rng);

        let first_batch = slot_count.min(label_count);
        let mut assignments = Vec::with_capacity(first_batch);
        for (slot, &label) in order[..first_batch].iter().enumerate() {
            let generation = self.next_generation();
            assignments.push(Assignment {
                slot,
                label,
                generation,
            });
        }
        self.assignments = assignments;

        self.queue = order[first_batch..].iter().copied().collect();
        self.state = if self.cfg.cycle && !self.queue.is_empty() {
            CyclerState::Cycling
        } else {
            CyclerState::Settled
        };
    }

    /// One timer period: swap the next queued label into a random occupied
    /// slot. Returns the index into `assignments` that changed.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.state != CyclerState::Cycling {
            return None;
        }
        if self.queue.is_empty() {
            if self.cfg.stop_after_one_pass {
                self.state = CyclerState::Settled;
                return None;
            }
            let mut refill: Vec<usize> = (0..self.label_count).collect();
            refill.shuffle(rng);
            self.queue = refill.into();
        }
        if self.assignments.is_empty() {
            self.state = CyclerState::Settled;
            return None;
        }

        let replace_at = rng.gen_range(0..self.assignments.len());
        let label = self.queue.pop_front()?;
        let generation = self.next_generation();
        let slot = self.assignments[replace_at].slot;
        self.assignments[replace_at] = Assignment {
            slot,
            label,
            generation,
        };
        Some(replace_at)
    }

    /// Back to `Idle`, dropping the queue and assignments. The generation
    /// counter keeps rising so identities never repeat across restarts.
    pub fn reset(&mut self) {
        self.state = CyclerState::Idle;
        self.queue.clear();
        self.assignments.clear();
        self.label_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn filling_assigns_min_of_slots_and_labels() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(3, 8, &mut rng);
        assert_eq!(cycler.assignments().len(), 3);
        assert_eq!(cycler.state(), CyclerState::Settled, "no leftovers to cycle");
    }

    #[test]
    fn leftovers_arm_cycling() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(10, 4, &mut rng);
        assert_eq!(cycler.assignments().len(), 4);
        assert_eq!(cycler.state(), CyclerState::Cycling);
    }

    #[test]
    fn one_pass_shows_every_label_once() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(12, 5, &mut rng);

        let mut seen: std::collections::HashSet<usize> =
            cycler.assignments().iter().map(|a| a.label).collect();
        while cycler.state() == CyclerState::Cycling {
            if let Some(idx) = cycler.tick(&mut rng) {
                seen.insert(cycler.assignments()[idx].label);
            }
        }
        assert_eq!(cycler.state(), CyclerState::Settled);
        assert_eq!(seen.len(), 12, "every label must appear at least once");
    }

    #[test]
    fn generations_are_unique_and_increasing() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(9, 3, &mut rng);

        let mut all: Vec<u64> = cycler.assignments().iter().map(|a| a.generation).collect();
        let mut last = *all.iter().max().unwrap();
        while cycler.tick(&mut rng).is_some() {
            let current = cycler.assignments().iter().map(|a| a.generation).max().unwrap();
            assert!(current > last, "generation must move forward on swap");
            last = current;
            all.push(current);
        }
        let unique: std::collections::HashSet<u64> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn disabled_cycling_settles_immediately() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut cycler = Cycler::new(CyclerConfig {
            cycle: false,
            ..CyclerConfig::default()
        });
        cycler.start(10, 4, &mut rng);
        assert_eq!(cycler.state(), CyclerState::Settled);
        assert!(cycler.tick(&mut rng).is_none());
    }

    #[test]
    fn endless_mode_refills_the_queue() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut cycler = Cycler::new(CyclerConfig {
            stop_after_one_pass: false,
            ..CyclerConfig::default()
        });
        cycler.start(6, 2, &mut rng);
        // Far more ticks than one pass needs; must keep swapping.
        let mut swaps = 0;
        for _ in 0..40 {
            if cycler.tick(&mut rng).is_some() {
                swaps += 1;
            }
        }
        assert_eq!(swaps, 40);
        assert_eq!(cycler.state(), CyclerState::Cycling);
    }

    #[test]
    fn reset_returns_to_idle_but_keeps_identity_monotonic() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(4, 4, &mut rng);
        let before = cycler.assignments().iter().map(|a| a.generation).max().unwrap();
        cycler.reset();
        assert_eq!(cycler.state(), CyclerState::Idle);
        assert!(cycler.assignments().is_empty());
        cycler.start(4, 4, &mut rng);
        let after = cycler.assignments().iter().map(|a| a.generation).min().unwrap();
        assert!(after > before, "identities must not repeat after restart");
    }

    #[test]
    fn zero_slots_never_cycles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cycler = Cycler::new(CyclerConfig::default());
        cycler.start(5, 0, &mut rng);
        assert!(cycler.assignments().is_empty());
        // Queue holds all five labels but there is nowhere to put them.
        while cycler.state() == CyclerState::Cycling {
            if cycler.tick(&mut rng).is_none() {
                break;
            }
        }
        assert!(cycler.assignments().is_empty());
    }
}
