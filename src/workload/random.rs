/*!
 * Random Workloads
 * Quick-add generator seeded from the process-type defaults
 */

use crate::core::types::Tick;
use crate::process::{ProcessSpec, ProcessType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_ARRIVAL: Tick = 8;
const IO_CHANCE: f64 = 0.3;
const MAX_IO_DURATION: Tick = 5;
const MAX_DEADLINE_SLACK: Tick = 20;

/// Random process generator
///
/// Bursts jitter the type default by -2..=+1, about 30% of processes get an
/// I/O burst, and deadlines are only drawn when `with_deadlines` is set.
pub struct RandomWorkload {
    rng: StdRng,
    with_deadlines: bool,
}

impl RandomWorkload {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            with_deadlines: false,
        }
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            with_deadlines: false,
        }
    }

    #[must_use]
    pub fn with_deadlines(mut self, enabled: bool) -> Self {
        self.with_deadlines = enabled;
        self
    }

    pub fn next_spec(&mut self) -> ProcessSpec {
        let kind = ProcessType::ALL[self.rng.gen_range(0..ProcessType::ALL.len())];
        let name = format!("{} {}", kind.label(), self.rng.gen_range(0..100));
        let arrival = self.rng.gen_range(0..MAX_ARRIVAL);

        let jitter: i64 = self.rng.gen_range(-2..=1);
        let burst = (kind.default_burst() as i64 + jitter).max(1) as Tick;

        let mut spec = ProcessSpec::new(name, arrival, burst)
            .with_type(kind)
            .with_priority(kind.default_priority());

        if self.rng.gen_bool(IO_CHANCE) {
            let offset = self.rng.gen_range(0..burst.saturating_sub(1).max(1));
            let duration = self.rng.gen_range(1..=MAX_IO_DURATION);
            spec = spec.with_io(offset, duration);
        }

        if self.with_deadlines {
            let slack = self.rng.gen_range(0..MAX_DEADLINE_SLACK);
            spec = spec.with_deadline(arrival + burst + slack);
        }

        spec
    }

    pub fn generate(&mut self, count: usize) -> Vec<ProcessSpec> {
        (0..count).map(|_| self.next_spec()).collect()
    }
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self::new()
    }
}
