/*!
 * Optional timing of the phases of a construction.
 *
 * An [`Instrumentation`] collector can be passed to
 * [`SuffixArrayConstruction::with_instrumentation`](crate::SuffixArrayConstruction::with_instrumentation).
 * The algorithm calls [`Instrumentation::start`] and [`Instrumentation::stop`] around each phase on
 * every level of the recursion, so the collector sees the sum over all levels.
 *
 * ```
 * use skewsa::{SuffixArrayConstruction, ThreadCount, instrumentation::{Phase, Timings}};
 *
 * let mut timings = Timings::new();
 *
 * let res = SuffixArrayConstruction::for_text(b"mississippi".as_slice())
 *     .in_owned_buffer32()
 *     .multi_threaded(ThreadCount::rayon_default())
 *     .with_instrumentation(&mut timings)
 *     .run()
 *     .unwrap();
 *
 * assert_eq!(res.suffix_array(), &[10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
 * println!("radix sort took {:?}", timings.total(Phase::RadixSort));
 * ```
 */

use std::time::{Duration, Instant};

/// The phases of one recursion level that are reported to an [`Instrumentation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    RadixSort,
    Naming,
    Merge,
    Lcp,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::RadixSort, Phase::Naming, Phase::Merge, Phase::Lcp];

    fn slot(self) -> usize {
        self as usize
    }
}

/// A collector for timing information that is injected into a construction.
pub trait Instrumentation: Send {
    fn start(&mut self, phase: Phase);

    fn stop(&mut self, phase: Phase);

    /// The accumulated duration of every phase that was observed.
    fn report(&self) -> Vec<(Phase, Duration)>;
}

/// The default collector, which does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoInstrumentation;

impl Instrumentation for NoInstrumentation {
    #[inline(always)]
    fn start(&mut self, _phase: Phase) {}

    #[inline(always)]
    fn stop(&mut self, _phase: Phase) {}

    fn report(&self) -> Vec<(Phase, Duration)> {
        Vec::new()
    }
}

/// Accumulates wall-clock durations per [`Phase`].
#[derive(Debug, Clone, Default)]
pub struct Timings {
    totals: [Duration; 4],
    running: [Option<Instant>; 4],
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self, phase: Phase) -> Duration {
        self.totals[phase.slot()]
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Instrumentation for Timings {
    fn start(&mut self, phase: Phase) {
        self.running[phase.slot()] = Some(Instant::now());
    }

    fn stop(&mut self, phase: Phase) {
        if let Some(started) = self.running[phase.slot()].take() {
            self.totals[phase.slot()] += started.elapsed();
        }
    }

    fn report(&self) -> Vec<(Phase, Duration)> {
        Phase::ALL
            .into_iter()
            .map(|phase| (phase, self.total(phase)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_is_ignored() {
        let mut timings = Timings::new();
        timings.stop(Phase::Merge);

        assert_eq!(timings.total(Phase::Merge), Duration::ZERO);
    }

    #[test]
    fn durations_accumulate() {
        let mut timings = Timings::new();

        for _ in 0..3 {
            timings.start(Phase::Lcp);
            std::thread::sleep(Duration::from_millis(1));
            timings.stop(Phase::Lcp);
        }

        assert!(timings.total(Phase::Lcp) >= Duration::from_millis(3));
        assert_eq!(timings.report().len(), Phase::ALL.len());

        timings.clear();
        assert_eq!(timings.total(Phase::Lcp), Duration::ZERO);
    }
}
