use std::time::Instant;

use super::sample::{Millis, Sample};

/// Running min/max of one observed quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Millis,
    pub max: Millis,
}

/// Process-lifetime extrema of the wait and work durations. Undefined until
/// the first observation, then folded monotonically forever; there is no
/// reset. The default render path does not consume these, they exist for
/// hosts that want an auto-ranged display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingExtrema {
    pub wait: Option<Extent>,
    pub work: Option<Extent>,
}

impl TimingExtrema {
    fn fold(slot: &mut Option<Extent>, value: Millis) {
        match slot {
            Some(extent) => {
                extent.min = extent.min.min(value);
                extent.max = extent.max.max(value);
            }
            None => *slot = Some(Extent { min: value, max: value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No cycle in flight; an end notification here is a no-op.
    Idle,
    /// A start notification was seen and its end is outstanding.
    AwaitingEnd,
}

/// Consumes the host render-loop's two ordered notifications per frame and
/// turns them into completed [`Sample`]s.
///
/// The host must deliver one start then one end per cycle. Degenerate inputs
/// are explicit transitions rather than errors: an end with no matching start
/// does nothing, and the very first cycle ever produces no sample because no
/// wait duration exists yet.
pub struct FrameTimer {
    epoch: Instant,
    phase: Phase,
    last_start: Option<Millis>,
    wait: Option<Millis>,
    extrema: TimingExtrema,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            phase: Phase::Idle,
            last_start: None,
            wait: None,
            extrema: TimingExtrema::default(),
        }
    }

    /// "About to render" handler, stamped with the timer's own clock.
    pub fn cycle_start(&mut self) {
        let now = self.now();
        self.cycle_start_at(now);
    }

    /// "Finished rendering" handler, stamped with the timer's own clock.
    pub fn cycle_end(&mut self) -> Option<Sample> {
        let now = self.now();
        self.cycle_end_at(now)
    }

    /// Start handler for hosts (and tests) that run their own millisecond
    /// clock. Valid as the first call ever; the wait duration only exists
    /// from the second start onward.
    pub fn cycle_start_at(&mut self, t: Millis) {
        if let Some(previous) = self.last_start {
            let wait = t - previous;
            TimingExtrema::fold(&mut self.extrema.wait, wait);
            self.wait = Some(wait);
        }
        self.last_start = Some(t);
        self.phase = Phase::AwaitingEnd;
    }

    /// End handler for hosts that run their own clock. Returns the completed
    /// sample, or `None` on the very first cycle and on an end with no
    /// matching start. Both are skipped data points, not errors.
    pub fn cycle_end_at(&mut self, t: Millis) -> Option<Sample> {
        if self.phase != Phase::AwaitingEnd {
            return None;
        }
        self.phase = Phase::Idle;

        let captured_at = self.last_start?;
        let wait = self.wait?;
        let work = t - captured_at;
        TimingExtrema::fold(&mut self.extrema.work, work);
        Some(Sample { captured_at, wait, work })
    }

    pub fn extrema(&self) -> &TimingExtrema {
        &self.extrema
    }

    fn now(&self) -> Millis {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
