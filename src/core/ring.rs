use super::sample::Sample;

/// Fixed-capacity circular sample store.
///
/// Appends until full, then overwrites the oldest slot in place. The cursor
/// always points at the most recently written slot, and readers walk backward
/// from it, so a sample becomes visible in a single push with no intermediate
/// state.
pub struct SampleRing {
    samples: Vec<Sample>,
    cursor: usize,
    capacity: usize,
}

impl SampleRing {
    /// Capacity must be at least 1; the widget derives it as twice the
    /// configured logical width so every retained sample maps to one device
    /// column.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "sample ring capacity must be at least 1");
        Self {
            samples: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// O(1); never fails. While under capacity the sample is appended and the
    /// cursor moves to the new tail, afterwards the cursor advances circularly
    /// and overwrites.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
            self.cursor = self.samples.len() - 1;
        } else {
            self.cursor = (self.cursor + 1) % self.capacity;
            self.samples[self.cursor] = sample;
        }
    }

    /// Up to `n` samples, most recent first. Yields fewer while history is
    /// short, and never exposes slots that were not written yet. The iterator
    /// is read-only and restartable: calling `recent` again without an
    /// intervening `push` produces an identical sequence.
    pub fn recent(&self, n: usize) -> Recent<'_> {
        Recent {
            ring: self,
            index: self.cursor,
            remaining: n.min(self.samples.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // The only place backward wraparound arithmetic is allowed to live.
    // Wraps over the written region, which equals `capacity` once full.
    fn step_back(&self, index: usize) -> usize {
        (index + self.samples.len() - 1) % self.samples.len()
    }
}

/// Most-recent-first traversal handed out by [`SampleRing::recent`].
pub struct Recent<'a> {
    ring: &'a SampleRing,
    index: usize,
    remaining: usize,
}

impl<'a> Iterator for Recent<'a> {
    type Item = &'a Sample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let sample = &self.ring.samples[self.index];
        self.index = self.ring.step_back(self.index);
        self.remaining -= 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Recent<'_> {}
