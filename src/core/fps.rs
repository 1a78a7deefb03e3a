use super::ring::SampleRing;
use super::sample::Millis;

/// Number of samples the widget's numeric readout averages over.
pub const FPS_WINDOW: usize = 20;

/// Moving-average frame rate over the `count` most recent samples, O(k) for
/// `k = min(count, stored)`.
///
/// The sum walks the inter-frame-start deltas (the `wait` field), which each
/// already span one full cycle, so adding work time on top would double
/// count. With an empty buffer the result is `f64::INFINITY`: a sentinel the
/// caller must treat as non-displayable, never a panic.
///
/// Traversal order is exactly [`SampleRing::recent`], so the estimator and
/// the renderer always agree on which samples are "most recent".
pub fn windowed_fps(ring: &SampleRing, count: usize) -> f64 {
    let mut total: Millis = 0.0;
    let mut k = 0usize;
    for sample in ring.recent(count) {
        total += sample.wait;
        k += 1;
    }
    if k == 0 {
        return f64::INFINITY;
    }
    1000.0 / (total / k as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::Sample;

    fn ring_with_waits(capacity: usize, waits: &[f64]) -> SampleRing {
        let mut ring = SampleRing::new(capacity);
        let mut t = 0.0;
        for &wait in waits {
            t += wait;
            ring.push(Sample { captured_at: t, wait, work: 1.0 });
        }
        ring
    }

    #[test]
    fn sixty_fps_from_sixteen_ms_frames() {
        let ring = ring_with_waits(40, &[16.67; 20]);
        let fps = windowed_fps(&ring, 20);
        assert!((fps - 60.0).abs() < 0.5, "expected ~60 fps, got {fps}");
    }

    #[test]
    fn window_caps_at_stored_count() {
        let ring = ring_with_waits(100, &[20.0; 10]);
        assert!((windowed_fps(&ring, 10) - 50.0).abs() < 1e-9);
        // asking for more than exists averages what is there
        assert!((windowed_fps(&ring, 100) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_buffer_returns_nondisplayable_sentinel() {
        let ring = SampleRing::new(8);
        assert!(!windowed_fps(&ring, FPS_WINDOW).is_finite());
    }

    #[test]
    fn only_the_most_recent_window_counts() {
        // ten slow frames followed by twenty fast ones
        let mut waits = vec![100.0; 10];
        waits.extend_from_slice(&[10.0; 20]);
        let ring = ring_with_waits(64, &waits);
        assert!((windowed_fps(&ring, 20) - 100.0).abs() < 1e-9);
    }
}
