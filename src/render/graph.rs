use glam::Vec2;

use super::canvas::Canvas;
use crate::core::color::Color;
use crate::core::fps::{windowed_fps, FPS_WINDOW};
use crate::core::ring::SampleRing;
use crate::core::sample::{Millis, Sample};
use crate::options::LagometerOptions;

/// Which timing series a polyline follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Inter-frame delay, drawn in `frame_color`.
    Wait,
    /// In-frame execution time, drawn in `script_color`.
    Work,
}

impl Track {
    fn value(self, sample: &Sample) -> Millis {
        match self {
            Track::Wait => sample.wait,
            Track::Work => sample.work,
        }
    }
}

/// Repaint the whole widget from current ring contents. The renderer holds
/// no state between calls; there is no dirty-region tracking to get wrong.
///
/// Order matters: background, border, readout, then the two polylines on a
/// shared axis, wait track below the work track in z.
pub fn render(canvas: &mut Canvas, ring: &SampleRing, opts: &LagometerOptions) {
    let (w, h) = (canvas.width(), canvas.height());

    canvas.clear();
    canvas.fill_rect(0, 0, w, h, opts.background_color);
    canvas.stroke_rect(0, 0, w, h, opts.border_color);

    // Readout over the most recent FPS_WINDOW samples, pinned near the
    // top-right corner. Skipped while the buffer is empty: the estimator's
    // sentinel is non-finite and must not be displayed.
    let fps = windowed_fps(ring, FPS_WINDOW);
    if fps.is_finite() {
        let label = format!("{} fps", fps.round() as i64);
        canvas.draw_text(&label, w as i32 - 84, 26, opts.text_color);
    }

    trace(canvas, ring, Track::Wait, opts.frame_color, opts.min, opts.max);
    trace(canvas, ring, Track::Work, opts.script_color, opts.min, opts.max);
}

/// One track's polyline, newest sample at the right edge growing leftward.
/// Values outside `[min, max]` land off-canvas on purpose, making overload
/// visually obvious; the canvas clips per pixel, so nothing can go wrong.
fn trace(
    canvas: &mut Canvas,
    ring: &SampleRing,
    track: Track,
    color: Color,
    min: Millis,
    max: Millis,
) {
    if max <= min {
        return;
    }
    let (w, h) = (canvas.width(), canvas.height());
    let mut previous: Option<Vec2> = None;
    for (i, sample) in ring.recent(ring.len()).enumerate() {
        let point = plot_point(i, track.value(sample), min, max, w, h);
        if let Some(prev) = previous {
            canvas.draw_line(prev, point, color);
        }
        previous = Some(point);
    }
}

/// Screen position for the sample at offset `i` back from the newest.
fn plot_point(i: usize, value: Millis, min: Millis, max: Millis, w: usize, h: usize) -> Vec2 {
    let y_scale = h as f32 / (max - min) as f32;
    Vec2::new(
        w as f32 - i as f32,
        h as f32 - (value - min) as f32 * y_scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(capacity: usize, wait: Millis, work: Millis, cycles: usize) -> SampleRing {
        let mut ring = SampleRing::new(capacity);
        for n in 0..cycles {
            ring.push(Sample {
                captured_at: n as Millis * wait,
                wait,
                work,
            });
        }
        ring
    }

    fn count_pixels(canvas: &Canvas, color: Color) -> usize {
        let packed = color.to_u32();
        canvas.pixels().iter().filter(|&&px| px == packed).count()
    }

    #[test]
    fn in_range_tracks_paint_inside_the_canvas() {
        // size [50, 50] -> capacity 100, device canvas 100x100
        let opts = LagometerOptions {
            size: [50, 50],
            ..LagometerOptions::default()
        };
        let ring = ring_of(100, 20.0, 5.0, 10);
        let mut canvas = Canvas::new(opts.size);
        render(&mut canvas, &ring, &opts);

        // wait = 20ms and work = 5ms both sit inside the default 0..34 range
        assert!(count_pixels(&canvas, opts.frame_color) > 0);
        assert!(count_pixels(&canvas, opts.script_color) > 0);
    }

    #[test]
    fn over_range_track_draws_off_canvas_without_panicking() {
        let opts = LagometerOptions {
            size: [50, 50],
            ..LagometerOptions::default()
        };
        // wait = 40ms exceeds max = 34ms: the whole wait polyline maps above
        // the canvas top edge and must vanish, while the work track stays.
        let ring = ring_of(100, 40.0, 5.0, 10);
        let mut canvas = Canvas::new(opts.size);
        render(&mut canvas, &ring, &opts);

        assert_eq!(count_pixels(&canvas, opts.frame_color), 0);
        assert!(count_pixels(&canvas, opts.script_color) > 0);
    }

    #[test]
    fn empty_ring_renders_frame_only() {
        let opts = LagometerOptions::default();
        let ring = SampleRing::new(200);
        let mut canvas = Canvas::new(opts.size);
        render(&mut canvas, &ring, &opts);

        let w = canvas.width();
        assert_eq!(canvas.pixels()[0], opts.border_color.to_u32());
        assert_eq!(
            canvas.pixels()[(canvas.height() / 2) * w + w / 2],
            opts.background_color.to_u32()
        );
        assert_eq!(count_pixels(&canvas, opts.frame_color), 0);
    }

    #[test]
    fn single_sample_draws_no_segment() {
        let opts = LagometerOptions {
            size: [50, 50],
            ..LagometerOptions::default()
        };
        let ring = ring_of(100, 20.0, 5.0, 1);
        let mut canvas = Canvas::new(opts.size);
        render(&mut canvas, &ring, &opts);
        // a lone point has no neighbor to connect to; x = W - 0 is also the
        // first column past the right edge
        assert_eq!(count_pixels(&canvas, opts.frame_color), 0);
    }

    #[test]
    fn degenerate_range_skips_tracks() {
        let opts = LagometerOptions {
            size: [50, 50],
            min: 10.0,
            max: 10.0,
            ..LagometerOptions::default()
        };
        let ring = ring_of(100, 20.0, 5.0, 10);
        let mut canvas = Canvas::new(opts.size);
        render(&mut canvas, &ring, &opts);
        assert_eq!(count_pixels(&canvas, opts.frame_color), 0);
        assert_eq!(count_pixels(&canvas, opts.script_color), 0);
    }
}
