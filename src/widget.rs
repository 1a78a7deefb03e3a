use fontdue::{Font, FontSettings};
use log::{debug, warn};

use crate::core::fps::windowed_fps;
use crate::core::ring::SampleRing;
use crate::core::sample::Millis;
use crate::core::timer::{FrameTimer, TimingExtrema};
use crate::options::LagometerOptions;
use crate::render::canvas::Canvas;
use crate::render::graph;

/// The composed widget: frame timer, sample history and graph surface behind
/// the two render-loop notification handlers plus one draw call per paint
/// pass.
///
/// Everything runs on the host's single render timeline; the widget never
/// blocks, spawns, or performs I/O after construction.
pub struct Lagometer {
    options: LagometerOptions,
    timer: FrameTimer,
    ring: SampleRing,
    canvas: Canvas,
}

impl Lagometer {
    pub fn new(options: LagometerOptions) -> Self {
        let capacity = (options.size[0] * 2).max(1);
        let mut canvas = Canvas::new(options.size);

        if let Some(path) = &options.font.path {
            let settings = FontSettings {
                scale: options.font.px,
                ..FontSettings::default()
            };
            let loaded = std::fs::read(path)
                .map_err(|err| err.to_string())
                .and_then(|bytes| Font::from_bytes(bytes, settings).map_err(str::to_owned));
            match loaded {
                Ok(font) => canvas.set_font(font, options.font.px),
                Err(err) => warn!("no FPS readout, font {:?} unusable: {err}", path),
            }
        }

        Self {
            timer: FrameTimer::new(),
            ring: SampleRing::new(capacity),
            canvas,
            options,
        }
    }

    /// Host render-loop "about to render" notification.
    pub fn on_cycle_start(&mut self) {
        self.timer.cycle_start();
    }

    /// Host render-loop "finished rendering" notification. A completed
    /// sample becomes visible to the renderer in this single push, or not at
    /// all; there is no partially recorded state for a draw to observe.
    pub fn on_cycle_end(&mut self) {
        if let Some(sample) = self.timer.cycle_end() {
            self.ring.push(sample);
        }
    }

    /// Notification pair for hosts that run their own millisecond clock.
    pub fn on_cycle_start_at(&mut self, t: Millis) {
        self.timer.cycle_start_at(t);
    }

    pub fn on_cycle_end_at(&mut self, t: Millis) {
        if let Some(sample) = self.timer.cycle_end_at(t) {
            self.ring.push(sample);
        }
    }

    /// Repaint from current history and hand back the device-pixel buffer
    /// (row-major 0x00RRGGBB, sized [`Self::pixel_size`]) for the host to
    /// composite.
    pub fn draw(&mut self) -> &[u32] {
        let logical = self.options.size;
        self.canvas
            .set_size(logical, [logical[0] * 2, logical[1] * 2]);
        graph::render(&mut self.canvas, &self.ring, &self.options);
        self.canvas.pixels()
    }

    /// Change the logical size used by subsequent draws. History depth stays
    /// tied to the width the widget was constructed with.
    pub fn resize(&mut self, size: [usize; 2]) {
        debug!("lagometer resized to {size:?}");
        self.options.size = size;
    }

    /// Moving-average frame rate over the `count` most recent samples.
    /// Non-finite while no samples exist; see [`windowed_fps`].
    pub fn fps(&self, count: usize) -> f64 {
        windowed_fps(&self.ring, count)
    }

    pub fn samples(&self) -> &SampleRing {
        &self.ring
    }

    pub fn extrema(&self) -> &TimingExtrema {
        self.timer.extrema()
    }

    pub fn options(&self) -> &LagometerOptions {
        &self.options
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Device-pixel dimensions of the buffer [`Self::draw`] returns.
    pub fn pixel_size(&self) -> [usize; 2] {
        [self.options.size[0] * 2, self.options.size[1] * 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(size: [usize; 2]) -> Lagometer {
        Lagometer::new(LagometerOptions {
            size,
            ..LagometerOptions::default()
        })
    }

    /// Drives `cycles` full cycles with the given wait/work durations, after
    /// one warm-up cycle so every driven cycle lands in the ring.
    fn drive(meter: &mut Lagometer, wait: Millis, work: Millis, cycles: usize) {
        meter.on_cycle_start_at(0.0);
        meter.on_cycle_end_at(0.0);
        for n in 1..=cycles {
            let start = wait * n as Millis;
            meter.on_cycle_start_at(start);
            meter.on_cycle_end_at(start + work);
        }
    }

    #[test]
    fn fifty_by_fifty_scenario() {
        let mut meter = meter([50, 50]);
        assert_eq!(meter.samples().capacity(), 100);

        drive(&mut meter, 20.0, 5.0, 10);
        assert_eq!(meter.samples().len(), 10);
        assert!((meter.fps(10) - 50.0).abs() < 1e-9);

        let opts = meter.options().clone();
        let frame = opts.frame_color.to_u32();
        let script = opts.script_color.to_u32();
        let pixels = meter.draw().to_vec();
        // both tracks fit the default 0..34ms range and must be visible
        assert!(pixels.iter().any(|&px| px == frame));
        assert!(pixels.iter().any(|&px| px == script));
    }

    #[test]
    fn very_first_cycle_is_skipped() {
        let mut meter = meter([50, 50]);
        meter.on_cycle_start_at(0.0);
        meter.on_cycle_end_at(5.0);
        assert!(meter.samples().is_empty());
        assert!(!meter.fps(10).is_finite());
    }

    #[test]
    fn over_range_scenario_still_draws() {
        let mut meter = meter([50, 50]);
        drive(&mut meter, 40.0, 5.0, 10);

        let frame = meter.options().frame_color.to_u32();
        let script = meter.options().script_color.to_u32();
        let pixels = meter.draw().to_vec();
        // the 40ms wait track lies above the visible top edge, the 5ms work
        // track stays on-canvas
        assert!(!pixels.iter().any(|&px| px == frame));
        assert!(pixels.iter().any(|&px| px == script));
    }

    #[test]
    fn resize_affects_canvas_not_history() {
        let mut meter = meter([50, 50]);
        drive(&mut meter, 16.0, 4.0, 5);

        meter.resize([30, 20]);
        meter.draw();
        assert_eq!(meter.pixel_size(), [60, 40]);
        assert_eq!(meter.canvas().pixels().len(), 60 * 40);
        assert_eq!(meter.samples().capacity(), 100);
        assert_eq!(meter.samples().len(), 5);
    }

    #[test]
    fn extrema_are_exposed_read_only() {
        let mut meter = meter([50, 50]);
        drive(&mut meter, 20.0, 5.0, 3);
        let extrema = meter.extrema();
        assert_eq!(extrema.wait.unwrap().max, 20.0);
        assert_eq!(extrema.work.unwrap().min, 5.0);
    }
}
