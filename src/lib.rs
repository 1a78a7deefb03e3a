//! Render-loop lag visualizer.
//!
//! Feed the widget two notifications per frame ("about to render", then
//! "finished rendering") and call [`Lagometer::draw`] from your paint pass:
//! it keeps a bounded circular history of per-frame wait/work timings,
//! derives a windowed FPS estimate, and repaints them as two overlaid
//! polylines with a numeric readout on its own pixel canvas.
//!
//! The core never blocks and performs no I/O; presentation (minifb window,
//! terminal, PNG) is the host's job and the demo binary shows all three.

use clap::{Arg, Command};

pub mod core;
pub mod options;
pub mod render;
pub mod widget;

pub use crate::core::color::Color;
pub use crate::core::fps::{windowed_fps, FPS_WINDOW};
pub use crate::core::ring::SampleRing;
pub use crate::core::sample::{Millis, Sample};
pub use crate::core::timer::{Extent, FrameTimer, TimingExtrema};
pub use options::{FontSpec, LagometerOptions};
pub use widget::Lagometer;

/// Where the demo binary puts the widget on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Window,
    Terminal,
}

pub fn create_clap_command() -> Command {
    Command::new("lagometer")
        .about("Render-loop lag visualizer demo")
        .version("0.1")
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Where to show the widget ('window', 'terminal', 'w' or 't')")
                .value_parser(["window", "terminal", "w", "t"])
                .default_value("window"),
        )
        .arg(
            Arg::new("width")
                .short('W')
                .long("width")
                .value_name("UNITS")
                .help("Logical widget width; sample history holds twice this many frames")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("height")
                .short('H')
                .long("height")
                .value_name("UNITS")
                .help("Logical widget height")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .value_name("MS")
                .help("Upper edge of the plotted range in milliseconds")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .value_name("FILE")
                .help("TTF/OTF font used for the FPS readout (omitted: no readout)"),
        )
        .arg(
            Arg::new("screenshot")
                .long("screenshot")
                .value_name("FILE")
                .help("Render a simulated session headless and write a PNG here"),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_name("N")
                .help("Number of simulated cycles for --screenshot")
                .default_value("120")
                .value_parser(clap::value_parser!(u32)),
        )
}
