pub mod color;
pub mod fps;
pub mod ring;
pub mod sample;
pub mod timer;

pub use color::Color;
pub use ring::SampleRing;
pub use sample::{Millis, Sample};
pub use timer::FrameTimer;
