use std::path::PathBuf;

use crate::core::color::Color;
use crate::core::sample::Millis;

/// Readout text configuration. The crate ships no font of its own; point
/// `path` at a TTF/OTF on the host to enable the FPS number, exactly like
/// the rest of the widget borrows its drawing surface from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub path: Option<PathBuf>,
    /// Rasterization size in device pixels.
    pub px: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { path: None, px: 28.0 }
    }
}

/// The widget's recognized configuration surface.
///
/// `size` is in logical units; the backing canvas renders at twice that for
/// crispness and the sample history holds `2 * size[0]` entries, one per
/// device column.
#[derive(Debug, Clone, PartialEq)]
pub struct LagometerOptions {
    pub size: [usize; 2],
    /// Lower edge of the plotted range, in milliseconds.
    pub min: Millis,
    /// Upper edge of the plotted range. Values beyond it draw off-canvas
    /// instead of clamping, which makes overload visually obvious.
    pub max: Millis,
    pub background_color: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub font: FontSpec,
    /// Wait-duration track color.
    pub frame_color: Color,
    /// Work-duration track color.
    pub script_color: Color,
}

impl Default for LagometerOptions {
    fn default() -> Self {
        Self {
            size: [100, 100],
            min: 0.0,
            max: 34.0,
            background_color: Color::from_rgba(200.0 / 255.0, 0.0, 0.0, 0.8),
            border_color: Color::from_rgba(1.0, 0.0, 0.0, 0.8),
            text_color: Color::from_rgba(1.0, 1.0, 1.0, 0.8),
            font: FontSpec::default(),
            frame_color: Color::GREEN,
            script_color: Color::from_hex("#BBBBFF").unwrap_or(Color::WHITE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let opts = LagometerOptions::default();
        assert_eq!(opts.size, [100, 100]);
        assert_eq!(opts.min, 0.0);
        assert_eq!(opts.max, 34.0);
        assert_eq!(opts.frame_color, Color::GREEN);
        assert!(opts.font.path.is_none());
        assert_eq!(opts.font.px, 28.0);
    }
}
