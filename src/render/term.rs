use std::io::{self, Write};

use super::canvas::Canvas;

/// Write the canvas to a terminal, one colored block character per device
/// pixel.
///
/// Each row is cursor-addressed so the frame can be replayed in place, and
/// consecutive pixels of the same color share a single truecolor escape to
/// keep the per-frame write small. Raw mode, alternate screen and cursor
/// hiding are the host's responsibility.
pub fn present<W: Write>(canvas: &Canvas, out: &mut W) -> io::Result<()> {
    let (w, h) = (canvas.width(), canvas.height());
    let pixels = canvas.pixels();

    let mut frame = String::with_capacity(w * h * 4);
    let mut last_color: Option<u32> = None;

    for y in 0..h {
        frame.push_str(&format!("\x1B[{};1H", y + 1));
        for x in 0..w {
            let px = pixels[y * w + x];
            if last_color != Some(px) {
                frame.push_str(&ansi_fg(px));
                last_color = Some(px);
            }
            frame.push('█');
        }
    }
    frame.push_str("\x1B[0m");

    out.write_all(frame.as_bytes())?;
    out.flush()
}

fn ansi_fg(px: u32) -> String {
    format!(
        "\x1B[38;2;{};{};{}m",
        (px >> 16) & 0xFF,
        (px >> 8) & 0xFF,
        px & 0xFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;

    #[test]
    fn batches_color_runs() {
        let mut canvas = Canvas::new([4, 1]); // 8x2 device pixels
        canvas.fill_rect(0, 0, 8, 2, Color::RED);
        let mut out = Vec::new();
        present(&canvas, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // a uniform canvas needs exactly one color change
        assert_eq!(text.matches("\x1B[38;2;255;0;0m").count(), 1);
        assert_eq!(text.matches('█').count(), 16);
        assert!(text.ends_with("\x1B[0m"));
    }

    #[test]
    fn addresses_each_row() {
        let canvas = Canvas::new([2, 2]); // 4x4 device pixels
        let mut out = Vec::new();
        present(&canvas, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for row in 1..=4 {
            assert!(text.contains(&format!("\x1B[{row};1H")));
        }
    }
}
