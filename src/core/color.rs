/// RGB color with components in the 0.0 - 1.0 range.
///
/// The canvas stores opaque pixels, so translucent option values blend their
/// alpha channel into the components at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from RGBA components by blending the alpha channel into
    /// RGB. Alpha should be in the range 0.0 - 1.0.
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r * a, g * a, b * a)
    }

    /// Parse a hexadecimal string like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }

        let channel = |range: std::ops::Range<usize>, err| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| err)
        };
        Ok(Self::new(
            channel(0..2, "Invalid red component in hex")?,
            channel(2..4, "Invalid green component in hex")?,
            channel(4..6, "Invalid blue component in hex")?,
        ))
    }

    /// Pack into the 0x00RRGGBB layout minifb buffers use.
    pub fn to_u32(&self) -> u32 {
        let r = (self.r * 255.0) as u32;
        let g = (self.g * 255.0) as u32;
        let b = (self.b * 255.0) as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: (self.r * 255.0) as u8,
            g: (self.g * 255.0) as u8,
            b: (self.b * 255.0) as u8,
        }
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let c = Color::from_hex("#00FF00").unwrap();
        assert_eq!(c, Color::GREEN);
        assert_eq!(Color::from_hex("BBBBFF").unwrap().to_u32(), 0x00BBBBFF);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#F00").is_err());
        assert!(Color::from_hex("GGGGGG").is_err());
    }

    #[test]
    fn alpha_is_premultiplied() {
        let c = Color::from_rgba(1.0, 0.0, 0.0, 0.8);
        assert!((c.r - 0.8).abs() < 1e-6);
        assert_eq!(c.to_u32(), 0x00CC0000);
    }

    #[test]
    fn packs_channels_in_minifb_order() {
        assert_eq!(Color::new(1.0, 0.0, 0.0).to_u32(), 0x00FF0000);
        assert_eq!(Color::new(0.0, 0.0, 1.0).to_u32(), 0x000000FF);
    }
}
