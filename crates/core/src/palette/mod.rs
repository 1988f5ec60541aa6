use serde::{Deserialize, Serialize};

use crate::{MotifError, Result};

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(MotifError::msg(format!("malformed hex color `{hex}`")));
        }

        let channel = |i: usize| -> Result<f32> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| MotifError::msg(format!("malformed hex color `{hex}`")))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Moves each color channel `amount` of the way towards white.
    pub fn lightened(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * amount,
            g: self.g + (1.0 - self.g) * amount,
            b: self.b + (1.0 - self.b) * amount,
            a: self.a,
        }
    }
}

// Builds compile-time colors from 0xRRGGBB literals.
const fn hex(value: u32) -> Color {
    Color::rgb(
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    )
}

/// Colors used by one hexagon-based motif family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternColors {
    pub hex_outline: Color,
    pub hex_fill: Color,
    pub accent: Color,
    pub inner_circle: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub dark_green: Color,
    pub medium_green: Color,
    pub cream: Color,
    pub light_orange: Color,
    pub dark_orange: Color,
    pub line: Color,
    pub eye: PatternColors,
    pub cross: PatternColors,
    swapped: bool,
}

impl Default for Palette {
    fn default() -> Self {
        let dark_green = hex(0x283618);
        let medium_green = hex(0x606C38);
        let cream = hex(0xFEFAE0);
        let light_orange = hex(0xDDA15E);
        let dark_orange = hex(0xBC6C25);

        Self {
            dark_green,
            medium_green,
            cream,
            light_orange,
            dark_orange,
            line: Color::WHITE,
            eye: PatternColors {
                hex_outline: dark_green,
                hex_fill: medium_green,
                accent: cream,
                inner_circle: dark_orange,
            },
            cross: PatternColors {
                hex_outline: dark_orange,
                hex_fill: light_orange,
                accent: cream,
                inner_circle: dark_green,
            },
            swapped: false,
        }
    }
}

impl Palette {
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Exchanges the eye and cross color roles. Idempotent.
    pub fn swap_eye_cross(&mut self) {
        if !self.swapped {
            std::mem::swap(&mut self.eye, &mut self.cross);
            self.swapped = true;
        }
    }

    /// Restores the original eye and cross color roles. Idempotent.
    pub fn reset(&mut self) {
        if self.swapped {
            std::mem::swap(&mut self.eye, &mut self.cross);
            self.swapped = false;
        }
    }

    pub fn set_swapped(&mut self, swapped: bool) {
        if swapped {
            self.swap_eye_cross();
        } else {
            self.reset();
        }
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line = color;
    }
}

/// Fixed colors of the kolintang instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KolintangColors {
    pub base: Color,
    pub outline: Color,
    pub bar: Color,
    pub handle: Color,
    pub head: Color,
    pub hole: Color,
}

impl Default for KolintangColors {
    fn default() -> Self {
        let wood = hex(0x513822);
        Self {
            base: wood,
            outline: wood,
            bar: hex(0xD19453),
            handle: wood,
            head: hex(0x8F7300),
            hole: wood,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        let c = Color::from_hex("#513822").unwrap();
        assert!(approx(c.r, 0x51 as f32 / 255.0));
        assert!(approx(c.g, 0x38 as f32 / 255.0));
        assert!(approx(c.b, 0x22 as f32 / 255.0));
        assert_eq!(c.a, 1.0);

        let c = Color::from_hex("00000080").unwrap();
        assert!(approx(c.a, 128.0 / 255.0));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn const_hex_matches_parser() {
        assert_eq!(hex(0xD19453), Color::from_hex("D19453").unwrap());
    }

    #[test]
    fn lightened_moves_towards_white() {
        let c = Color::rgb(0.5, 0.0, 1.0).lightened(0.5);
        assert!(approx(c.r, 0.75));
        assert!(approx(c.g, 0.5));
        assert!(approx(c.b, 1.0));
    }

    #[test]
    fn swap_and_reset_are_idempotent() {
        let original = Palette::default();
        let mut palette = original.clone();

        palette.swap_eye_cross();
        palette.swap_eye_cross();
        assert_eq!(palette.eye, original.cross);
        assert_eq!(palette.cross, original.eye);

        palette.reset();
        palette.reset();
        assert_eq!(palette, original);
    }
}
