use serde::{Deserialize, Serialize};

use crate::foundation::core::PremulRgba8;
use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::mul_div255_u8;

/// Straight-alpha RGBA8 color as written in options (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn parse_hex(s: &str) -> StampResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        fn byte(pair: &str) -> StampResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| StampError::invalid_option(format!("invalid hex byte \"{pair}\"")))
        }

        if !hex.is_ascii() {
            return Err(StampError::invalid_option(format!(
                "color \"{s}\" must be #RGB, #RRGGBB or #RRGGBBAA"
            )));
        }

        match hex.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in hex.chars().enumerate() {
                    let doubled: String = [ch, ch].iter().collect();
                    c[i] = byte(&doubled)?;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Ok(Self::rgb(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            8 => Ok(Self::rgba(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(StampError::invalid_option(format!(
                "color \"{s}\" must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    /// Same color with its alpha scaled by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let op = crate::foundation::math::unit_to_u8(opacity);
        Self {
            a: mul_div255_u8(u16::from(self.a), u16::from(op)),
            ..self
        }
    }

    pub fn to_premul(self) -> PremulRgba8 {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }

    /// `#rrggbb` form used in generated SVG; alpha travels separately as an opacity attribute.
    pub fn to_svg_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl std::str::FromStr for Color {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = StampError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        if c.a == 255 {
            c.to_svg_rgb()
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
