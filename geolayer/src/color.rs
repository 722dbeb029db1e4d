//! RGBA colors used in layer styles.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8-bit RGBA color.
///
/// Serialized as a `#RRGGBBAA` string. Both `#RRGGBB` and `#RRGGBBAA` forms are accepted when
/// parsing; the short form is fully opaque.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// String is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color \"{0}\": expected #RRGGBB or #RRGGBBAA")]
pub struct ColorParseError(String);

impl Color {
    /// Fully transparent: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// `#FF0000FF`
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// `#00FF00FF`
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    /// `#0000FFFF`
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// `#FFA500FF`
    pub const ORANGE: Color = Color::rgba(255, 165, 0, 255);
    /// `#AAAAAAFF`
    pub const GRAY: Color = Color::rgba(170, 170, 170, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_u8_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Formats the color as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`, case-insensitive. Returns `None` for anything else.
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let a = if digits.len() == 8 { channel(6)? } else { 255 };

        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Const version of [`Color::try_from_hex`] for color constants.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid hex color.
    pub const fn from_hex(hex: &'static str) -> Self {
        let bytes = hex.as_bytes();
        if bytes.len() != 7 && bytes.len() != 9 || bytes[0] != b'#' {
            panic!("color hex string must be #RRGGBB or #RRGGBBAA");
        }

        let a = if bytes.len() == 9 {
            hex_byte(bytes[7], bytes[8])
        } else {
            255
        };

        Self::rgba(
            hex_byte(bytes[1], bytes[2]),
            hex_byte(bytes[3], bytes[4]),
            hex_byte(bytes[5], bytes[6]),
            a,
        )
    }

    /// Copy of the color with the given opacity.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Whether `a == 0`.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Red channel.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity channel.
    pub fn a(&self) -> u8 {
        self.a
    }
}

const fn hex_byte(high: u8, low: u8) -> u8 {
    hex_digit(high) * 16 + hex_digit(low)
}

const fn hex_digit(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("invalid hex digit in color string"),
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(s).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn hex_round_trip() {
        let hex = "#FF1000AA";
        let color = Color::try_from_hex(hex).unwrap();
        assert_eq!(&color.to_hex(), hex);
        assert_eq!(Color::from_hex(hex), color);
    }

    #[test]
    fn short_hex_is_opaque() {
        assert_eq!(Color::try_from_hex("#ffa500"), Some(Color::ORANGE));
        assert_eq!(Color::from_hex("#00FF00"), Color::GREEN);
    }

    #[test]
    fn invalid_hex() {
        assert_eq!(Color::try_from_hex("FFA500"), None);
        assert_eq!(Color::try_from_hex("#FFA50"), None);
        assert_eq!(Color::try_from_hex("#GGA500"), None);
        assert_eq!(Color::try_from_hex("#FFé500"), None);
        assert_matches!("blue".parse::<Color>(), Err(ColorParseError(s)) if s == "blue");
    }

    #[test]
    fn alpha() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert_eq!(Color::BLUE.with_alpha(128).to_u8_array(), [0, 0, 255, 128]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&Color::ORANGE).unwrap(),
            "\"#FFA500FF\""
        );
        assert_eq!(
            serde_json::from_str::<Color>("\"#00ff00\"").unwrap(),
            Color::GREEN
        );
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }
}
