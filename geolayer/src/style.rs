//! Visual style of a [`GeoJsonLayer`](crate::layer::GeoJsonLayer).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Color;

/// Outline color used when a style does not set one.
pub const DEFAULT_STROKE_COLOR: Color = Color::BLACK;
/// Fill color used when a style does not set one: half-transparent blue.
pub const DEFAULT_FILL_COLOR: Color = Color::from_hex("#0000FF80");
/// Outline width in pixels used when a style does not set one.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Style applied to all features of a layer.
///
/// Every field is optional. Unset fields resolve to the `DEFAULT_*` constants of this module, so
/// a style deserialized from `{}` draws the same as [`Style::default`].
///
/// Stroke width must be finite and not negative. Zero width means no outline. Setters ignore
/// invalid widths, and deserialization rejects them.
///
/// ```
/// use geolayer::{Color, Style};
///
/// let style = Style::default()
///     .with_stroke_color(Color::GREEN)
///     .with_fill_color(Color::ORANGE);
/// assert_eq!(style.stroke_width(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    stroke_color: Option<Color>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    fill_color: Option<Color>,
    #[cfg_attr(
        feature = "serde",
        serde(
            skip_serializing_if = "Option::is_none",
            deserialize_with = "deserialize_stroke_width"
        )
    )]
    stroke_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    stroke_dashed: Option<bool>,
}

impl Style {
    /// Creates a new instance from a copy of the current, but with the given stroke color.
    pub fn with_stroke_color(&self, stroke_color: Color) -> Self {
        Self {
            stroke_color: Some(stroke_color),
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given fill color.
    pub fn with_fill_color(&self, fill_color: Color) -> Self {
        Self {
            fill_color: Some(fill_color),
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given stroke width.
    ///
    /// A negative or non-finite width is ignored and the current width is kept.
    pub fn with_stroke_width(&self, stroke_width: f64) -> Self {
        if !is_valid_stroke_width(stroke_width) {
            log::warn!("Ignoring invalid stroke width {stroke_width}");
            return *self;
        }

        Self {
            stroke_width: Some(stroke_width),
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with dashed or solid outline.
    pub fn with_stroke_dashed(&self, stroke_dashed: bool) -> Self {
        Self {
            stroke_dashed: Some(stroke_dashed),
            ..*self
        }
    }

    /// Sets the stroke color. `None` resets it to the default.
    pub fn set_stroke_color(&mut self, stroke_color: Option<Color>) {
        self.stroke_color = stroke_color;
    }

    /// Sets the fill color. `None` resets it to the default.
    pub fn set_fill_color(&mut self, fill_color: Option<Color>) {
        self.fill_color = fill_color;
    }

    /// Sets the stroke width. `None` resets it to the default.
    ///
    /// A negative or non-finite width is ignored and the current width is kept.
    pub fn set_stroke_width(&mut self, stroke_width: Option<f64>) {
        match stroke_width {
            Some(width) if !is_valid_stroke_width(width) => {
                log::warn!("Ignoring invalid stroke width {width}");
            }
            _ => self.stroke_width = stroke_width,
        }
    }

    /// Sets whether the outline is dashed. `None` resets it to the default.
    pub fn set_stroke_dashed(&mut self, stroke_dashed: Option<bool>) {
        self.stroke_dashed = stroke_dashed;
    }

    /// Color of lines and polygon outlines.
    pub fn stroke_color(&self) -> Color {
        self.stroke_color.unwrap_or(DEFAULT_STROKE_COLOR)
    }

    /// Color of the inner area of polygons.
    pub fn fill_color(&self) -> Color {
        self.fill_color.unwrap_or(DEFAULT_FILL_COLOR)
    }

    /// Width of lines and polygon outlines in pixels.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Whether lines and outlines are dashed.
    pub fn stroke_dashed(&self) -> bool {
        self.stroke_dashed.unwrap_or(false)
    }

    /// Returns true if no field is set explicitly.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn is_valid_stroke_width(width: f64) -> bool {
    width.is_finite() && width >= 0.0
}

#[cfg(feature = "serde")]
fn deserialize_stroke_width<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(width) if !is_valid_stroke_width(width) => Err(serde::de::Error::custom(format!(
            "stroke width must be a finite non-negative number, got {width}"
        ))),
        width => Ok(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let style = Style::default();
        assert_eq!(style.stroke_color(), Color::BLACK);
        assert_eq!(style.fill_color(), Color::rgba(0, 0, 255, 128));
        assert_eq!(style.stroke_width(), 1.0);
        assert!(!style.stroke_dashed());
        assert!(style.is_default());
    }

    #[test]
    fn set_and_reset() {
        let mut style = Style::default()
            .with_stroke_width(3.5)
            .with_stroke_dashed(true);
        assert_eq!(style.stroke_width(), 3.5);
        assert!(style.stroke_dashed());
        assert_eq!(style.fill_color(), DEFAULT_FILL_COLOR);

        style.set_stroke_width(None);
        style.set_stroke_dashed(None);
        assert!(style.is_default());

        style.set_fill_color(Some(Color::RED));
        assert_eq!(style.fill_color(), Color::RED);
    }

    #[test]
    fn invalid_stroke_width_is_ignored() {
        let style = Style::default().with_stroke_width(2.0);
        for width in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(style.with_stroke_width(width).stroke_width(), 2.0);

            let mut changed = style;
            changed.set_stroke_width(Some(width));
            assert_eq!(changed.stroke_width(), 2.0);
        }

        assert!(Style::default().with_stroke_width(-0.5).is_default());
        assert_eq!(style.with_stroke_width(0.0).stroke_width(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn negative_stroke_width_is_not_deserialized() {
        assert!(serde_json::from_str::<Style>(r#"{"stroke_width": -2}"#).is_err());
        assert_eq!(
            serde_json::from_str::<Style>(r#"{"stroke_width": 0}"#)
                .unwrap()
                .stroke_width(),
            0.0
        );
        assert!(serde_json::from_str::<Style>(r#"{"stroke_width": null}"#)
            .unwrap()
            .is_default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_skips_unset_fields() {
        let style = Style::default().with_fill_color(Color::ORANGE);
        assert_eq!(
            serde_json::to_string(&style).unwrap(),
            r##"{"fill_color":"#FFA500FF"}"##
        );

        let parsed: Style =
            serde_json::from_str(r##"{"stroke_color": "#00FF00", "stroke_width": 2}"##).unwrap();
        assert_eq!(parsed.stroke_color(), Color::GREEN);
        assert_eq!(parsed.stroke_width(), 2.0);
        assert_eq!(parsed.fill_color(), DEFAULT_FILL_COLOR);
    }
}
