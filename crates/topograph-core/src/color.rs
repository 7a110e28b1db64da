//! Scene colors.
//!
//! Node fills, edge strokes and label colors are configured as CSS color
//! strings. [`Color`] parses them once through the `color` crate and renders
//! back to an SVG attribute value.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#d9534f"`, `"rgb(51, 122, 183)"`
    /// or `"steelblue"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph_core::color::Color;
    ///
    /// assert!(Color::new("#d9534f").is_ok());
    /// assert!(Color::new("steelblue").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Opacity between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
