//! Stroke definitions for edges and node outlines.
//!
//! | Field   | SVG attribute              |
//! |---------|----------------------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width`             |

use crate::color::Color;

/// A solid stroke.
///
/// # Examples
///
/// ```
/// use topograph_core::{color::Color, draw::StrokeDefinition};
///
/// let stroke = StrokeDefinition::solid(Color::new("gray").unwrap(), 1.5);
/// assert_eq!(stroke.scaled(2.0).width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns this stroke with its width multiplied by `factor`.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.width *= factor;
        self
    }
}

/// Sets the stroke attributes of `$stroke` on an SVG element.
///
/// ```
/// use svg::node::element as svg_element;
/// use topograph_core::{color::Color, draw::StrokeDefinition};
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = topograph_core::apply_stroke!(svg_element::Line::new(), &stroke);
/// assert!(line.to_string().contains(r#"stroke-width="2""#));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
    };
}
