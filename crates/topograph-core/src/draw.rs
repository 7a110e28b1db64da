//! Drawable primitives for topology scenes.
//!
//! A scene is a flat list of primitives in paint order. Each primitive knows
//! how to scale itself about a fixed origin (zoom) and how to render itself
//! as an SVG node.

mod primitive;
mod stroke;

pub use primitive::{Circle, Drawable, Label, Line, Primitive, SvgNode};
pub use stroke::StrokeDefinition;
