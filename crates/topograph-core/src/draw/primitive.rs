//! Circles, lines and text labels.

use svg::node::{Text as SvgText, element as svg_element};

use crate::{apply_stroke, color::Color, draw::StrokeDefinition, geometry::Point};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Something that can be placed in a scene and rendered to SVG.
pub trait Drawable {
    fn render_to_svg(&self) -> SvgNode;

    /// Returns a copy scaled by `factor` about `origin`.
    ///
    /// Positions move away from (or toward) the origin and every size-like
    /// property (radius, stroke width, font size) is multiplied by `factor`.
    fn scale_about(&self, origin: Point, factor: f32) -> Self
    where
        Self: Sized;
}

/// A filled circle with an optional outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f32,
    fill: Color,
    stroke: Option<StrokeDefinition>,
}

impl Circle {
    pub fn new(center: Point, radius: f32, fill: Color) -> Self {
        Self {
            center,
            radius,
            fill,
            stroke: None,
        }
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns true if `point` lies inside the circle or on its edge.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

impl Drawable for Circle {
    fn render_to_svg(&self) -> SvgNode {
        let circle = svg_element::Circle::new()
            .set("cx", self.center.x())
            .set("cy", self.center.y())
            .set("r", self.radius)
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha());

        match &self.stroke {
            Some(stroke) => Box::new(apply_stroke!(circle, stroke)),
            None => Box::new(circle),
        }
    }

    fn scale_about(&self, origin: Point, factor: f32) -> Self {
        Self {
            center: self.center.scale_about(origin, factor),
            radius: self.radius * factor,
            fill: self.fill,
            stroke: self.stroke.clone().map(|stroke| stroke.scaled(factor)),
        }
    }
}

/// A straight segment between two node centers.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
}

impl Line {
    pub fn new(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self { from, to, stroke }
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

impl Drawable for Line {
    fn render_to_svg(&self) -> SvgNode {
        let line = svg_element::Line::new()
            .set("x1", self.from.x())
            .set("y1", self.from.y())
            .set("x2", self.to.x())
            .set("y2", self.to.y());
        Box::new(apply_stroke!(line, &self.stroke))
    }

    fn scale_about(&self, origin: Point, factor: f32) -> Self {
        Self {
            from: self.from.scale_about(origin, factor),
            to: self.to.scale_about(origin, factor),
            stroke: self.stroke.clone().scaled(factor),
        }
    }
}

/// A single line of text centered on its position, both horizontally and
/// vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    position: Point,
    text: String,
    font_size: f32,
    color: Color,
    bold: bool,
}

impl Label {
    pub fn new(position: Point, text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            position,
            text: text.into(),
            font_size,
            color,
            bold: false,
        }
    }

    /// Renders the label in a bold weight (builder style).
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Drawable for Label {
    fn render_to_svg(&self) -> SvgNode {
        let mut text = svg_element::Text::new("")
            .set("x", self.position.x())
            .set("y", self.position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", self.font_size)
            .set("fill", &self.color)
            .set("fill-opacity", self.color.alpha());

        if self.bold {
            text = text.set("font-weight", "bold");
        }

        Box::new(text.add(SvgText::new(self.text.as_str())))
    }

    fn scale_about(&self, origin: Point, factor: f32) -> Self {
        Self {
            position: self.position.scale_about(origin, factor),
            font_size: self.font_size * factor,
            text: self.text.clone(),
            ..*self
        }
    }
}

/// Any primitive a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle(Circle),
    Line(Line),
    Label(Label),
}

impl Drawable for Primitive {
    fn render_to_svg(&self) -> SvgNode {
        match self {
            Self::Circle(circle) => circle.render_to_svg(),
            Self::Line(line) => line.render_to_svg(),
            Self::Label(label) => label.render_to_svg(),
        }
    }

    fn scale_about(&self, origin: Point, factor: f32) -> Self {
        match self {
            Self::Circle(circle) => Self::Circle(circle.scale_about(origin, factor)),
            Self::Line(line) => Self::Line(line.scale_about(origin, factor)),
            Self::Label(label) => Self::Label(label.scale_about(origin, factor)),
        }
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Label> for Primitive {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}
