//! Scene rendering.
//!
//! A [`Scene`] is the drawable form of a layout: a flat, paint-ordered list
//! of [`Primitive`]s plus the hit regions a host needs to map pointer clicks
//! back to CIs. Rendering is pure; the renderer never looks at anything but
//! its inputs.

use topograph_core::{
    color::Color,
    draw::{Circle, Drawable, Label, Line, Primitive, StrokeDefinition},
    geometry::{Point, Size},
};

use crate::{
    config::AppConfig,
    error::TopographError,
    layout::{FocalResolution, GraphLayout},
    model::{CiId, Level, PositionedNode},
    session::{LoadPhase, Session},
};

const FOCAL_RADIUS: f32 = 30.0;
const NEIGHBOR_RADIUS: f32 = 22.0;
const OUTER_RADIUS: f32 = 16.0;

const NODE_OUTLINE_WIDTH: f32 = 2.0;
const EDGE_WIDTH: f32 = 1.5;

const NAME_FONT_SIZE: f32 = 12.0;
const EDGE_FONT_SIZE: f32 = 10.0;
const NOTICE_FONT_SIZE: f32 = 14.0;
const PLACEHOLDER_FONT_SIZE: f32 = 16.0;

/// Gap between a node's circle and its name label.
const NAME_GAP: f32 = 12.0;

/// Longest node name rendered without truncation, in characters.
pub const MAX_NAME_CHARS: usize = 24;

/// Message shown instead of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// A request is in flight.
    Loading,
    /// The provider answered with no configuration items.
    Empty,
    /// The provider failed.
    NoData,
}

impl Placeholder {
    /// Short machine-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::NoData => "no-data",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Loading => "Loading topology…",
            Self::Empty => "No configuration items",
            Self::NoData => "No topology data available",
        }
    }
}

/// Clickable area of a rendered node.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    id: CiId,
    circle: Circle,
}

impl HitRegion {
    pub fn id(&self) -> CiId {
        self.id
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }
}

/// A rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    size: Size,
    background: Option<Color>,
    primitives: Vec<Primitive>,
    hit_regions: Vec<HitRegion>,
    placeholder: Option<Placeholder>,
}

impl Scene {
    fn new(size: Size, background: Option<Color>) -> Self {
        Self {
            size,
            background,
            primitives: Vec::new(),
            hit_regions: Vec::new(),
            placeholder: None,
        }
    }

    /// Canvas size the scene was rendered for.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Node hit regions in paint order.
    pub fn hit_regions(&self) -> &[HitRegion] {
        &self.hit_regions
    }

    /// The placeholder shown, if the scene is not a graph.
    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    /// True when there is nothing to draw.
    pub fn is_blank(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Returns the CI whose node contains `point`, topmost first.
    pub fn node_at(&self, point: Point) -> Option<CiId> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.circle.contains(point))
            .map(|region| region.id)
    }

    fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }
}

/// Resolved colors for a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    background: Option<Color>,
    focal: Color,
    neighbor: Color,
    outer: Color,
    edge: Color,
    label: Color,
    /// Node outlines and type glyphs; the background color, or white.
    contrast: Color,
}

impl SceneStyle {
    /// Parses the style section of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if a color string is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, TopographError> {
        let style = config.style();
        let background = style.background_color().map_err(TopographError::Config)?;
        let contrast = match background {
            Some(color) => color,
            None => Color::new("white").map_err(TopographError::Config)?,
        };
        Ok(Self {
            background,
            focal: style.focal_color().map_err(TopographError::Config)?,
            neighbor: style.neighbor_color().map_err(TopographError::Config)?,
            outer: style.outer_color().map_err(TopographError::Config)?,
            edge: style.edge_color().map_err(TopographError::Config)?,
            label: style.label_color().map_err(TopographError::Config)?,
            contrast,
        })
    }

    fn node_fill(&self, level: Level) -> Color {
        match level {
            Level::Focal => self.focal,
            Level::Neighbor => self.neighbor,
            Level::Outer => self.outer,
        }
    }
}

/// Turns layouts and session phases into scenes.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    canvas: Size,
    style: SceneStyle,
}

impl SceneRenderer {
    pub fn new(canvas: Size, style: SceneStyle) -> Self {
        Self { canvas, style }
    }

    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if a color string is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, TopographError> {
        Ok(Self::new(
            config.layout().canvas_size(),
            SceneStyle::from_config(config)?,
        ))
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Renders whatever the session's current phase calls for.
    pub fn render_session(&self, session: &Session) -> Scene {
        match session.phase() {
            LoadPhase::Idle => self.render_blank(),
            LoadPhase::Loading => self.render_placeholder(Placeholder::Loading),
            LoadPhase::Ready(layout) => self.render(layout, session.zoom_scale()),
            LoadPhase::Error(_) => self.render_placeholder(Placeholder::NoData),
        }
    }

    /// Renders a layout scaled by `zoom` about the canvas center.
    ///
    /// An empty layout renders the [`Placeholder::Empty`] scene.
    pub fn render(&self, layout: &GraphLayout, zoom: f32) -> Scene {
        if layout.is_empty() {
            return self.render_placeholder(Placeholder::Empty);
        }

        let center = self.canvas.center();
        let mut scene = Scene::new(self.canvas, self.style.background);

        for edge in layout.edges() {
            let Some((source, target)) = layout.endpoints(edge) else {
                continue;
            };
            let line = Line::new(
                source.position(),
                target.position(),
                StrokeDefinition::solid(self.style.edge, EDGE_WIDTH),
            );
            let caption = Label::new(
                line.midpoint(),
                edge.relation_type(),
                EDGE_FONT_SIZE,
                self.style.edge,
            );
            scene.push(line.scale_about(center, zoom));
            scene.push(caption.scale_about(center, zoom));
        }

        for node in layout.nodes() {
            let circle = self.node_circle(node).scale_about(center, zoom);
            let radius = node_radius(node.level());

            let glyph = Label::new(
                node.position(),
                type_glyph(node.source().type_label()),
                radius * 0.8,
                self.style.contrast,
            )
            .bold();

            let name = Label::new(
                Point::new(node.x(), node.y() + radius + NAME_GAP),
                truncate_name(node.source().name()),
                NAME_FONT_SIZE,
                self.style.label,
            );

            scene.push(circle.clone());
            scene.push(glyph.scale_about(center, zoom));
            scene.push(name.scale_about(center, zoom));
            scene.hit_regions.push(HitRegion {
                id: node.id(),
                circle,
            });
        }

        if let FocalResolution::Missing { requested } = layout.resolution() {
            let fallback = layout
                .focal()
                .map(|node| node.source().name().to_string())
                .unwrap_or_default();
            scene.push(
                Label::new(
                    Point::new(center.x(), NOTICE_FONT_SIZE * 2.0),
                    format!("CI {requested} is not in this topology; centered on {fallback}"),
                    NOTICE_FONT_SIZE,
                    self.style.label,
                )
                .bold(),
            );
        }

        scene
    }

    /// A scene showing only a centered message.
    pub fn render_placeholder(&self, placeholder: Placeholder) -> Scene {
        let mut scene = Scene::new(self.canvas, self.style.background);
        scene.push(Label::new(
            self.canvas.center(),
            placeholder.message(),
            PLACEHOLDER_FONT_SIZE,
            self.style.label,
        ));
        scene.placeholder = Some(placeholder);
        scene
    }

    /// A scene with nothing but the background.
    pub fn render_blank(&self) -> Scene {
        Scene::new(self.canvas, self.style.background)
    }

    fn node_circle(&self, node: &PositionedNode) -> Circle {
        Circle::new(
            node.position(),
            node_radius(node.level()),
            self.style.node_fill(node.level()),
        )
        .with_stroke(StrokeDefinition::solid(
            self.style.contrast,
            NODE_OUTLINE_WIDTH,
        ))
    }
}

fn node_radius(level: Level) -> f32 {
    match level {
        Level::Focal => FOCAL_RADIUS,
        Level::Neighbor => NEIGHBOR_RADIUS,
        Level::Outer => OUTER_RADIUS,
    }
}

/// One-character badge for a CI type: its first alphanumeric character,
/// uppercased, or `?`.
pub fn type_glyph(type_label: &str) -> String {
    type_label
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .unwrap_or('?')
        .to_string()
}

/// Shortens `name` to at most [`MAX_NAME_CHARS`] characters, ending in `…`
/// when cut.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_NAME_CHARS - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::{LayoutConfig, ViewConfig},
        layout::RingLayout,
        model::{RawEdge, RawNode},
        provider::topology,
    };

    fn renderer() -> SceneRenderer {
        SceneRenderer::from_config(&AppConfig::default()).unwrap()
    }

    fn sample_layout() -> GraphLayout {
        let nodes = vec![
            RawNode::new(1, "app-server-01", "Server"),
            RawNode::new(2, "orders-db", "database"),
            RawNode::new(3, "edge-proxy", "Load Balancer"),
        ];
        let edges = vec![RawEdge::new(1, 2, "depends_on")];
        RingLayout::from_config(&LayoutConfig::default()).layout(&nodes, &edges, Some(1.into()))
    }

    fn labels(scene: &Scene) -> Vec<&str> {
        scene
            .primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Label(label) => Some(label.text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_edges_painted_before_nodes() {
        let scene = renderer().render(&sample_layout(), 1.0);

        // One line and caption per edge, one circle, glyph and name per node.
        assert_eq!(scene.primitives().len(), 2 + 3 * 3);
        assert!(matches!(scene.primitives()[0], Primitive::Line(_)));
        assert!(matches!(scene.primitives()[1], Primitive::Label(_)));
        assert!(matches!(scene.primitives()[2], Primitive::Circle(_)));
        assert_eq!(scene.hit_regions().len(), 3);
        assert_eq!(scene.placeholder(), None);
    }

    #[test]
    fn test_labels_and_glyphs() {
        let scene = renderer().render(&sample_layout(), 1.0);
        let texts = labels(&scene);

        assert!(texts.contains(&"depends_on"));
        assert!(texts.contains(&"app-server-01"));
        assert!(texts.contains(&"S"));
        assert!(texts.contains(&"D"));
        assert!(texts.contains(&"L"));
    }

    #[test]
    fn test_node_sizes_follow_level() {
        let scene = renderer().render(&sample_layout(), 1.0);
        let radii: Vec<f32> = scene
            .hit_regions()
            .iter()
            .map(|region| region.circle().radius())
            .collect();
        assert_eq!(radii, vec![FOCAL_RADIUS, NEIGHBOR_RADIUS, OUTER_RADIUS]);
    }

    #[test]
    fn test_zoom_scales_about_canvas_center() {
        let scene = renderer().render(&sample_layout(), 2.0);
        let center = Point::new(400.0, 400.0);

        let neighbor = scene.hit_regions()[1].circle();
        assert_approx_eq!(f32, neighbor.center().distance(center), 300.0, epsilon = 0.01);
        assert_approx_eq!(f32, neighbor.radius(), NEIGHBOR_RADIUS * 2.0);

        let focal = scene.hit_regions()[0].circle();
        assert_eq!(focal.center(), center);
    }

    #[test]
    fn test_node_at_uses_scaled_regions() {
        let renderer = renderer();
        let layout = sample_layout();

        let scene = renderer.render(&layout, 1.0);
        assert_eq!(scene.node_at(Point::new(405.0, 400.0)), Some(CiId::new(1)));
        assert_eq!(scene.node_at(Point::new(550.0, 410.0)), Some(CiId::new(2)));
        assert_eq!(scene.node_at(Point::new(10.0, 10.0)), None);

        // At half zoom the neighbor moves to 75 units from the center.
        let scene = renderer.render(&layout, 0.5);
        assert_eq!(scene.node_at(Point::new(550.0, 400.0)), None);
        assert_eq!(scene.node_at(Point::new(475.0, 400.0)), Some(CiId::new(2)));
    }

    #[test]
    fn test_node_at_prefers_topmost() {
        let nodes = vec![RawNode::new(1, "a", "x"), RawNode::new(2, "b", "x")];
        // Tiny rings make the two circles overlap.
        let layout = RingLayout::new(Point::new(400.0, 400.0), 5.0, 5.0).layout(&nodes, &[], None);
        let scene = renderer().render(&layout, 1.0);
        assert_eq!(scene.node_at(Point::new(400.0, 400.0)), Some(CiId::new(2)));
    }

    #[test]
    fn test_empty_layout_renders_empty_placeholder() {
        let layout = RingLayout::from_config(&LayoutConfig::default()).layout(&[], &[], None);
        let scene = renderer().render(&layout, 1.0);
        assert_eq!(scene.placeholder(), Some(Placeholder::Empty));
        assert_eq!(labels(&scene), vec!["No configuration items"]);
        assert!(scene.hit_regions().is_empty());
    }

    #[test]
    fn test_degraded_focus_notice() {
        let nodes = vec![RawNode::new(3, "fallback-node", "Server")];
        let layout = RingLayout::from_config(&LayoutConfig::default()).layout(&nodes, &[], Some(42.into()));
        let scene = renderer().render(&layout, 1.0);

        assert!(
            labels(&scene)
                .iter()
                .any(|text| text.contains("CI 42") && text.contains("fallback-node"))
        );
    }

    #[test]
    fn test_render_session_phases() {
        let renderer = renderer();
        let mut session = Session::new(&ViewConfig::default());
        assert!(renderer.render_session(&session).is_blank());

        let ticket = session.begin_load(Some(1.into()));
        assert_eq!(
            renderer.render_session(&session).placeholder(),
            Some(Placeholder::Loading)
        );

        session.resolve(
            &ticket,
            Ok(topology(&[1, 2], &[(1, 2)])),
            &RingLayout::from_config(&LayoutConfig::default()),
        );
        let scene = renderer.render_session(&session);
        assert_eq!(scene.placeholder(), None);
        assert_eq!(scene.hit_regions().len(), 2);

        let ticket = session.begin_reload();
        session.resolve(
            &ticket,
            Err(crate::error::ProviderError::Unavailable("down".to_string())),
            &RingLayout::from_config(&LayoutConfig::default()),
        );
        assert_eq!(
            renderer.render_session(&session).placeholder(),
            Some(Placeholder::NoData)
        );
    }

    #[test]
    fn test_background_color_carried() {
        let config: AppConfig = toml::from_str("[style]\nbackground_color = \"#101010\"").unwrap();
        let scene = SceneRenderer::from_config(&config)
            .unwrap()
            .render_blank();
        assert!(scene.background().is_some());
        assert!(scene.is_blank());
    }

    #[test]
    fn test_type_glyph() {
        assert_eq!(type_glyph("database"), "D");
        assert_eq!(type_glyph("  load balancer"), "L");
        assert_eq!(type_glyph("3rd party"), "3");
        assert_eq!(type_glyph(""), "?");
        assert_eq!(type_glyph("--"), "?");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short"), "short");
        let exact = "a".repeat(MAX_NAME_CHARS);
        assert_eq!(truncate_name(&exact), exact);

        let long = "payment-gateway-primary-cluster";
        let short = truncate_name(long);
        assert_eq!(short.chars().count(), MAX_NAME_CHARS);
        assert!(short.ends_with('…'));
        assert!(long.starts_with(short.trim_end_matches('…')));
    }
}
