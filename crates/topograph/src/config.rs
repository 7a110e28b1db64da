//! Configuration types for Topograph.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a partial (or empty) document yields a usable configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Canvas size and ring radii.
//! - [`ViewConfig`] - Traversal depth and zoom bounds.
//! - [`StyleConfig`] - Colors used by the scene renderer.
//!
//! # Example
//!
//! ```
//! # use topograph::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.view().depth(), 2);
//! ```

use serde::Deserialize;

use topograph_core::{color::Color, geometry::Size};

use crate::error::TopographError;

/// Smallest traversal depth a provider accepts.
pub const MIN_DEPTH: u8 = 1;
/// Largest traversal depth a provider accepts.
pub const MAX_DEPTH: u8 = 5;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    view: ViewConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, view: ViewConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            view,
            style,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a copy requesting a different traversal depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.view = self.view.with_depth(depth);
        self
    }

    /// Checks value ranges and color strings.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), TopographError> {
        self.layout.validate()?;
        self.view.validate()?;
        self.style.validate()?;
        Ok(())
    }
}

/// Canvas and ring geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    canvas_height: f32,
    inner_radius: f32,
    outer_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 800.0,
            inner_radius: 150.0,
            outer_radius: 300.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(canvas: Size, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            inner_radius,
            outer_radius,
        }
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Radius of the ring holding the focal node's direct neighbors.
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// Radius of the ring holding every other node.
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    fn validate(&self) -> Result<(), TopographError> {
        let positive = [
            ("layout.canvas_width", self.canvas_width),
            ("layout.canvas_height", self.canvas_height),
            ("layout.inner_radius", self.inner_radius),
            ("layout.outer_radius", self.outer_radius),
        ];
        for (key, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TopographError::Config(format!(
                    "`{key}` must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Traversal depth and zoom behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    depth: u8,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_step: 0.1,
        }
    }
}

impl ViewConfig {
    pub fn new(depth: u8, min_zoom: f32, max_zoom: f32, zoom_step: f32) -> Self {
        Self {
            depth,
            min_zoom,
            max_zoom,
            zoom_step,
        }
    }

    /// Relationship depth requested from the data provider.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Amount a single zoom button press changes the scale by.
    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    /// Returns a copy with a different traversal depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    fn validate(&self) -> Result<(), TopographError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            return Err(TopographError::Config(format!(
                "`view.depth` must be between {MIN_DEPTH} and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        for (key, value) in [
            ("view.min_zoom", self.min_zoom),
            ("view.max_zoom", self.max_zoom),
            ("view.zoom_step", self.zoom_step),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TopographError::Config(format!(
                    "`{key}` must be a positive number, got {value}"
                )));
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(TopographError::Config(format!(
                "`view.min_zoom` ({}) is greater than `view.max_zoom` ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

/// Colors used by the scene renderer, as CSS color strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    focal_color: String,
    neighbor_color: String,
    outer_color: String,
    edge_color: String,
    label_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            focal_color: "#d9534f".to_string(),
            neighbor_color: "#337ab7".to_string(),
            outer_color: "#8e9eab".to_string(),
            edge_color: "#9a9a9a".to_string(),
            label_color: "#333333".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Fill of the focal node.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn focal_color(&self) -> Result<Color, String> {
        parse_color("focal", &self.focal_color)
    }

    pub fn neighbor_color(&self) -> Result<Color, String> {
        parse_color("neighbor", &self.neighbor_color)
    }

    pub fn outer_color(&self) -> Result<Color, String> {
        parse_color("outer", &self.outer_color)
    }

    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge", &self.edge_color)
    }

    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label", &self.label_color)
    }

    /// Sets the background color string (builder style).
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    fn validate(&self) -> Result<(), TopographError> {
        self.background_color().map_err(TopographError::Config)?;
        for color in [
            self.focal_color(),
            self.neighbor_color(),
            self.outer_color(),
            self.edge_color(),
            self.label_color(),
        ] {
            color.map_err(TopographError::Config)?;
        }
        Ok(())
    }
}

fn parse_color(role: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {role} color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().canvas_size(), Size::new(800.0, 800.0));
        assert_eq!(config.layout().inner_radius(), 150.0);
        assert_eq!(config.layout().outer_radius(), 300.0);
        assert_eq!(config.view().depth(), 2);
        assert_eq!(config.view().min_zoom(), 0.5);
        assert_eq!(config.view().max_zoom(), 2.0);
        assert_eq!(config.view().zoom_step(), 0.1);
        assert_eq!(config.style().background_color(), Ok(None));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            inner_radius = 120.0

            [style]
            background_color = "#ffffff"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().inner_radius(), 120.0);
        assert_eq!(config.layout().outer_radius(), 300.0);
        assert_eq!(config.view().depth(), 2);
        assert!(config.style().background_color().unwrap().is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_depth_out_of_range() {
        for depth in [0, 6] {
            let config = AppConfig::new(
                LayoutConfig::default(),
                ViewConfig::default().with_depth(depth),
                StyleConfig::default(),
            );
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("view.depth"));
        }
    }

    #[test]
    fn test_with_depth_overrides_view() {
        let config = AppConfig::default().with_depth(4);
        assert_eq!(config.view().depth(), 4);
        assert_eq!(config.view().max_zoom(), 2.0);
    }

    #[test]
    fn test_rejects_inverted_zoom_bounds() {
        let config = AppConfig::new(
            LayoutConfig::default(),
            ViewConfig::new(2, 2.0, 1.0, 0.1),
            StyleConfig::default(),
        );
        assert!(matches!(
            config.validate(),
            Err(TopographError::Config(msg)) if msg.contains("min_zoom")
        ));
    }

    #[test]
    fn test_rejects_non_positive_geometry() {
        let config = AppConfig::new(
            LayoutConfig::new(Size::new(800.0, 0.0), 150.0, 300.0),
            ViewConfig::default(),
            StyleConfig::default(),
        );
        assert!(config.validate().is_err());

        let config = AppConfig::new(
            LayoutConfig::new(Size::new(800.0, 800.0), -1.0, 300.0),
            ViewConfig::default(),
            StyleConfig::default(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            edge_color = "not-a-color"
            "#,
        )
        .unwrap();
        assert!(config.style().edge_color().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::default().with_background_color("nope");
        let err = style.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color"));
    }
}
