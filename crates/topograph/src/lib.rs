//! Topograph - relationship graphs for configuration items.
//!
//! Given a focal configuration item (CI) and the relationships around it,
//! Topograph places the focal CI at the center of a canvas, its direct
//! neighbors on an inner ring and everything else on an outer ring, then
//! renders the result as a scene of circles, lines and labels. A
//! [`Controller`](controller::Controller) drives the view interactively:
//! re-centering on clicked nodes, zooming and discarding stale responses.

pub mod config;
pub mod controller;
pub mod export;
pub mod layout;
pub mod model;
pub mod ordered;
pub mod provider;
pub mod scene;
pub mod session;

mod error;

pub use topograph_core::{color, draw, geometry};

pub use error::{ProviderError, TopographError};

use log::info;

use config::AppConfig;
use controller::{Controller, DataProvider, Navigator};
use layout::{GraphLayout, RingLayout};
use model::{CiId, Topology};
use scene::SceneRenderer;

/// Entry point for one-shot layout and rendering.
///
/// # Examples
///
/// ```rust
/// use topograph::{TopographBuilder, model::Topology};
///
/// let topology = Topology::from_json(
///     r#"{"nodes": [{"id": 1, "name": "web-01", "type_name": "Server"}], "edges": []}"#,
/// )
/// .unwrap();
///
/// let builder = TopographBuilder::default();
/// let layout = builder.layout(&topology, None);
/// let svg = builder.render_svg(&layout, 1.0).unwrap();
/// assert!(svg.contains("web-01"));
/// ```
#[derive(Debug, Default)]
pub struct TopographBuilder {
    config: AppConfig,
}

impl TopographBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out `topology` around `focal_id`.
    pub fn layout(&self, topology: &Topology, focal_id: Option<CiId>) -> GraphLayout {
        RingLayout::from_config(self.config.layout()).layout_topology(topology, focal_id)
    }

    /// Renders a layout to SVG markup at the given zoom scale.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if the style section holds an
    /// invalid color.
    pub fn render_svg(&self, layout: &GraphLayout, zoom: f32) -> Result<String, TopographError> {
        let scene = SceneRenderer::from_config(&self.config)?.render(layout, zoom);
        let svg = export::svg::to_svg_string(&scene);
        info!(bytes = svg.len(); "SVG rendered");
        Ok(svg)
    }

    /// Creates an interactive controller over `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if the configuration does not
    /// validate.
    pub fn controller<P, N>(&self, provider: P, navigator: N) -> Result<Controller<P, N>, TopographError>
    where
        P: DataProvider,
        N: Navigator,
    {
        Controller::new(&self.config, provider, navigator)
    }
}
