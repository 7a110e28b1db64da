//! SVG export.
//!
//! The document's viewport is the scene's canvas. Primitives are emitted in
//! scene paint order inside a single group, on top of an optional
//! background rectangle.

use std::{fs, path::PathBuf};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use topograph_core::draw::Drawable;

use crate::{
    export::{self, Exporter},
    scene::Scene,
};

/// Builds the SVG document for `scene`.
pub fn render(scene: &Scene) -> Document {
    let size = scene.size();
    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
        .set("width", size.width())
        .set("height", size.height());

    if let Some(background) = scene.background() {
        doc = doc.add(
            svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", &background)
                .set("fill-opacity", background.alpha()),
        );
    }

    let mut group = svg_element::Group::new().set("class", "topology");
    if let Some(placeholder) = scene.placeholder() {
        group = group.set("data-placeholder", placeholder.name());
    }
    for primitive in scene.primitives() {
        group = group.add(primitive.render_to_svg());
    }

    debug!(primitives = scene.primitives().len(); "SVG document rendered");
    doc.add(group)
}

/// Renders `scene` to SVG markup.
pub fn to_svg_string(scene: &Scene) -> String {
    render(scene).to_string()
}

/// Writes scenes to an SVG file.
#[derive(Debug, Clone)]
pub struct Svg {
    path: PathBuf,
}

impl Svg {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene) -> Result<(), export::Error> {
        let path = self.path.display().to_string();
        info!(path; "Writing SVG file");

        if let Err(err) = fs::write(&self.path, to_svg_string(scene)) {
            error!(path, err:% = err; "Failed to write SVG file");
            return Err(export::Error::Io(err));
        }
        Ok(())
    }
}
