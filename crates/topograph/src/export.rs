//! Scene exporters.

pub mod svg;

use std::io;

use thiserror::Error;

use crate::{error::TopographError, scene::Scene};

/// Writes a rendered [`Scene`] somewhere.
pub trait Exporter {
    /// # Errors
    ///
    /// Returns an [`Error`] if the scene cannot be rendered or written.
    fn export_scene(&self, scene: &Scene) -> Result<(), Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for TopographError {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(err) => Self::Io(err),
            Error::Render(msg) => Self::Export(msg),
        }
    }
}
