//! Rendering PlantUML sources into images.
//!
//! The [`DiagramRenderer`] trait is the seam between diagram assembly and
//! image production. [`PlantUmlServer`] is the built-in implementation: it
//! posts the diagram text to a PlantUML server and returns the response
//! body.

use std::{
    fmt::{self, Display},
    io::{self, Read},
    str::FromStr,
};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RenderConfig;

/// Image format requested from the renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Portable Network Graphics (default)
    #[default]
    Png,
    /// Scalable Vector Graphics
    Svg,
}

impl ImageFormat {
    /// File extension of images in this format.
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

impl FromStr for ImageFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err("Unsupported image format"),
        }
    }
}

impl From<ImageFormat> for &'static str {
    fn from(val: ImageFormat) -> Self {
        match val {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Errors raised while rendering a diagram.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("server at {url} answered with status {status}")]
    Status { status: u16, url: String },

    /// The request never produced a response.
    #[error("request to render server failed: {0}")]
    Transport(String),

    /// Reading the response body failed.
    #[error("reading rendered image failed: {0}")]
    Io(#[from] io::Error),
}

/// Converts a diagram source into image bytes.
pub trait DiagramRenderer {
    /// Renders `source` and returns the encoded image.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the image could not be produced.
    fn render(&self, source: &str) -> Result<Vec<u8>, Error>;

    /// Format of the images returned by [`render`](Self::render).
    fn format(&self) -> ImageFormat;
}

/// Renders diagrams by posting them to a PlantUML server.
///
/// The request goes to `{server_url}/{format}` with the diagram text as the
/// body. No timeout is configured; an unreachable server fails with
/// [`Error::Transport`].
pub struct PlantUmlServer {
    agent: ureq::Agent,
    server_url: String,
    format: ImageFormat,
}

impl PlantUmlServer {
    pub fn new(server_url: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            server_url: server_url.into(),
            format,
        }
    }

    /// Builds a renderer from the `[render]` configuration section.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.server_url(), config.format())
    }

    /// The endpoint diagrams are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.server_url.trim_end_matches('/'), self.format)
    }
}

impl DiagramRenderer for PlantUmlServer {
    fn render(&self, source: &str) -> Result<Vec<u8>, Error> {
        let url = self.endpoint();
        debug!(url = url.as_str(), bytes = source.len(); "Posting diagram to render server");

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "text/plain; charset=utf-8")
            .send_string(source)
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => Error::Status {
                    status,
                    url: url.clone(),
                },
                ureq::Error::Transport(transport) => Error::Transport(transport.to_string()),
            })?;

        let mut image = Vec::new();
        response.into_reader().read_to_end(&mut image)?;
        debug!(bytes = image.len(); "Rendered image received");
        Ok(image)
    }

    fn format(&self) -> ImageFormat {
        self.format
    }
}
