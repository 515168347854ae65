//! Configuration types for umlsheet.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field has a default, so an empty file (or no file at all)
//! yields a working configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`StoreConfig`] - Where the table workbook is written.
//! - [`DiagramConfig`] - How diagram sources are named.
//! - [`RenderConfig`] - Whether and how diagrams are rendered to images.
//!
//! # Example
//!
//! ```
//! # use umlsheet::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.diagram().file_suffix(), "_diagram");
//! assert!(config.render().enabled());
//! ```

use serde::Deserialize;

use crate::render::ImageFormat;

/// Default file name of the table workbook.
pub const DEFAULT_WORKBOOK_NAME: &str = "enums_classes_interfaces_generalizations_realisations.xlsx";

/// Default suffix appended to the class name of a diagram file.
pub const DEFAULT_DIAGRAM_SUFFIX: &str = "_diagram";

/// Default PlantUML rendering server.
pub const DEFAULT_SERVER_URL: &str = "http://www.plantuml.com/plantuml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Workbook configuration section.
    #[serde(default)]
    store: StoreConfig,

    /// Diagram source configuration section.
    #[serde(default)]
    diagram: DiagramConfig,

    /// Image rendering configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(store: StoreConfig, diagram: DiagramConfig, render: RenderConfig) -> Self {
        Self {
            store,
            diagram,
            render,
        }
    }

    /// Returns the workbook configuration.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Returns the diagram source configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    /// Returns the image rendering configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Workbook configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File name used when the output location is a directory.
    workbook_name: String,
}

impl StoreConfig {
    pub fn new(workbook_name: impl Into<String>) -> Self {
        Self {
            workbook_name: workbook_name.into(),
        }
    }

    pub fn workbook_name(&self) -> &str {
        &self.workbook_name
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORKBOOK_NAME)
    }
}

/// Diagram source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Appended to the sanitized class name to form the file stem.
    file_suffix: String,
}

impl DiagramConfig {
    pub fn new(file_suffix: impl Into<String>) -> Self {
        Self {
            file_suffix: file_suffix.into(),
        }
    }

    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGRAM_SUFFIX)
    }
}

/// Image rendering configuration.
///
/// Rendering posts each diagram source to a PlantUML server and stores the
/// returned image next to the source file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether diagrams are rendered at all.
    enabled: bool,

    /// Base URL of the PlantUML server; the image format is appended as the
    /// last path segment.
    server_url: String,

    /// Requested [`ImageFormat`].
    format: ImageFormat,
}

impl RenderConfig {
    pub fn new(enabled: bool, server_url: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            enabled,
            server_url: server_url.into(),
            format,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Checks that the server URL uses an HTTP scheme.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the URL is not `http://` or
    /// `https://`.
    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.starts_with("http://") || self.server_url.starts_with("https://") {
            Ok(())
        } else {
            Err(format!(
                "Invalid render server URL in config: `{}` is not an http(s) URL",
                self.server_url
            ))
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, DEFAULT_SERVER_URL, ImageFormat::default())
    }
}
