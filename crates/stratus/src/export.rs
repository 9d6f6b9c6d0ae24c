//! Export functionality for Stratus diagrams.
//!
//! This module is the final stage in the build pipeline:
//!
//! ```text
//! Builder API
//!     ↓ populate
//! Diagram (nodes / clusters / edges)
//!     ↓ lower
//! DOT statement list
//!     ↓ export (this module)
//! Output artifact
//! ```
//!
//! The [`Exporter`] trait defines the backend interface; [`dot::DotExporter`]
//! is the built-in implementation, which prints DOT directly or hands the
//! graph to the Graphviz engine for raster/vector formats.

pub mod dot;

use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
};

use graphviz_rust::cmd::Format;
use serde::Deserialize;

use crate::Diagram;

/// Output artifact formats.
///
/// `Dot` is produced in-process; the remaining formats are delegated to the
/// external Graphviz engine and require it to be installed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// DOT source, printed in-process (no external engine needed)
    Dot,
    /// Portable Network Graphics (default)
    #[default]
    Png,
    /// Scalable Vector Graphics
    Svg,
    /// Portable Document Format
    Pdf,
    /// JPEG raster image
    Jpeg,
}

impl OutputFormat {
    /// File extension of the produced artifact.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Jpeg => "jpg",
        }
    }

    /// The engine output format, or `None` when the artifact is produced
    /// in-process.
    pub(crate) fn engine_format(self) -> Option<Format> {
        match self {
            Self::Dot => None,
            Self::Png => Some(Format::Png),
            Self::Svg => Some(Format::Svg),
            Self::Pdf => Some(Format::Pdf),
            Self::Jpeg => Some(Format::Jpg),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(Self::Dot),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err("Unsupported output format, expected one of dot, png, svg, pdf, jpeg"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dot => "dot",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Jpeg => "jpeg",
        };
        write!(f, "{name}")
    }
}

/// Abstraction for diagram export backends.
///
/// Implementors turn a fully populated [`Diagram`] into an output artifact
/// and return the path they wrote.
pub trait Exporter {
    /// Exports the diagram to the backend's output artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted or the
    /// engine cannot be invoked, or [`Error::Io`] if writing the output fails.
    fn export(&mut self, diagram: &Diagram) -> Result<PathBuf, Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`StratusError`](crate::StratusError) at the
/// crate boundary via the `From` implementation in [`crate::error`].
#[derive(Debug)]
pub enum Error {
    /// A rendering or engine-invocation failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extensions() {
        assert_eq!(OutputFormat::Dot.extension(), "dot");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("svg".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_only_dot_renders_in_process() {
        assert!(OutputFormat::Dot.engine_format().is_none());
        for format in [
            OutputFormat::Png,
            OutputFormat::Svg,
            OutputFormat::Pdf,
            OutputFormat::Jpeg,
        ] {
            assert!(format.engine_format().is_some(), "{format} needs the engine");
        }
    }
}
