//! Error types for kicks-setup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort placeholder generation.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output extension does not map to a known raster format.
    #[error("Unsupported image format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The encoder rejected the canvas.
    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        /// Target path.
        path: PathBuf,
        /// Underlying encoder error.
        source: image::ImageError,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

/// Font acquisition failures. Always recovered by falling back to the
/// built-in font; never returned from `generate`.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("cannot read font {}: {source}", path.display())]
    Read {
        /// Font path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("invalid font data in {}", path.display())]
    Invalid {
        /// Font path.
        path: PathBuf,
    },
}
