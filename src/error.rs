//! Error types for the resource pack generator.

use thiserror::Error;

/// Result type alias using GeneratorError.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Main error type for resource pack generation.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Failed to read or write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse or serialize JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found in either input archive.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),

    /// Failed to resolve a block model's inheritance chain.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// Model inheritance chain too deep (circular reference protection).
    #[error("Model inheritance too deep (possible circular reference): {0}")]
    ModelInheritanceTooDeep(String),

    /// Texture has dimensions the atlas cannot hold.
    #[error("Invalid texture {name}: {reason}")]
    InvalidTexture { name: String, reason: String },

    /// No free cell block left in the atlas grid.
    #[error("Atlas is full: no room for {texture} ({size}px) in a {extent}x{extent} cell grid")]
    AtlasFull {
        texture: String,
        size: u32,
        extent: u32,
    },

    /// Failed to assemble the output archive.
    #[error("Export error: {0}")]
    Export(String),
}
