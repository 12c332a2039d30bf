//! Error taxonomy: configuration errors, scene-loading errors, and image I/O
//! errors. Numerical edge cases encountered during rendering itself (grazing
//! rays, total internal reflection, shadow self-intersection) are never
//! represented here — they return well-defined in-band results instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("face or sphere at {path}:{line} references unknown material '{name}'")]
    UnknownMaterial {
        path: String,
        line: usize,
        name: String,
    },

    #[error("malformed numeric token on {path}:{line}: '{token}'")]
    MalformedNumber {
        path: String,
        line: usize,
        token: String,
    },

    #[error("face on {path}:{line} has fewer than 3 vertices")]
    DegenerateFace { path: String, line: usize },

    #[error("vertex index {index} on {path}:{line} is out of range (have {count} vertices)")]
    VertexIndexOutOfRange {
        path: String,
        line: usize,
        index: i64,
        count: usize,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    Config(String),

    #[error("failed to load scene: {0}")]
    Scene(#[from] SceneError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
