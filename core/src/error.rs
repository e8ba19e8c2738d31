use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("failed to load {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("height map is {height_map:?} but color map is {color_map:?} (width, height)")]
    DimensionMismatch {
        height_map: (usize, usize),
        color_map: (usize, usize),
    },

    #[error("expected {expected} samples for a {width}x{height} grid, got {actual}")]
    SampleCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
