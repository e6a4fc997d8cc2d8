use thiserror::Error;

/// Failures surfaced by the buffer wrappers, the worker pool and the PNG writers.
/// The histogram algorithms themselves never fail.
#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("Frame size mismatch: expected {expected} bytes, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Frame of {width}x{height} pixels does not fit in memory")]
    FrameTooLarge { width: u32, height: u32 },

    #[error("Histogram worker pool is unavailable")]
    WorkerUnavailable,

    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HistogramError>;
