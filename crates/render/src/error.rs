use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to spawn render worker: {0}")]
    Spawn(std::io::Error),

    #[error("render worker `{0}` panicked")]
    WorkerPanicked(String),
}
