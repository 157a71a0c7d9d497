use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Failed to allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("Custom drawer failed: {0}")]
    CustomDraw(#[from] anyhow::Error),
    #[error("Failed to encode surface: {0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
