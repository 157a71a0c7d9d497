use revas_core::PaintError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid scene document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Paint(#[from] PaintError),
}
