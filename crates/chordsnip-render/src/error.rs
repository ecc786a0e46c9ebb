use crate::renderer::Surface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("renderer failed on the {surface} surface: {message}")]
    Renderer { surface: Surface, message: String },
    #[error("invalid chart options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
