/// Errors raised while configuring an embedding
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Embeddings only exist in two or three dimensions
    #[error("unsupported dimension {0}, expected 2 or 3")]
    UnsupportedDimension(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
