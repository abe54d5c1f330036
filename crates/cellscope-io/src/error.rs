use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("{backend} backend error: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unsupported workbook format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),
}

impl IoError {
    pub fn from_backend<E>(backend: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        IoError::Backend {
            backend,
            source: Box::new(err),
        }
    }
}
