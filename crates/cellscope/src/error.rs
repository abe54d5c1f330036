use cellscope_io::IoError;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Opening or reading the workbook failed.
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("invalid tool arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}
