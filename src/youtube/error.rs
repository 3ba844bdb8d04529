use super::navigator::PathError;

/// Failures surfaced by the mix extractor.
///
/// None of these are retried here; a broken path looks the same whether the
/// network hiccuped or YouTube changed its payload.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The response did not have the expected shape. Also used when the last
    /// item of a page carries no continuation link, since mixes never signal
    /// an end of their own.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] PathError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not parse {0}")]
    Parsing(String),

    #[error("playlist page has not been fetched yet")]
    NotFetched,

    #[error("transport failed: {0:#}")]
    Transport(#[source] anyhow::Error),
}
