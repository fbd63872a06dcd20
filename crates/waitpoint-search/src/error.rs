use thiserror::Error;

/// Top-level failures of the search pipeline.
///
/// Per-type search and per-place detail failures never appear here; they
/// are absorbed inside the pipeline (logged, and the affected unit's
/// contribution dropped or defaulted). Only configuration and geocoding
/// problems abort a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No places provider is configured (missing API credential).
    #[error("places provider is not configured")]
    Config,

    /// The location could not be geocoded to a usable coordinate.
    #[error("could not find location")]
    NotFound,

    /// The resolved coordinate lies outside the serviced region.
    #[error("location must be within Singapore")]
    OutOfRegion,
}
