use thiserror::Error;

/// Errors that can occur during topology layout
///
/// Malformed graphs are absorbed: unknown edge endpoints are dropped,
/// duplicate ids collapse and placement conflicts are settled in place. The
/// only failure is a call without a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
