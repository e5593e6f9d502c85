use thiserror::Error;

/// Failures the booking workflow can surface.
///
/// Only two asynchronous operations exist (the slot fetch and the
/// availability save) and each has a single failure mode. Everything else in
/// the workflow is a logged no-op rather than an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("failed to fetch availability: {0}")]
    FetchFailed(String),

    #[error("failed to save availability: {0}")]
    SaveFailed(String),
}
