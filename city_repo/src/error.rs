use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::query::QueryError;
use std::fmt::Debug;
use thiserror::Error;

/// Errors surfaced while listing a partition.
///
/// Nothing in this crate recovers from these; they travel unchanged up to
/// whoever started the scan.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Malformed item: {0}")]
    MalformedItem(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQueryParameters(String),
}

impl<R: Debug + 'static> From<SdkError<QueryError, R>> for Error {
    fn from(err: SdkError<QueryError, R>) -> Self {
        let message = format!("{}", DisplayErrorContext(&err));
        match err {
            SdkError::ServiceError(_) | SdkError::ConstructionFailure(_) => Error::Query(message),
            _ => Error::Transport(message),
        }
    }
}
