//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::storage;

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    body: SuccessBody<V>,
}

/// What a successful response carries
enum SuccessBody<V> {
    /// Data, serialized as-is
    Data(V),

    /// An acknowledgement for a mutation
    Message(String),
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            body: SuccessBody::Data(data),
        }
    }
}

impl Success<()> {
    pub fn message<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::OK,
            body: SuccessBody::Message(message.to_string()),
        }
    }
}

/// Envelope for messages, both successful and failed
#[derive(Serialize)]
struct MessageWrapper<D>
where
    D: Serialize,
{
    success: bool,
    msg: D,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<D>,
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        match self.body {
            SuccessBody::Data(data) => (self.status_code, Json(data)).into_response(),
            SuccessBody::Message(msg) => (
                self.status_code,
                Json(MessageWrapper {
                    success: true,
                    msg,
                    description: None,
                }),
            )
                .into_response(),
        }
    }
}

/// Kinds of failure, each with its own status code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is missing or malformed
    Validation,

    /// The target does not exist
    NotFound,

    /// The request body is over the limit
    PayloadTooLarge,

    /// The storage can not be reached
    StoreUnavailable,

    /// Anything else that went wrong on our side
    Internal,
}

impl ErrorKind {
    fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    description: Option<String>,
}

impl Error {
    pub fn new<M>(kind: ErrorKind, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            kind,
            message: message.to_string(),
            description: None,
        }
    }

    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn payload_too_large<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Turn a storage error into a generic failure of a route
    ///
    /// The storage error itself is logged, never shown to the client
    pub fn storage<M>(message: M) -> impl FnOnce(storage::Error) -> Self
    where
        M: ToString,
    {
        move |err| {
            tracing::error!("Storage failure: {err}");

            let kind = match err {
                storage::Error::Connection(_) => ErrorKind::StoreUnavailable,
                storage::Error::Query(_) | storage::Error::Migration(_) => ErrorKind::Internal,
            };

            Self::new(kind, message)
        }
    }

    pub fn with_description<M>(&self, description: M) -> Self
    where
        M: ToString,
    {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            description: Some(description.to_string()),
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.kind.status_code(),
            Json(MessageWrapper {
                success: false,
                msg: self.message,
                description: self.description,
            }),
        )
            .into_response()
    }
}
