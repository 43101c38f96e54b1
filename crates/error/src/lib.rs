//! Errors shared by all parts of the Seega server.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use failure::Fail;
use log::error;
use serde::Serialize;
use std::borrow::Cow;

/// An error that occurred while handling an API request.
pub trait ApiError: Fail {
    /// HTTP response status code.
    fn status(&self) -> StatusCode;

    /// Internal code describing this error.
    ///
    /// This code is used to identify this error outside the system, and thus
    /// should only be present for errors which are intended to be reported
    /// to the player in detail.
    fn code(&self) -> Option<Cow<str>>;
}

/// Required to make `#[cause]` on a `Box<dyn ApiError>` work.
impl Fail for Box<dyn ApiError> {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn cause(&self) -> Option<&dyn Fail> {
        (**self).cause()
    }

    fn backtrace(&self) -> Option<&failure::Backtrace> {
        (**self).backtrace()
    }
}

/// A wrapper around user-facing [`ApiError`]s and errors which should not be
/// reported to the player, such as broken actor mailboxes.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    Api(#[cause] Box<dyn ApiError>),
    /// Error sending messages between actors.
    #[fail(display = "{}", _0)]
    ActixMailbox(#[cause] actix::MailboxError),
}

impl<T: ApiError> From<T> for Error {
    fn from(error: T) -> Error {
        Error::Api(Box::new(error))
    }
}

impl From<actix::MailboxError> for Error {
    fn from(error: actix::MailboxError) -> Error {
        Error::ActixMailbox(error)
    }
}

impl Error {
    /// HTTP status this error will be rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Api(err) => err.status(),
            Error::ActixMailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        match self {
            Error::Api(err) => match err.code() {
                Some(code) => HttpResponse::build(err.status())
                    .json(ErrorResponse {
                        error: code,
                        detail: err.to_string(),
                    }),
                None => {
                    error!("{}", err);
                    HttpResponse::new(err.status())
                }
            },
            Error::ActixMailbox(_) => {
                error!("{}", self);
                HttpResponse::InternalServerError()
                    .finish()
            }
        }
    }

    fn render_response(&self) -> HttpResponse {
        self.error_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'s> {
    error: Cow<'s, str>,
    detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Fail)]
    #[fail(display = "Nothing here")]
    struct Missing;

    impl ApiError for Missing {
        fn status(&self) -> StatusCode {
            StatusCode::NOT_FOUND
        }

        fn code(&self) -> Option<Cow<str>> {
            Some("test:missing".into())
        }
    }

    #[derive(Debug, Fail)]
    #[fail(display = "Broken invariant")]
    struct Internal;

    impl ApiError for Internal {
        fn status(&self) -> StatusCode {
            StatusCode::INTERNAL_SERVER_ERROR
        }

        fn code(&self) -> Option<Cow<str>> {
            None
        }
    }

    #[test]
    fn api_errors_keep_their_status() {
        let err = Error::from(Missing);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Nothing here");
    }

    #[test]
    fn internal_errors_are_not_described() {
        let err = Error::from(Internal);
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn mailbox_errors_become_500() {
        let err = Error::from(actix::MailboxError::Closed);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
