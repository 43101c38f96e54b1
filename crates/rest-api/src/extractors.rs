use actix_web::{
    FromRequest,
    HttpRequest,
    dev::Payload,
    http::{StatusCode, header::AUTHORIZATION},
};
use failure::Fail;
use seega_error::{ApiError, Error};
use std::{borrow::Cow, ops::Deref};

/// Player token passed in the `Authorization: Bearer <token>` header.
#[derive(Clone, Debug)]
pub struct Bearer(String);

impl Bearer {
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Parse value of an `Authorization` header.
    fn parse(header: &str) -> Result<Bearer, AuthError> {
        let mut parts = header.split_whitespace();

        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") =>
                Ok(Bearer(token.to_string())),
            _ => Err(AuthError::Malformed),
        }
    }
}

impl FromRequest for Bearer {
    type Error = Error;
    type Future = Result<Bearer, Error>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = match req.headers().get(AUTHORIZATION) {
            Some(header) => header,
            None => return Err(AuthError::Missing.into()),
        };

        let header = header.to_str().map_err(|_| AuthError::Malformed)?;

        Bearer::parse(header).map_err(Error::from)
    }
}

impl Deref for Bearer {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Fail)]
pub enum AuthError {
    #[fail(display = "Token not provided")]
    Missing,
    #[fail(display = "Invalid token format")]
    Malformed,
}

impl ApiError for AuthError {
    fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn code(&self) -> Option<Cow<str>> {
        Some(match self {
            AuthError::Missing => "auth:missing-token",
            AuthError::Malformed => "auth:malformed-header",
        }.into())
    }
}
