//! Request extractors for telemetry submissions.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use ingest::{ClientAddr, DecodeError, Submission};

use crate::error::ApiError;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Request body decoded as JSON or URL-encoded form, chosen by `Content-Type`.
#[derive(Debug)]
pub struct RawSubmission(pub Submission);

/// Why a body could not be turned into a [`RawSubmission`].
#[derive(Debug, thiserror::Error)]
pub enum SubmissionRejection {
    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl IntoResponse for SubmissionRejection {
    fn into_response(self) -> Response {
        ApiError::BadRequest(self.to_string()).into_response()
    }
}

impl<S> FromRequest<S> for RawSubmission
where
    S: Send + Sync,
{
    type Rejection = SubmissionRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| SubmissionRejection::Body(rejection.body_text()))?;

        Ok(RawSubmission(Submission::decode(
            content_type.as_deref(),
            &body,
        )?))
    }
}

/// Originating client address: first `X-Forwarded-For` entry, else the peer.
#[derive(Debug, Clone)]
pub struct ClientIp(pub ClientAddr);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded_for = parts
            .headers
            .get(X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok());
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(ClientIp(ClientAddr::resolve(forwarded_for, peer)))
    }
}
