// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for strategy construction and the ingestion path.
//!
//! Only [`InitError`] ever reaches a caller. [`SubmissionError`] and
//! [`CloseError`] are ordinary return values on the gateway traits; the
//! decorator absorbs them so rotation is never destabilized by the remote
//! service.

/// Fatal failure constructing the shipping strategy.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The configuration violates an invariant (missing required field,
    /// half-set mapping pair).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured ingestion endpoint does not parse as a URI.
    #[error("malformed ingestion endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    /// The client factory could not open a session to the service.
    #[error("could not open ingest client: {0}")]
    Connect(#[from] ConnectError),
}

/// Failure opening a session to the ingestion service.
///
/// Produced by [`crate::gateway::IngestClientFactory::connect`] and carried
/// inside [`InitError::Connect`].
#[derive(Debug, thiserror::Error)]
#[error("connection to {endpoint} failed: {message}")]
pub struct ConnectError {
    pub endpoint: String,
    pub message: String,
}

/// Failure submitting a rotated file or reading back its status entries.
///
/// Matched and discarded at exactly one call site; it never changes the
/// rotation's reported outcome.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The rotated file could not be read.
    #[error("failed to read rotated file: {0}")]
    Io(#[from] std::io::Error),

    /// The service accepted the connection but rejected the submission.
    #[error("ingestion service rejected the submission: {0}")]
    Rejected(String),

    /// The submission never reached the service.
    #[error("ingestion transport failure: {0}")]
    Transport(String),
}

/// Failure releasing the ingest client session. Logged as a warning, never
/// rethrown.
#[derive(Debug, thiserror::Error)]
#[error("failed to close ingest client: {0}")]
pub struct CloseError(pub String);
