// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! The ingestion-gateway boundary.
//!
//! The remote ingestion client is an opaque collaborator: connection setup,
//! authentication, retry/backoff and status polling all live behind
//! [`IngestClient`]. This module defines that seam plus the small value types
//! that cross it — the validated endpoint, the per-strategy ingestion
//! properties, and the opaque status entries a submission reports back.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use hyper::Uri;

use crate::config::AuthMode;
use crate::error::{CloseError, ConnectError, InitError, SubmissionError};

/// A validated ingestion endpoint address.
///
/// Parsing rejects blank input and URIs without a scheme and host, so a
/// malformed endpoint fails strategy construction instead of the first
/// submission.
#[derive(Debug, Clone)]
pub struct IngestEndpoint {
    raw: String,
    uri: Uri,
}

impl IngestEndpoint {
    pub fn parse(raw: &str) -> Result<Self, InitError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InitError::InvalidConfig(
                "ingestion endpoint must not be empty".to_string(),
            ));
        }
        let uri = Uri::from_str(trimmed).map_err(|source| InitError::Endpoint {
            endpoint: trimmed.to_string(),
            source,
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(InitError::InvalidConfig(format!(
                "ingestion endpoint '{trimmed}' must carry a scheme and host"
            )));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            uri,
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for IngestEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Kind tag of a named schema mapping applied by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Csv,
    Json,
}

impl MappingKind {
    /// `"csv"` (case-insensitive) selects [`MappingKind::Csv`]; anything else
    /// selects [`MappingKind::Json`].
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("csv") {
            MappingKind::Csv
        } else {
            MappingKind::Json
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKind::Csv => f.write_str("csv"),
            MappingKind::Json => f.write_str("json"),
        }
    }
}

/// A named, kind-tagged schema mapping reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionMapping {
    name: String,
    kind: MappingKind,
}

impl IngestionMapping {
    pub fn new(name: impl Into<String>, kind: MappingKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }
}

/// Target database/table plus the optionally bound mapping, shared by every
/// submission a strategy performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionProperties {
    database: String,
    table: String,
    mapping: Option<IngestionMapping>,
}

impl IngestionProperties {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            mapping: None,
        }
    }

    pub fn with_mapping(mut self, mapping: IngestionMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn mapping(&self) -> Option<&IngestionMapping> {
        self.mapping.as_ref()
    }
}

/// One status entry reported by the service for a submission.
///
/// All fields are opaque; they are logged and never drive control flow.
#[derive(Debug, Clone, Default)]
pub struct IngestionStatus {
    pub status: String,
    pub failure_status: Option<String>,
    pub error_code: Option<String>,
}

/// One live session to the remote ingestion service.
///
/// `submit` is blocking I/O and is expected to enforce its own deadline;
/// nothing above this trait wraps it in a timeout. `close` must tolerate
/// repeated calls without panicking — callers treat closing as best-effort.
pub trait IngestClient {
    /// Submit one rotated file under the given properties, returning the
    /// status entries the service reported for it.
    fn submit(
        &self,
        file: &Path,
        properties: &IngestionProperties,
    ) -> Result<Vec<IngestionStatus>, SubmissionError>;

    /// Release the session.
    fn close(&self) -> Result<(), CloseError>;
}

/// Opens [`IngestClient`] sessions. The production binding implements this;
/// the strategy calls it exactly once at construction time.
pub trait IngestClientFactory {
    fn connect(
        &self,
        endpoint: &IngestEndpoint,
        auth: &AuthMode,
    ) -> Result<Box<dyn IngestClient>, ConnectError>;
}
