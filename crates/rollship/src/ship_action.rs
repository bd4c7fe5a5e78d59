// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! Decorator that splices a submission into one rotation step.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::gateway::{IngestClient, IngestionProperties};
use crate::rotation::RotationStep;

/// Wraps one base [`RotationStep`] to submit the rotated file before the base
/// step runs.
///
/// The base step's contract is preserved: `run` and `is_complete` forward
/// verbatim, and `execute` always returns the base step's own result. The
/// submission happens strictly before the base effect, so the client reads
/// the already-rotated, now-closed file. A submission failure is logged and
/// discarded here — this is the single absorb site.
pub struct ShipAction {
    delegate: Box<dyn RotationStep>,
    file_name: String,
    client: Arc<dyn IngestClient>,
    properties: Arc<IngestionProperties>,
}

impl ShipAction {
    pub fn new(
        delegate: Box<dyn RotationStep>,
        file_name: impl Into<String>,
        client: Arc<dyn IngestClient>,
        properties: Arc<IngestionProperties>,
    ) -> Self {
        Self {
            delegate,
            file_name: file_name.into(),
            client,
            properties,
        }
    }
}

impl RotationStep for ShipAction {
    fn run(&mut self) {
        self.delegate.run();
    }

    fn execute(&mut self) -> io::Result<bool> {
        match self.client.submit(Path::new(&self.file_name), &self.properties) {
            Ok(statuses) => {
                for status in &statuses {
                    debug!(
                        "Ingestion status {}, failure status {}, error code {} for file {}",
                        status.status,
                        status.failure_status.as_deref().unwrap_or("none"),
                        status.error_code.as_deref().unwrap_or("none"),
                        self.file_name
                    );
                }
            }
            Err(err) => {
                error!("Error ingesting file {}: {err}", self.file_name);
            }
        }
        self.delegate.execute()
    }

    fn is_complete(&self) -> bool {
        self.delegate.is_complete()
    }

    fn close(&mut self) {
        self.delegate.close();
        if let Err(err) = self.client.close() {
            warn!("Error closing ingest client: {err}");
        }
    }
}
