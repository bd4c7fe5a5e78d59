// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! Fakes and file-backed steps for the integration tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rollship::config::AuthMode;
use rollship::error::{CloseError, ConnectError, SubmissionError};
use rollship::gateway::{
    IngestClient, IngestClientFactory, IngestEndpoint, IngestionProperties, IngestionStatus,
};
use rollship::rotation::{RolloverDescription, RolloverPolicy, RotationContext, RotationStep};

/// One captured submission: the file path, the properties it was submitted
/// under, and the file's content as it was at submission time.
#[derive(Clone)]
pub struct CapturedSubmission {
    pub file: PathBuf,
    pub properties: IngestionProperties,
    pub content: Option<String>,
}

/// Client that captures every submission, reading the file's content at the
/// moment of submission so tests can assert on ordering against the rename.
pub struct CapturingClient {
    fail_submissions: bool,
    pub submissions: Mutex<Vec<CapturedSubmission>>,
    pub closes: Mutex<usize>,
}

impl CapturingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_submissions: false,
            submissions: Mutex::new(Vec::new()),
            closes: Mutex::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_submissions: true,
            submissions: Mutex::new(Vec::new()),
            closes: Mutex::new(0),
        })
    }

    pub fn submissions(&self) -> Vec<CapturedSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        *self.closes.lock().unwrap()
    }
}

impl IngestClient for CapturingClient {
    fn submit(
        &self,
        file: &Path,
        properties: &IngestionProperties,
    ) -> Result<Vec<IngestionStatus>, SubmissionError> {
        let content = fs::read_to_string(file).ok();
        self.submissions.lock().unwrap().push(CapturedSubmission {
            file: file.to_path_buf(),
            properties: properties.clone(),
            content,
        });
        if self.fail_submissions {
            Err(SubmissionError::Transport("connection reset".to_string()))
        } else {
            Ok(vec![IngestionStatus {
                status: "Queued".to_string(),
                failure_status: None,
                error_code: None,
            }])
        }
    }

    fn close(&self) -> Result<(), CloseError> {
        *self.closes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Factory handing out the one shared capturing client.
pub struct StaticFactory {
    client: Arc<CapturingClient>,
}

impl StaticFactory {
    pub fn new(client: Arc<CapturingClient>) -> Self {
        Self { client }
    }
}

impl IngestClientFactory for StaticFactory {
    fn connect(
        &self,
        _endpoint: &IngestEndpoint,
        _auth: &AuthMode,
    ) -> Result<Box<dyn IngestClient>, ConnectError> {
        Ok(Box::new(ForwardingClient(Arc::clone(&self.client))))
    }
}

struct ForwardingClient(Arc<CapturingClient>);

impl IngestClient for ForwardingClient {
    fn submit(
        &self,
        file: &Path,
        properties: &IngestionProperties,
    ) -> Result<Vec<IngestionStatus>, SubmissionError> {
        self.0.submit(file, properties)
    }

    fn close(&self) -> Result<(), CloseError> {
        self.0.close()
    }
}

/// Synchronous step that renames one file, the way a rename/finalize step
/// does in a real rotation.
pub struct RenameStep {
    from: PathBuf,
    to: PathBuf,
    done: bool,
}

impl RenameStep {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            done: false,
        }
    }
}

impl RotationStep for RenameStep {
    fn run(&mut self) {}

    fn execute(&mut self) -> io::Result<bool> {
        fs::rename(&self.from, &self.to)?;
        self.done = true;
        Ok(true)
    }

    fn is_complete(&self) -> bool {
        self.done
    }

    fn close(&mut self) {}
}

/// Policy producing one scripted rotation outcome.
pub struct OneShotPolicy {
    next: Option<Box<dyn RolloverDescription>>,
}

impl OneShotPolicy {
    pub fn new(description: Box<dyn RolloverDescription>) -> Self {
        Self {
            next: Some(description),
        }
    }
}

impl RolloverPolicy for OneShotPolicy {
    fn rollover(&mut self, _ctx: &RotationContext) -> Option<Box<dyn RolloverDescription>> {
        self.next.take()
    }
}
