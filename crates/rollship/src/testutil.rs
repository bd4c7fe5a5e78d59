// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! Recording fakes shared by the unit tests.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::AuthMode;
use crate::error::{CloseError, ConnectError, SubmissionError};
use crate::gateway::{
    IngestClient, IngestClientFactory, IngestEndpoint, IngestionProperties, IngestionStatus,
};
use crate::rotation::{RolloverDescription, RolloverPolicy, RotationContext, RotationStep};

/// Shared ordered record of step/client interactions.
pub(crate) type EventLog = Arc<Mutex<Vec<String>>>;

pub(crate) fn events() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn recorded(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

fn push(log: &EventLog, event: &str) {
    log.lock().unwrap().push(event.to_string());
}

enum StepOutcome {
    Result(bool),
    IoError,
}

/// A [`RotationStep`] that records every call into an [`EventLog`].
pub(crate) struct RecordingStep {
    events: EventLog,
    outcome: StepOutcome,
    complete: bool,
}

impl RecordingStep {
    pub(crate) fn succeeding(log: &EventLog) -> Self {
        Self::with_result(log, true)
    }

    pub(crate) fn with_result(log: &EventLog, result: bool) -> Self {
        Self {
            events: Arc::clone(log),
            outcome: StepOutcome::Result(result),
            complete: false,
        }
    }

    pub(crate) fn io_failing(log: &EventLog) -> Self {
        Self {
            events: Arc::clone(log),
            outcome: StepOutcome::IoError,
            complete: false,
        }
    }

    pub(crate) fn completed(log: &EventLog) -> Self {
        Self {
            events: Arc::clone(log),
            outcome: StepOutcome::Result(true),
            complete: true,
        }
    }
}

impl RotationStep for RecordingStep {
    fn run(&mut self) {
        push(&self.events, "step.run");
    }

    fn execute(&mut self) -> io::Result<bool> {
        push(&self.events, "step.execute");
        match self.outcome {
            StepOutcome::Result(result) => Ok(result),
            StepOutcome::IoError => Err(io::Error::new(io::ErrorKind::Other, "disk failure")),
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn close(&mut self) {
        push(&self.events, "step.close");
    }
}

enum SubmitOutcome {
    Statuses(Vec<IngestionStatus>),
    Transport(String),
}

/// An [`IngestClient`] that records submissions and closes.
pub(crate) struct RecordingClient {
    events: EventLog,
    outcome: SubmitOutcome,
    fail_close: bool,
    submissions: Mutex<Vec<(PathBuf, IngestionProperties)>>,
    closes: Mutex<usize>,
}

impl RecordingClient {
    pub(crate) fn succeeding(log: &EventLog) -> Arc<Self> {
        Self::with_statuses(log, Vec::new())
    }

    pub(crate) fn with_statuses(log: &EventLog, statuses: Vec<IngestionStatus>) -> Arc<Self> {
        Arc::new(Self {
            events: Arc::clone(log),
            outcome: SubmitOutcome::Statuses(statuses),
            fail_close: false,
            submissions: Mutex::new(Vec::new()),
            closes: Mutex::new(0),
        })
    }

    pub(crate) fn failing(log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            events: Arc::clone(log),
            outcome: SubmitOutcome::Transport("connection reset".to_string()),
            fail_close: false,
            submissions: Mutex::new(Vec::new()),
            closes: Mutex::new(0),
        })
    }

    pub(crate) fn failing_close(log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            events: Arc::clone(log),
            outcome: SubmitOutcome::Statuses(Vec::new()),
            fail_close: true,
            submissions: Mutex::new(Vec::new()),
            closes: Mutex::new(0),
        })
    }

    pub(crate) fn submitted(&self) -> Vec<(PathBuf, IngestionProperties)> {
        self.submissions.lock().unwrap().clone()
    }

    pub(crate) fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub(crate) fn close_count(&self) -> usize {
        *self.closes.lock().unwrap()
    }
}

impl IngestClient for RecordingClient {
    fn submit(
        &self,
        file: &Path,
        properties: &IngestionProperties,
    ) -> Result<Vec<IngestionStatus>, SubmissionError> {
        push(&self.events, "client.submit");
        self.submissions
            .lock()
            .unwrap()
            .push((file.to_path_buf(), properties.clone()));
        match &self.outcome {
            SubmitOutcome::Statuses(statuses) => Ok(statuses.clone()),
            SubmitOutcome::Transport(message) => Err(SubmissionError::Transport(message.clone())),
        }
    }

    fn close(&self) -> Result<(), CloseError> {
        push(&self.events, "client.close");
        *self.closes.lock().unwrap() += 1;
        if self.fail_close {
            Err(CloseError("mock close failure".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Forwards to a shared [`RecordingClient`] so tests keep a handle for
/// assertions after the factory gives the client away.
pub(crate) struct SharedClient(pub(crate) Arc<RecordingClient>);

impl IngestClient for SharedClient {
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

/// An [`IngestClientFactory`] that records connection attempts.
pub(crate) struct RecordingFactory {
    client: Arc<RecordingClient>,
    connects: Mutex<Vec<(String, AuthMode)>>,
}

impl RecordingFactory {
    pub(crate) fn new(client: Arc<RecordingClient>) -> Self {
        Self {
            client,
            connects: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn connects(&self) -> Vec<(String, AuthMode)> {
        self.connects.lock().unwrap().clone()
    }
}

impl IngestClientFactory for RecordingFactory {
    fn connect(
        &self,
        endpoint: &IngestEndpoint,
        auth: &AuthMode,
    ) -> Result<Box<dyn IngestClient>, ConnectError> {
        self.connects
            .lock()
            .unwrap()
            .push((endpoint.as_str().to_string(), auth.clone()));
        Ok(Box::new(SharedClient(Arc::clone(&self.client))))
    }
}

/// A [`RolloverPolicy`] that hands out one pre-built description.
pub(crate) struct ScriptedPolicy {
    next: Option<Box<dyn RolloverDescription>>,
}

impl ScriptedPolicy {
    pub(crate) fn returning(description: Box<dyn RolloverDescription>) -> Self {
        Self {
            next: Some(description),
        }
    }

    pub(crate) fn declining() -> Self {
        Self { next: None }
    }
}

impl RolloverPolicy for ScriptedPolicy {
    fn rollover(&mut self, _ctx: &RotationContext) -> Option<Box<dyn RolloverDescription>> {
        self.next.take()
    }
}
