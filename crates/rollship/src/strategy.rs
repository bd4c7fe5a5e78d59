// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! The shipping rollover strategy and its description decorator.
//!
//! [`ShipRolloverStrategy`] wraps a base [`RolloverPolicy`]: the base policy
//! keeps deciding which files move where, and every description it produces
//! comes back wrapped so that executing the synchronous step also submits the
//! rotated file. Callers compose against [`RolloverPolicy`] and observe the
//! augmented behavior transparently.
//!
//! One ingest client session is opened at construction time and shared by
//! every rotation the strategy ever performs; it is released when the caller
//! closes a wrapped synchronous step.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::IngestConfig;
use crate::error::InitError;
use crate::gateway::{IngestClient, IngestClientFactory, IngestEndpoint, IngestionProperties};
use crate::rotation::{RolloverDescription, RolloverPolicy, RotationContext, RotationStep};
use crate::ship_action::ShipAction;

/// Decorates one rotation outcome.
///
/// The active file name and the asynchronous step pass through unchanged —
/// compression and cleanup are an independent concern. The destination is
/// always reported as appending: the remote target is additive, whatever the
/// base policy's local truncation semantics. The synchronous step, when
/// present, is handed out wrapped in a [`ShipAction`].
pub struct ShipRollover {
    delegate: Box<dyn RolloverDescription>,
    client: Arc<dyn IngestClient>,
    properties: Arc<IngestionProperties>,
}

impl ShipRollover {
    pub fn new(
        delegate: Box<dyn RolloverDescription>,
        client: Arc<dyn IngestClient>,
        properties: Arc<IngestionProperties>,
    ) -> Self {
        Self {
            delegate,
            client,
            properties,
        }
    }
}

impl RolloverDescription for ShipRollover {
    fn active_file_name(&self) -> &str {
        self.delegate.active_file_name()
    }

    fn append(&self) -> bool {
        true
    }

    fn take_synchronous(&mut self) -> Option<Box<dyn RotationStep>> {
        let base = self.delegate.take_synchronous()?;
        let file_name = self.delegate.active_file_name().to_string();
        Some(Box::new(ShipAction::new(
            base,
            file_name,
            Arc::clone(&self.client),
            Arc::clone(&self.properties),
        )))
    }

    fn take_asynchronous(&mut self) -> Option<Box<dyn RotationStep>> {
        self.delegate.take_asynchronous()
    }
}

/// A [`RolloverPolicy`] that ships every rotated file to the ingestion
/// service.
pub struct ShipRolloverStrategy {
    policy: Box<dyn RolloverPolicy>,
    client: Arc<dyn IngestClient>,
    properties: Arc<IngestionProperties>,
}

impl ShipRolloverStrategy {
    /// Validate the configuration, open the ingest client session and bind
    /// the ingestion properties used for every future submission.
    ///
    /// Failure here is fatal: the strategy is unusable and the caller decides
    /// what to do without it.
    pub fn new(
        config: &IngestConfig,
        policy: Box<dyn RolloverPolicy>,
        factory: &dyn IngestClientFactory,
    ) -> Result<Self, InitError> {
        config.validate()?;
        let endpoint = IngestEndpoint::parse(&config.endpoint)?;
        let auth = config.auth_mode();
        let client = factory.connect(&endpoint, &auth).map_err(|err| {
            error!("Could not initialize ingest client: {err}");
            InitError::from(err)
        })?;

        let mut properties = IngestionProperties::new(&config.database, &config.table);
        if let Some(mapping) = config.mapping() {
            info!("Using mapping {} of kind {}", mapping.name(), mapping.kind());
            properties = properties.with_mapping(mapping);
        }
        debug!("Opened ingest client for {endpoint}");

        Ok(Self {
            policy,
            client: Arc::from(client),
            properties: Arc::new(properties),
        })
    }

    /// The properties bound at construction time.
    pub fn properties(&self) -> &IngestionProperties {
        &self.properties
    }
}

impl std::fmt::Debug for ShipRolloverStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipRolloverStrategy")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl RolloverPolicy for ShipRolloverStrategy {
    fn rollover(&mut self, ctx: &RotationContext) -> Option<Box<dyn RolloverDescription>> {
        let base = self.policy.rollover(ctx)?;
        Some(Box::new(ShipRollover::new(
            base,
            Arc::clone(&self.client),
            Arc::clone(&self.properties),
        )))
    }
}
