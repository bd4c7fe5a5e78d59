// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the shipping strategy.
//!
//! The record is built once, before strategy construction, and is immutable
//! thereafter. Loading supports the `ROLLSHIP_*` environment variables;
//! embedders may also fill the struct directly.
//!
//! Two derivations happen exactly once, at validation time, instead of being
//! re-checked on every use:
//!
//! - credentials resolve to an [`AuthMode`]: an empty `app_key` or
//!   `app_tenant` selects identity-based auth, otherwise application
//!   credentials are used;
//! - the mapping pair resolves to an [`IngestionMapping`] only when both the
//!   name and the kind are present and non-blank.

use std::env;

use crate::error::InitError;
use crate::gateway::{IngestionMapping, MappingKind};

/// Immutable configuration for one shipping strategy.
#[derive(Debug, Clone, Default)]
pub struct IngestConfig {
    /// Ingestion endpoint address. Required.
    pub endpoint: String,
    /// Client/application id. Used by both auth modes.
    pub app_id: String,
    /// Application secret. Empty selects identity-based auth.
    pub app_key: String,
    /// Application tenant. Empty selects identity-based auth.
    pub app_tenant: String,
    /// Target database (dataset) name. Required.
    pub database: String,
    /// Target table name. Required.
    pub table: String,
    /// Optional schema-mapping name. Must be paired with `mapping_kind`.
    pub mapping_name: Option<String>,
    /// Optional schema-mapping kind (`csv`|`json`). Must be paired with
    /// `mapping_name`.
    pub mapping_kind: Option<String>,
}

impl IngestConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, InitError> {
        let config = Self {
            endpoint: env::var("ROLLSHIP_ENDPOINT").unwrap_or_default(),
            app_id: env::var("ROLLSHIP_APP_ID").unwrap_or_default(),
            app_key: env::var("ROLLSHIP_APP_KEY").unwrap_or_default(),
            app_tenant: env::var("ROLLSHIP_APP_TENANT").unwrap_or_default(),
            database: env::var("ROLLSHIP_DATABASE").unwrap_or_default(),
            table: env::var("ROLLSHIP_TABLE").unwrap_or_default(),
            mapping_name: env::var("ROLLSHIP_MAPPING_NAME").ok(),
            mapping_kind: env::var("ROLLSHIP_MAPPING_KIND").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), InitError> {
        if self.endpoint.trim().is_empty() {
            return Err(InitError::InvalidConfig(
                "endpoint (ROLLSHIP_ENDPOINT) is required".to_string(),
            ));
        }
        if self.database.trim().is_empty() {
            return Err(InitError::InvalidConfig(
                "database (ROLLSHIP_DATABASE) is required".to_string(),
            ));
        }
        if self.table.trim().is_empty() {
            return Err(InitError::InvalidConfig(
                "table (ROLLSHIP_TABLE) is required".to_string(),
            ));
        }

        let has_name = !blank(self.mapping_name.as_deref());
        let has_kind = !blank(self.mapping_kind.as_deref());
        if has_name != has_kind {
            return Err(InitError::InvalidConfig(
                "mapping_name and mapping_kind must be set together".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the authentication mode from the credential fields.
    pub fn auth_mode(&self) -> AuthMode {
        if self.app_key.is_empty() || self.app_tenant.is_empty() {
            AuthMode::Identity {
                app_id: self.app_id.clone(),
            }
        } else {
            AuthMode::AppCredentials {
                app_id: self.app_id.clone(),
                app_key: self.app_key.clone(),
                app_tenant: self.app_tenant.clone(),
            }
        }
    }

    /// Resolve the bound mapping, if both mapping fields are non-blank.
    pub fn mapping(&self) -> Option<IngestionMapping> {
        let name = self.mapping_name.as_deref().map(str::trim)?;
        let kind = self.mapping_kind.as_deref().map(str::trim)?;
        if name.is_empty() || kind.is_empty() {
            return None;
        }
        Some(IngestionMapping::new(name, MappingKind::parse(kind)))
    }
}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Authentication mode, resolved once from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Identity-based authentication (managed identity), optionally pinned to
    /// a client id.
    Identity { app_id: String },
    /// Application-credential authentication.
    AppCredentials {
        app_id: String,
        app_key: String,
        app_tenant: String,
    },
}
