// Copyright 2025-Present Rollship contributors
// SPDX-License-Identifier: Apache-2.0

//! The rotation capability surface.
//!
//! A rotation produces a [`RolloverDescription`]: which file just closed,
//! whether the destination appends, and up to two steps — a synchronous one
//! (typically rename/finalize, expected to complete before the rotation is
//! considered done) and an asynchronous one (typically compression). Steps
//! are transient: the caller that drives the rotation takes each step out of
//! the description, executes it, and closes it within one rotation cycle.
//!
//! Which files move where is the business of a [`RolloverPolicy`]; the
//! decorators in this crate compose against these traits without knowing
//! anything about the policy's bookkeeping.

use std::io;
use std::path::{Path, PathBuf};

/// A runnable rotation sub-action.
pub trait RotationStep {
    /// Fire-and-forget trigger. Scheduling hook only; no work happens here.
    fn run(&mut self);

    /// Perform the step's work, reporting success or failure.
    fn execute(&mut self) -> io::Result<bool>;

    /// Whether the step has finished its work.
    fn is_complete(&self) -> bool;

    /// Release any resources the step holds.
    fn close(&mut self);
}

/// One rotation outcome.
///
/// The step accessors transfer ownership: a step can be taken once, after
/// which the accessor yields `None`. An absent step means "nothing to do."
pub trait RolloverDescription {
    /// Name of the file this rotation closed out.
    fn active_file_name(&self) -> &str;

    /// Whether the destination should append.
    fn append(&self) -> bool;

    /// Take the synchronous step, if one remains.
    fn take_synchronous(&mut self) -> Option<Box<dyn RotationStep>>;

    /// Take the asynchronous step, if one remains.
    fn take_asynchronous(&mut self) -> Option<Box<dyn RotationStep>>;
}

/// Plain value implementation of [`RolloverDescription`], as produced by base
/// rotation policies.
pub struct FileRollover {
    active_file_name: String,
    append: bool,
    synchronous: Option<Box<dyn RotationStep>>,
    asynchronous: Option<Box<dyn RotationStep>>,
}

impl FileRollover {
    pub fn new(active_file_name: impl Into<String>, append: bool) -> Self {
        Self {
            active_file_name: active_file_name.into(),
            append,
            synchronous: None,
            asynchronous: None,
        }
    }

    pub fn with_synchronous(mut self, step: Box<dyn RotationStep>) -> Self {
        self.synchronous = Some(step);
        self
    }

    pub fn with_asynchronous(mut self, step: Box<dyn RotationStep>) -> Self {
        self.asynchronous = Some(step);
        self
    }
}

impl RolloverDescription for FileRollover {
    fn active_file_name(&self) -> &str {
        &self.active_file_name
    }

    fn append(&self) -> bool {
        self.append
    }

    fn take_synchronous(&mut self) -> Option<Box<dyn RotationStep>> {
        self.synchronous.take()
    }

    fn take_asynchronous(&mut self) -> Option<Box<dyn RotationStep>> {
        self.asynchronous.take()
    }
}

/// What a rotation request carries to the policy.
#[derive(Debug, Clone)]
pub struct RotationContext {
    active_path: PathBuf,
}

impl RotationContext {
    pub fn new(active_path: impl Into<PathBuf>) -> Self {
        Self {
            active_path: active_path.into(),
        }
    }

    pub fn active_path(&self) -> &Path {
        &self.active_path
    }
}

/// Decides when and to what name a file rotates.
///
/// Index bookkeeping, path-pattern substitution and retention are entirely
/// the policy's concern. A policy may decline a rotation by returning `None`.
pub trait RolloverPolicy {
    fn rollover(&mut self, ctx: &RotationContext) -> Option<Box<dyn RolloverDescription>>;
}
