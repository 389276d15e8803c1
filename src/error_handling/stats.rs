//! Batch statistics tracking.
//!
//! Counts outcomes across several resolutions run by one CLI invocation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorKind, InfoType};
use crate::resolve::ResolveResult;

/// Thread-safe outcome counters.
///
/// All error kinds and info types are initialized to zero on creation, so counters
/// can be bumped from concurrent tasks through a shared reference.
pub struct ProcessingStats {
    successes: AtomicUsize,
    errors: HashMap<ErrorKind, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        ProcessingStats {
            successes: AtomicUsize::new(0),
            errors: ErrorKind::iter()
                .map(|kind| (kind, AtomicUsize::new(0)))
                .collect(),
            info: InfoType::iter()
                .map(|info_type| (info_type, AtomicUsize::new(0)))
                .collect(),
        }
    }

    /// Records one finished resolution.
    pub fn record(&self, result: &ResolveResult) {
        match result.error_kind {
            Some(kind) => self.increment_error(kind),
            None if result.error.is_some() => self.increment_error(ErrorKind::Transport),
            None => {
                self.successes.fetch_add(1, Ordering::Relaxed);
            }
        }
        if result.redirect_count > 0 {
            self.increment_info(InfoType::Redirected);
        }
        if result.final_ip.is_none() {
            self.increment_info(InfoType::NoFinalIp);
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Error kind {kind:?} missing from stats map");
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Info type {info_type:?} missing from stats map");
        }
    }

    /// Number of clean successes.
    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Get the count for an error kind.
    pub fn get_error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error kinds.
    pub fn total_errors(&self) -> usize {
        ErrorKind::iter().map(|k| self.get_error_count(k)).sum()
    }
}
