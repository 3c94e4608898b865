// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessmonitor - accessibility compliance scanning and drift monitoring
//!
//! Scans a web page's markup against a fixed catalogue of WCAG-derived
//! rules, scores conformance, classifies a compliance level, and can
//! re-run the scan on a schedule to detect drift over time.
//!
//! ## Pipeline
//!
//! Fetcher -> Evaluator -> Scorer -> ScanRecord -> Scan store, with the
//! trend/diff engine reading the store and the monitor scheduler driving
//! the whole pipeline for registered targets.
//!
//! - **fetcher**: time-, redirect-, and size-bounded page retrieval
//! - **catalog** + **rules**: the rule table and its predicates
//! - **contrast**: color parsing and WCAG contrast colorimetry
//! - **score**: numeric score and compliance classification
//! - **store** + **trend**: capped scan history and drift derivations
//! - **monitor** + **scheduler**: periodic re-scanning of registered targets
//! - **engine**: the facade external consumers call
//!
//! This is a static-markup heuristic scanner, not a rendered-DOM or
//! assistive-technology test, and its results are not legal compliance
//! determinations.

pub mod catalog;
pub mod config;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod monitor;
pub mod record;
pub mod report;
pub mod rules;
pub mod scheduler;
pub mod score;
pub mod storage;
pub mod store;
pub mod trend;

pub use config::Config;
pub use engine::{Engine, TickSummary};
pub use error::{EngineError, FetchError, Result};
pub use monitor::{Frequency, Monitor};
pub use record::{ComplianceLevel, Issue, Pass, ScanRecord, Severity, Warning};
pub use trend::{TrendDirection, TrendReport};
