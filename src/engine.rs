// SPDX-License-Identifier: PMPL-1.0-or-later
//! The engine: single owner of the fetcher, scan store, and monitor
//! registry, exposing the operations external consumers call.
//!
//! All mutation flows through these methods; nothing reaches into
//! shared globals. Evaluation itself never fails a scan: a page that
//! fetched but parses badly simply matches fewer rules.

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::fetcher::{normalize_url, PageFetcher};
use crate::monitor::{Frequency, Monitor, MonitorRegistry};
use crate::record::ScanRecord;
use crate::rules;
use crate::store::{normalized_host, ScanStore};
use crate::storage::Storage;
use crate::trend::{self, ScanDiff, TrendReport};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of one scheduler tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub scanned: usize,
    pub failed: usize,
}

pub struct Engine {
    fetcher: PageFetcher,
    scans: ScanStore,
    monitors: MonitorRegistry,
    storage: Option<Storage>,
}

impl Engine {
    /// In-memory engine; nothing survives the process.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(config.fetcher.clone())?,
            scans: ScanStore::new(config.store.history_cap),
            monitors: MonitorRegistry::new(),
            storage: None,
        })
    }

    /// Engine backed by JSON file storage; prior scans and monitors
    /// are loaded on construction.
    pub fn with_storage(config: &Config, storage: Storage) -> Result<Self> {
        let scans = ScanStore::restore(config.store.history_cap, storage.load_scans()?);
        let monitors = MonitorRegistry::restore(storage.load_monitors()?);
        Ok(Self {
            fetcher: PageFetcher::new(config.fetcher.clone())?,
            scans,
            monitors,
            storage: Some(storage),
        })
    }

    /// Fetch, evaluate, score, and record one page.
    pub async fn scan(&mut self, url: &str) -> Result<ScanRecord> {
        let target = normalize_url(url)?;
        let markup = self.fetcher.fetch(target.as_str()).await?;
        let evaluation = rules::evaluate(&markup);
        let record = ScanRecord::new(target.as_str(), evaluation);

        info!(
            url = %record.url,
            score = record.score,
            level = %record.level,
            issues = record.issues.len(),
            "scan complete"
        );

        self.scans.append(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Most-recent-first scan history, optionally filtered by substring
    /// match on the target URL.
    pub fn history(&self, filter: Option<&str>, limit: usize) -> Vec<ScanRecord> {
        self.scans.history(filter, limit)
    }

    /// Look up one scan record by id.
    pub fn record(&self, id: Uuid) -> Option<&ScanRecord> {
        self.scans.get(id)
    }

    /// Score trend for the URL's hostname. The summary is None until
    /// two scans exist.
    pub fn trend(&self, url: &str) -> Result<TrendReport> {
        let history = self.host_history(url)?;
        Ok(TrendReport {
            scans: trend::data_points(&history),
            trend: trend::trend_summary(&history),
        })
    }

    /// Consecutive-pair issue diffs for the URL's hostname.
    pub fn diffs(&self, url: &str) -> Result<Vec<ScanDiff>> {
        let history = self.host_history(url)?;
        Ok(trend::diff_history(&history))
    }

    fn host_history(&self, url: &str) -> Result<Vec<ScanRecord>> {
        let host = normalized_host(url).ok_or_else(|| EngineError::InvalidUrl(url.to_string()))?;
        Ok(self.scans.for_host(&host))
    }

    /// Register (or idempotently update) a monitor.
    pub fn register_monitor(
        &mut self,
        url: &str,
        contact: &str,
        frequency: Frequency,
    ) -> Result<Monitor> {
        let monitor = self.monitors.register(url, contact, frequency, Utc::now())?;
        self.persist()?;
        Ok(monitor)
    }

    /// Deactivate a monitor by id.
    pub fn deactivate_monitor(&mut self, id: Uuid) -> Result<()> {
        self.monitors.deactivate(id)?;
        self.persist()?;
        Ok(())
    }

    pub fn monitors(&self) -> &[Monitor] {
        self.monitors.list()
    }

    /// Scan every active monitor due at `now`, sequentially.
    ///
    /// One monitor's failure is logged and isolated: it neither
    /// deactivates that monitor nor affects the rest of the tick.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> TickSummary {
        let due = self.monitors.due(now);
        let mut summary = TickSummary::default();

        for id in due {
            let Some(url) = self.monitors.get(id).map(|m| m.url.clone()) else {
                continue;
            };
            match self.scan(&url).await {
                Ok(record) => {
                    self.monitors.mark_scanned(id, now, record.score);
                    summary.scanned += 1;
                }
                Err(err) => {
                    warn!(%url, error = %err, "monitor scan failed");
                    self.monitors.mark_failed(id, now);
                    summary.failed += 1;
                }
            }
            if let Err(err) = self.persist() {
                warn!(error = %err, "failed to persist monitor state");
            }
        }

        summary
    }

    fn persist(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage.save_scans(&self.scans.records())?;
            storage.save_monitors(self.monitors.records())?;
        }
        Ok(())
    }
}
