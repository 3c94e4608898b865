// SPDX-License-Identifier: PMPL-1.0-or-later
//! Capped append-only store of scan records.
//!
//! Records are keyed by insertion order with an id index for O(1)
//! lookup. The cap bounds retained history; the oldest record is
//! evicted first. Trend lookups use normalized-host equality so scheme
//! and path noise cannot split one target's history.

use crate::fetcher::normalize_url;
use crate::record::ScanRecord;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// Default maximum retained scan records
pub const DEFAULT_HISTORY_CAP: usize = 100;

/// Lowercased hostname of a URL, after scheme normalization
pub fn normalized_host(url: &str) -> Option<String> {
    normalize_url(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_ascii_lowercase()))
}

/// Append-only (capped) log of past scan results
pub struct ScanStore {
    cap: usize,
    order: VecDeque<Uuid>,
    records: HashMap<Uuid, ScanRecord>,
}

impl ScanStore {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            order: VecDeque::new(),
            records: HashMap::new(),
        }
    }

    /// Append a record, evicting the oldest once the cap is reached.
    /// Returns the evicted record, if any.
    pub fn append(&mut self, record: ScanRecord) -> Option<ScanRecord> {
        let mut evicted = None;
        if self.order.len() >= self.cap {
            if let Some(oldest) = self.order.pop_front() {
                evicted = self.records.remove(&oldest);
            }
        }
        self.order.push_back(record.id);
        self.records.insert(record.id, record);
        evicted
    }

    pub fn get(&self, id: Uuid) -> Option<&ScanRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Most-recent-first history, optionally filtered by substring
    /// match on the target URL (case-insensitive).
    pub fn history(&self, filter: Option<&str>, limit: usize) -> Vec<ScanRecord> {
        let needle = filter.map(|f| f.to_lowercase());
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id))
            .filter(|record| match &needle {
                Some(needle) => record.url.to_lowercase().contains(needle),
                None => true,
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Oldest-first records for one normalized hostname
    pub fn for_host(&self, host: &str) -> Vec<ScanRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|record| normalized_host(&record.url).as_deref() == Some(host))
            .cloned()
            .collect()
    }

    /// All records in insertion order, for persistence
    pub fn records(&self) -> Vec<ScanRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    /// Rebuild a store from persisted records (insertion order)
    pub fn restore(cap: usize, records: Vec<ScanRecord>) -> Self {
        let mut store = Self::new(cap);
        for record in records {
            store.append(record);
        }
        store
    }
}
