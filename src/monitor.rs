// SPDX-License-Identifier: PMPL-1.0-or-later
//! Monitors: persistent subscriptions that re-scan one target on a
//! schedule.
//!
//! The registry is the single owner of monitor mutation. Monitors are
//! soft-deactivated, never removed; re-registering the same
//! (normalized url, contact) pair updates the existing record instead
//! of duplicating it.

use crate::error::EngineError;
use crate::fetcher::normalize_url;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// How often a monitor re-scans its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Fixed interval per frequency. Monthly is a 30-day
    /// approximation, not calendar-month arithmetic.
    pub fn interval(&self) -> Duration {
        match self {
            Frequency::Daily => Duration::hours(24),
            Frequency::Weekly => Duration::days(7),
            Frequency::Monthly => Duration::days(30),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// One registered scanning subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    pub id: Uuid,
    /// Normalized target URL
    pub url: String,
    /// Notification address for report consumers
    pub contact: String,
    pub frequency: Frequency,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_checked: Option<DateTime<Utc>>,
    pub last_score: Option<u8>,
    pub next_due: DateTime<Utc>,
}

/// Single owner of the monitor list
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    monitors: Vec<Monitor>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target, or update the existing registration for the
    /// same (normalized url, contact) pair. A fresh monitor is due
    /// immediately; a re-registration is rescheduled from now at the
    /// new frequency.
    pub fn register(
        &mut self,
        url: &str,
        contact: &str,
        frequency: Frequency,
        now: DateTime<Utc>,
    ) -> Result<Monitor, EngineError> {
        let normalized = normalize_url(url)
            .map_err(|_| EngineError::InvalidUrl(url.to_string()))?
            .to_string();
        validate_contact(contact)?;

        if let Some(existing) = self
            .monitors
            .iter_mut()
            .find(|m| m.url == normalized && m.contact == contact)
        {
            existing.frequency = frequency;
            existing.active = true;
            existing.next_due = now + frequency.interval();
            info!(url = %existing.url, %frequency, "updated monitor registration");
            return Ok(existing.clone());
        }

        let monitor = Monitor {
            id: Uuid::new_v4(),
            url: normalized,
            contact: contact.to_string(),
            frequency,
            active: true,
            created_at: now,
            last_checked: None,
            last_score: None,
            next_due: now,
        };
        info!(url = %monitor.url, %frequency, "registered monitor");
        self.monitors.push(monitor.clone());
        Ok(monitor)
    }

    /// Soft-deactivate a monitor. The record stays for history.
    pub fn deactivate(&mut self, id: Uuid) -> Result<(), EngineError> {
        let monitor = self
            .monitors
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EngineError::MonitorNotFound(id))?;
        monitor.active = false;
        info!(url = %monitor.url, "deactivated monitor");
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id == id)
    }

    pub fn list(&self) -> &[Monitor] {
        &self.monitors
    }

    /// Active monitors due at or before `now`, in registration order
    pub fn due(&self, now: DateTime<Utc>) -> Vec<Uuid> {
        self.monitors
            .iter()
            .filter(|m| m.active && m.next_due <= now)
            .map(|m| m.id)
            .collect()
    }

    /// Record a successful scan and schedule the next one
    pub fn mark_scanned(&mut self, id: Uuid, now: DateTime<Utc>, score: u8) {
        if let Some(monitor) = self.monitors.iter_mut().find(|m| m.id == id) {
            monitor.last_checked = Some(now);
            monitor.last_score = Some(score);
            monitor.next_due = now + monitor.frequency.interval();
        }
    }

    /// A failed scan only advances the schedule; last-checked and
    /// last-score keep their values from the last success.
    pub fn mark_failed(&mut self, id: Uuid, now: DateTime<Utc>) {
        if let Some(monitor) = self.monitors.iter_mut().find(|m| m.id == id) {
            monitor.next_due = now + monitor.frequency.interval();
        }
    }

    /// All monitors, for persistence
    pub fn records(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn restore(monitors: Vec<Monitor>) -> Self {
        Self { monitors }
    }
}

fn validate_contact(contact: &str) -> Result<(), EngineError> {
    let trimmed = contact.trim();
    let invalid = || EngineError::InvalidContact(contact.to_string());

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (name, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if name.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MonitorRegistry {
        MonitorRegistry::new()
    }

    #[test]
    fn test_register_normalizes_url() {
        let mut reg = registry();
        let monitor = reg
            .register("example.com", "a11y@example.com", Frequency::Weekly, Utc::now())
            .unwrap();
        assert_eq!(monitor.url, "https://example.com/");
        assert!(monitor.active);
        assert!(monitor.last_checked.is_none());
    }

    #[test]
    fn test_register_rejects_bad_input() {
        let mut reg = registry();
        assert!(matches!(
            reg.register("http://", "a11y@example.com", Frequency::Daily, Utc::now()),
            Err(EngineError::InvalidUrl(_))
        ));
        assert!(matches!(
            reg.register("example.com", "not-an-address", Frequency::Daily, Utc::now()),
            Err(EngineError::InvalidContact(_))
        ));
        assert!(matches!(
            reg.register("example.com", "user@nodot", Frequency::Daily, Utc::now()),
            Err(EngineError::InvalidContact(_))
        ));
    }

    #[test]
    fn test_reregistration_updates_in_place() {
        let mut reg = registry();
        let now = Utc::now();
        let first = reg
            .register("example.com", "a11y@example.com", Frequency::Weekly, now)
            .unwrap();
        let second = reg
            .register("https://example.com/", "a11y@example.com", Frequency::Daily, now)
            .unwrap();

        assert_eq!(reg.list().len(), 1);
        assert_eq!(first.id, second.id);
        assert_eq!(reg.list()[0].frequency, Frequency::Daily);
    }

    #[test]
    fn test_reregistration_reactivates() {
        let mut reg = registry();
        let now = Utc::now();
        let monitor = reg
            .register("example.com", "a11y@example.com", Frequency::Weekly, now)
            .unwrap();
        reg.deactivate(monitor.id).unwrap();
        assert!(!reg.list()[0].active);

        reg.register("example.com", "a11y@example.com", Frequency::Weekly, now)
            .unwrap();
        assert!(reg.list()[0].active);
    }

    #[test]
    fn test_different_contact_is_a_new_monitor() {
        let mut reg = registry();
        let now = Utc::now();
        reg.register("example.com", "a@example.com", Frequency::Daily, now)
            .unwrap();
        reg.register("example.com", "b@example.com", Frequency::Daily, now)
            .unwrap();
        assert_eq!(reg.list().len(), 2);
    }

    #[test]
    fn test_deactivate_unknown_is_not_found() {
        let mut reg = registry();
        assert!(matches!(
            reg.deactivate(Uuid::new_v4()),
            Err(EngineError::MonitorNotFound(_))
        ));
    }

    #[test]
    fn test_due_selection() {
        let mut reg = registry();
        let now = Utc::now();
        let fresh = reg
            .register("a.example", "a11y@example.com", Frequency::Daily, now)
            .unwrap();
        let scanned = reg
            .register("b.example", "a11y@example.com", Frequency::Daily, now)
            .unwrap();
        reg.mark_scanned(scanned.id, now, 90);

        let inactive = reg
            .register("c.example", "a11y@example.com", Frequency::Daily, now)
            .unwrap();
        reg.deactivate(inactive.id).unwrap();

        let due = reg.due(now);
        assert_eq!(due, vec![fresh.id]);

        // After the interval passes, the scanned monitor comes due again
        let later = now + Frequency::Daily.interval() + Duration::minutes(1);
        let due = reg.due(later);
        assert!(due.contains(&scanned.id));
        assert!(!due.contains(&inactive.id));
    }

    #[test]
    fn test_mark_scanned_updates_state() {
        let mut reg = registry();
        let now = Utc::now();
        let monitor = reg
            .register("example.com", "a11y@example.com", Frequency::Weekly, now)
            .unwrap();
        reg.mark_scanned(monitor.id, now, 85);

        let updated = reg.get(monitor.id).unwrap();
        assert_eq!(updated.last_score, Some(85));
        assert_eq!(updated.last_checked, Some(now));
        assert_eq!(updated.next_due, now + Frequency::Weekly.interval());
    }

    #[test]
    fn test_mark_failed_only_reschedules() {
        let mut reg = registry();
        let now = Utc::now();
        let monitor = reg
            .register("example.com", "a11y@example.com", Frequency::Daily, now)
            .unwrap();
        reg.mark_failed(monitor.id, now);

        let updated = reg.get(monitor.id).unwrap();
        assert!(updated.last_checked.is_none());
        assert!(updated.last_score.is_none());
        assert_eq!(updated.next_due, now + Frequency::Daily.interval());
    }

    #[test]
    fn test_frequency_intervals() {
        assert_eq!(Frequency::Daily.interval(), Duration::hours(24));
        assert_eq!(Frequency::Weekly.interval(), Duration::days(7));
        assert_eq!(Frequency::Monthly.interval(), Duration::days(30));
    }
}
