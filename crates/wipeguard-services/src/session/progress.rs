use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use wipeguard_core::models::{ProgressOperation, ProgressSnapshot};

/// How long a session's snapshot outlives its last update.
pub const DEFAULT_PROGRESS_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    snapshot: ProgressSnapshot,
    updated_at: Instant,
}

/// Latest progress snapshot per session.
///
/// Only the most recent operation of a session is kept; a new upload, scan or wipe replaces
/// the previous snapshot. Entries idle for longer than the TTL are dropped, so sessions that
/// are never wiped or purged do not accumulate.
pub struct ProgressRegistry {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for ProgressRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_PROGRESS_TTL)
    }
}

impl ProgressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn report(
        &self,
        session_id: &str,
        operation: ProgressOperation,
        completed: usize,
        total: usize,
        current_file: Option<&str>,
    ) {
        self.report_at(session_id, operation, completed, total, current_file, Instant::now());
    }

    fn report_at(
        &self,
        session_id: &str,
        operation: ProgressOperation,
        completed: usize,
        total: usize,
        current_file: Option<&str>,
        now: Instant,
    ) {
        let snapshot = ProgressSnapshot::new(
            session_id,
            operation,
            completed,
            total,
            current_file.map(str::to_string),
        );
        tracing::debug!(
            session_id = %session_id,
            operation = %operation,
            completed,
            total,
            "Progress updated"
        );

        let mut entries = self.write();
        let entry = Entry {
            snapshot,
            updated_at: now,
        };
        if entries.insert(session_id.to_string(), entry).is_none() {
            // New session: sweep the ones that went idle.
            let ttl = self.ttl;
            entries.retain(|_, e| now.saturating_duration_since(e.updated_at) < ttl);
        }
    }

    pub fn get(&self, session_id: &str) -> Option<ProgressSnapshot> {
        self.get_at(session_id, Instant::now())
    }

    fn get_at(&self, session_id: &str, now: Instant) -> Option<ProgressSnapshot> {
        self.read()
            .get(session_id)
            .filter(|e| now.saturating_duration_since(e.updated_at) < self.ttl)
            .map(|e| e.snapshot.clone())
    }

    pub fn clear(&self, session_id: &str) {
        self.write().remove(session_id);
    }

    /// Number of sessions currently tracked, expired ones included until the next sweep.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_latest_snapshot_per_session() {
        let registry = ProgressRegistry::new();
        assert!(registry.get("s1").is_none());

        registry.report("s1", ProgressOperation::Scan, 0, 2, None);
        registry.report("s1", ProgressOperation::Scan, 1, 2, Some("a.txt"));
        registry.report("s2", ProgressOperation::Wipe, 0, 1, None);

        let snapshot = registry.get("s1").unwrap();
        assert_eq!(snapshot.completed, 1);
        assert_eq!(snapshot.current_file.as_deref(), Some("a.txt"));
        assert_eq!(snapshot.percent, 50);

        registry.clear("s1");
        assert!(registry.get("s1").is_none());
        assert!(registry.get("s2").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn idle_sessions_expire_and_are_swept() {
        let registry = ProgressRegistry::with_ttl(Duration::from_secs(60));
        let start = Instant::now();

        registry.report_at("old", ProgressOperation::Scan, 1, 1, None, start);
        assert!(registry.get_at("old", start + Duration::from_secs(59)).is_some());
        assert!(registry.get_at("old", start + Duration::from_secs(61)).is_none());

        // A new session triggers the sweep.
        registry.report_at(
            "new",
            ProgressOperation::Upload,
            0,
            1,
            None,
            start + Duration::from_secs(61),
        );
        assert_eq!(registry.len(), 1);
        assert!(registry
            .get_at("new", start + Duration::from_secs(61))
            .is_some());
    }

    #[test]
    fn updates_keep_a_session_alive() {
        let registry = ProgressRegistry::with_ttl(Duration::from_secs(60));
        let start = Instant::now();

        registry.report_at("s1", ProgressOperation::Scan, 0, 2, None, start);
        registry.report_at(
            "s1",
            ProgressOperation::Scan,
            1,
            2,
            None,
            start + Duration::from_secs(50),
        );
        assert!(registry
            .get_at("s1", start + Duration::from_secs(100))
            .is_some());
    }
}
