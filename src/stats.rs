//! Usage statistics
//!
//! Counts how many payloads were generated per content type. The counters
//! live in [`UsageCounts`]; [`UsageStats`] pairs them with a [`StatsStore`]
//! so every change is saved as it happens.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StatsError;
use crate::models::ContentType;

/// Key the snapshot is stored under
pub const STATS_KEY: &str = "qr-analytics";

/// Serializable counter snapshot: `{"total":n,"types":{"url":n,...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounts {
    /// Payloads generated, all types together
    pub total: u64,
    /// Per-type counters; types never used are absent
    #[serde(default)]
    pub types: BTreeMap<ContentType, u64>,
}

impl UsageCounts {
    /// Count one payload of `content_type`
    pub fn record(&mut self, content_type: ContentType) {
        self.total += 1;
        *self.types.entry(content_type).or_insert(0) += 1;
    }

    /// Payloads of `content_type` so far
    pub fn count(&self, content_type: ContentType) -> u64 {
        self.types.get(&content_type).copied().unwrap_or(0)
    }

    /// Number of distinct types recorded at least once
    pub fn types_used(&self) -> usize {
        self.types.values().filter(|&&n| n > 0).count()
    }

    /// Highest counter; ties go to the type earlier in tab order
    pub fn most_used(&self) -> Option<ContentType> {
        let mut best: Option<(ContentType, u64)> = None;
        for (&ty, &n) in &self.types {
            if n == 0 {
                continue;
            }
            match best {
                Some((_, top)) if top >= n => {}
                _ => best = Some((ty, n)),
            }
        }
        best.map(|(ty, _)| ty)
    }
}

/// Where usage snapshots are kept between sessions
pub trait StatsStore {
    /// Stored value for `key`, `None` if nothing was saved
    fn load(&self, key: &str) -> Result<Option<String>, StatsError>;
    /// Overwrite the value for `key`
    fn save(&self, key: &str, value: &str) -> Result<(), StatsError>;
    /// Remove `key`; removing a missing key is not an error
    fn clear(&self, key: &str) -> Result<(), StatsError>;
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StatsError> {
        self.entries
            .lock()
            .map_err(|_| StatsError::Store("memory store lock poisoned".into()))
    }
}

impl StatsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StatsError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StatsError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StatsError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

impl<S: StatsStore + ?Sized> StatsStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StatsError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StatsError> {
        (**self).save(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), StatsError> {
        (**self).clear(key)
    }
}

/// Usage counters backed by a store
#[derive(Debug)]
pub struct UsageStats<S> {
    counts: UsageCounts,
    store: S,
}

impl<S: StatsStore> UsageStats<S> {
    /// Restore counters from `store`
    ///
    /// A missing snapshot starts from zero. So does an unreadable one,
    /// with a warning, rather than refusing to start.
    pub fn open(store: S) -> Result<Self, StatsError> {
        let counts = match store.load(STATS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("discarding unreadable usage stats: {err}");
                UsageCounts::default()
            }),
            None => UsageCounts::default(),
        };
        Ok(Self { counts, store })
    }

    /// Count one generated payload and persist the new totals
    pub fn record(&mut self, content_type: ContentType) -> Result<(), StatsError> {
        self.counts.record(content_type);
        let raw = serde_json::to_string(&self.counts)?;
        self.store.save(STATS_KEY, &raw)
    }

    /// Zero every counter and drop the stored snapshot
    pub fn reset(&mut self) -> Result<(), StatsError> {
        self.counts = UsageCounts::default();
        self.store.clear(STATS_KEY)
    }

    /// Current snapshot
    pub fn counts(&self) -> &UsageCounts {
        &self.counts
    }

    /// Payloads generated, all types together
    pub fn total(&self) -> u64 {
        self.counts.total
    }

    /// Payloads of `content_type` so far
    pub fn count(&self, content_type: ContentType) -> u64 {
        self.counts.count(content_type)
    }

    /// Distinct types generated at least once
    pub fn types_used(&self) -> usize {
        self.counts.types_used()
    }

    /// See [`UsageCounts::most_used`]
    pub fn most_used(&self) -> Option<ContentType> {
        self.counts.most_used()
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_query() {
        let mut stats = UsageStats::open(MemoryStore::new()).unwrap();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.most_used(), None);

        stats.record(ContentType::Wifi).unwrap();
        stats.record(ContentType::Url).unwrap();
        stats.record(ContentType::Wifi).unwrap();

        assert_eq!(stats.total(), 3);
        assert_eq!(stats.count(ContentType::Wifi), 2);
        assert_eq!(stats.count(ContentType::Url), 1);
        assert_eq!(stats.count(ContentType::Event), 0);
        assert_eq!(stats.types_used(), 2);
        assert_eq!(stats.most_used(), Some(ContentType::Wifi));
    }

    #[test]
    fn test_tie_breaks_by_tab_order() {
        let mut counts = UsageCounts::default();
        counts.record(ContentType::Payment);
        counts.record(ContentType::Sms);
        assert_eq!(counts.most_used(), Some(ContentType::Sms));
    }

    #[test]
    fn test_persists_across_reopen() {
        let store = MemoryStore::new();
        {
            let mut stats = UsageStats::open(&store).unwrap();
            stats.record(ContentType::Email).unwrap();
            stats.record(ContentType::Email).unwrap();
        }
        let raw = store.load(STATS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"total":2,"types":{"email":2}}"#);

        let stats = UsageStats::open(&store).unwrap();
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.count(ContentType::Email), 2);
    }

    #[test]
    fn test_reset_clears_store() {
        let store = MemoryStore::new();
        let mut stats = UsageStats::open(&store).unwrap();
        stats.record(ContentType::Text).unwrap();
        stats.reset().unwrap();

        assert_eq!(stats.total(), 0);
        assert_eq!(stats.types_used(), 0);
        assert_eq!(store.load(STATS_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh() {
        let store = MemoryStore::new();
        store.save(STATS_KEY, "{not json").unwrap();
        let stats = UsageStats::open(&store).unwrap();
        assert_eq!(stats.counts(), &UsageCounts::default());
    }

    #[test]
    fn test_reads_snapshot_without_types() {
        let store = MemoryStore::new();
        store.save(STATS_KEY, r#"{"total":4}"#).unwrap();
        let stats = UsageStats::open(&store).unwrap();
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.most_used(), None);
    }
}
