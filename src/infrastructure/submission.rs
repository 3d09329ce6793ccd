//! Delayed write of a signup to local storage.
//!
//! The delay stands in for network latency. It is tracked as a deadline that
//! the event loop polls, so input keeps flowing while a write is pending.

use crate::domain::{StorageResult, UserData};
use crate::infrastructure::KeyValueStore;
use std::time::{Duration, Instant};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_STORAGE_KEY: &str = "userData";

#[derive(Debug)]
struct InFlight {
    data: UserData,
    ready_at: Instant,
}

/// Writes a signup snapshot under a fixed key once a fixed delay has passed.
#[derive(Debug)]
pub struct SubmissionSimulator<S: KeyValueStore> {
    store: S,
    key: String,
    delay: Duration,
    in_flight: Option<InFlight>,
}

impl<S: KeyValueStore> SubmissionSimulator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            delay: DEFAULT_SUBMIT_DELAY,
            in_flight: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Begins a submission. A second call while one is in flight is ignored.
    pub fn start(&mut self, data: UserData, now: Instant) {
        if self.in_flight.is_some() {
            tracing::warn!("submission already in flight, ignoring start");
            return;
        }
        self.in_flight = Some(InFlight {
            data,
            ready_at: now + self.delay,
        });
    }

    /// Time left before the pending write happens.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.in_flight
            .as_ref()
            .map(|pending| pending.ready_at.saturating_duration_since(now))
    }

    /// Performs the pending write once its deadline has passed.
    ///
    /// Returns `None` while nothing is due, otherwise the outcome of the
    /// single write attempt. The submission is finished either way.
    pub fn poll(&mut self, now: Instant) -> Option<StorageResult<()>> {
        let due = self
            .in_flight
            .as_ref()
            .is_some_and(|pending| now >= pending.ready_at);
        if !due {
            return None;
        }

        let pending = self.in_flight.take()?;
        Some(self.write_snapshot(&pending.data))
    }

    fn write_snapshot(&mut self, data: &UserData) -> StorageResult<()> {
        let json = serde_json::to_string(data)?;
        self.store.write(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StorageError;
    use crate::infrastructure::MemoryStore;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn write(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
    }

    fn sample() -> UserData {
        UserData {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            cpf: "123.456.789-01".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let simulator = SubmissionSimulator::new(MemoryStore::new());
        assert_eq!(simulator.delay(), Duration::from_millis(3000));
        assert_eq!(simulator.key(), "userData");
        assert!(!simulator.is_in_flight());
    }

    #[test]
    fn test_write_waits_for_delay() {
        let mut simulator = SubmissionSimulator::new(MemoryStore::new());
        let start = Instant::now();
        simulator.start(sample(), start);

        assert!(simulator.poll(start + Duration::from_millis(2999)).is_none());
        assert!(simulator.store().is_empty());
        assert_eq!(
            simulator.remaining(start + Duration::from_millis(1000)),
            Some(Duration::from_millis(2000))
        );

        let result = simulator.poll(start + Duration::from_millis(3000));
        assert!(matches!(result, Some(Ok(()))));
        assert!(!simulator.is_in_flight());

        let stored = simulator.store().read("userData").unwrap().unwrap();
        let decoded: UserData = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_poll_without_submission() {
        let mut simulator = SubmissionSimulator::new(MemoryStore::new());
        assert!(simulator.poll(Instant::now()).is_none());
        assert_eq!(simulator.remaining(Instant::now()), None);
    }

    #[test]
    fn test_failed_write_surfaces_error() {
        let mut simulator = SubmissionSimulator::new(FailingStore).with_delay(Duration::ZERO);
        let now = Instant::now();
        simulator.start(sample(), now);

        let result = simulator.poll(now);
        assert!(matches!(result, Some(Err(StorageError::Unavailable(_)))));
        assert!(!simulator.is_in_flight());
        assert!(simulator.poll(now).is_none());
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut simulator = SubmissionSimulator::new(MemoryStore::new())
            .with_key("custom")
            .with_delay(Duration::from_millis(10));
        let now = Instant::now();
        simulator.start(sample(), now);

        let mut other = sample();
        other.name = "Someone Else".to_string();
        simulator.start(other, now + Duration::from_millis(5));

        assert!(matches!(simulator.poll(now + Duration::from_millis(10)), Some(Ok(()))));
        let stored = simulator.store().read("custom").unwrap().unwrap();
        assert!(stored.contains("Ana Silva"));
        assert!(simulator.poll(now + Duration::from_millis(20)).is_none());
    }
}
