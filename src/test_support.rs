//! Shared fixtures for unit tests.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock(RwLock<DateTime<Utc>>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(RwLock::new(instant))
    }

    pub fn default_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixed instant")
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.write().expect("clock lock");
        *now += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Self::default_instant())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.read().expect("clock lock")
    }
}

/// Unique directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir(Utf8PathBuf);

impl TempDir {
    pub fn new(label: &str) -> Self {
        let base = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("utf-8 temp dir");
        Self(base.join(format!("fieldwatch-{label}-{}", uuid::Uuid::new_v4())))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        drop(std::fs::remove_dir_all(&self.0));
    }
}
