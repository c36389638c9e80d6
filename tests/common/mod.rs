#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use finflow_core::{
    core::{FixedClock, SequentialIds},
    storage::JsonStorage,
    FinanceTracker,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Opens a tracker over a JSON file with a clock pinned to `today`. Ids are
/// sequential from `first_id`, so reopened stores need a fresh range.
pub fn tracker_at(path: &PathBuf, today: NaiveDate, first_id: u64) -> FinanceTracker {
    let storage = JsonStorage::new(path.clone()).expect("create json storage backend");
    FinanceTracker::with_collaborators(
        Box::new(storage),
        Box::new(SequentialIds::starting_at(first_id)),
        Box::new(FixedClock(today)),
    )
}

/// Creates an isolated JSON-backed tracker and returns it with its data file.
pub fn setup_tracker() -> (FinanceTracker, PathBuf) {
    let path = temp_base().join("finflow.json");
    (tracker_at(&path, date(2025, 1, 15), 1), path)
}
