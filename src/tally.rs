use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-camera frame counter built in a single pass over the log.
///
/// Only cameras that appeared in at least one matching line are present;
/// [`FrameTally::get`] reads an absent camera as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameTally {
    counts: BTreeMap<String, u64>,
}

impl FrameTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `frames` to the camera's count. Adding zero leaves the tally untouched.
    pub fn record(&mut self, camera_id: &str, frames: u64) {
        if frames == 0 {
            return;
        }
        *self.counts.entry(camera_id.to_string()).or_insert(0) += frames;
    }

    pub fn get(&self, camera_id: &str) -> u64 {
        self.counts.get(camera_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, camera_id: &str) -> bool {
        self.counts.contains_key(camera_id)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all cameras
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn cameras(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrameTally {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (camera_id, frames) in iter {
            let camera_id: String = camera_id.into();
            tally.record(&camera_id, frames);
        }
        tally
    }
}
