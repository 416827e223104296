//! Per-camera frame health computed from the loss and missing-data tallies.

mod health;
mod render;
#[cfg(test)]
mod tests;

pub use health::{HealthStatus, HealthThresholds};

use crate::tally::FrameTally;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Frame health of a single camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraHealth {
    pub camera_id: String,
    pub frames_lost: u64,
    pub frames_missing_data: u64,
    pub lost_percent: f64,
    pub missing_data_percent: f64,
    /// Frames that were lost or had missing data
    pub issue_frames: u64,
    pub issue_percent: f64,
    pub status: HealthStatus,
}

/// Health summary of one tracking session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub log_file: Option<PathBuf>,
    pub session_start: Option<NaiveDateTime>,
    pub fps: u32,
    pub duration_seconds: u64,
    /// Frames each camera should have delivered
    pub expected_frames: u64,
    pub camera_count: usize,
    pub cameras: Vec<CameraHealth>,
    pub total_issue_frames: u64,
    /// Frames all cameras together should have delivered
    pub total_expected_frames: u64,
    pub aggregate_percent: f64,
    pub status: HealthStatus,
    pub thresholds: HealthThresholds,
    /// Registered cameras that appear in neither tally
    pub silent_cameras: Vec<String>,
    /// Cameras with losses that never registered
    pub unregistered_cameras: Vec<String>,
}

impl HealthReport {
    /// Combine both tallies for every camera in `camera_ids`.
    ///
    /// A camera missing from a tally counts as zero. The aggregate is taken
    /// over `camera_count` cameras, which may exceed the number that registered.
    pub fn compute(
        lost: &FrameTally,
        missing: &FrameTally,
        camera_ids: &[String],
        fps: u32,
        duration_seconds: u64,
        camera_count: usize,
    ) -> Self {
        let expected_frames = (fps as u64).saturating_mul(duration_seconds);
        let thresholds = HealthThresholds::default();

        let mut cameras = Vec::with_capacity(camera_ids.len());
        let mut silent_cameras = Vec::new();
        let mut total_issue_frames: u64 = 0;

        for camera_id in camera_ids {
            if !lost.contains(camera_id) || !missing.contains(camera_id) {
                debug!(
                    "Camera {} has no entry in at least one tally, counting it as zero",
                    camera_id
                );
            }
            if !lost.contains(camera_id) && !missing.contains(camera_id) {
                silent_cameras.push(camera_id.clone());
            }

            let frames_lost = lost.get(camera_id);
            let frames_missing_data = missing.get(camera_id);
            let issue_frames = frames_lost.saturating_add(frames_missing_data);
            let issue_percent = percent(issue_frames, expected_frames);
            total_issue_frames = total_issue_frames.saturating_add(issue_frames);

            cameras.push(CameraHealth {
                camera_id: camera_id.clone(),
                frames_lost,
                frames_missing_data,
                lost_percent: percent(frames_lost, expected_frames),
                missing_data_percent: percent(frames_missing_data, expected_frames),
                issue_frames,
                issue_percent,
                status: HealthStatus::classify(issue_percent, &thresholds),
            });
        }

        let mut unregistered_cameras: Vec<String> = lost
            .cameras()
            .chain(missing.cameras())
            .filter(|id| !camera_ids.iter().any(|known| known.as_str() == *id))
            .map(str::to_string)
            .collect();
        unregistered_cameras.sort();
        unregistered_cameras.dedup();
        for camera_id in &unregistered_cameras {
            warn!(
                "Camera {} reported frame issues but never registered",
                camera_id
            );
        }

        let total_expected_frames = expected_frames.saturating_mul(camera_count as u64);
        let aggregate_percent = percent(total_issue_frames, total_expected_frames);

        Self {
            log_file: None,
            session_start: None,
            fps,
            duration_seconds,
            expected_frames,
            camera_count,
            cameras,
            total_issue_frames,
            total_expected_frames,
            aggregate_percent,
            status: HealthStatus::classify(aggregate_percent, &thresholds),
            thresholds,
            silent_cameras,
            unregistered_cameras,
        }
    }

    /// Reclassify every camera and the aggregate against new thresholds
    pub fn with_thresholds(mut self, thresholds: HealthThresholds) -> Self {
        for camera in &mut self.cameras {
            camera.status = HealthStatus::classify(camera.issue_percent, &thresholds);
        }
        self.status = HealthStatus::classify(self.aggregate_percent, &thresholds);
        self.thresholds = thresholds;
        self
    }

    pub fn with_session_start(mut self, session_start: Option<NaiveDateTime>) -> Self {
        self.session_start = session_start;
        self
    }

    pub fn with_log_file<P: Into<PathBuf>>(mut self, log_file: P) -> Self {
        self.log_file = Some(log_file.into());
        self
    }

    pub fn camera(&self, camera_id: &str) -> Option<&CameraHealth> {
        self.cameras.iter().find(|c| c.camera_id == camera_id)
    }

    /// Worst status among the aggregate and every camera
    pub fn worst_status(&self) -> HealthStatus {
        self.cameras
            .iter()
            .map(|c| c.status)
            .chain(std::iter::once(self.status))
            .max()
            .unwrap_or(HealthStatus::Healthy)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn percent(frames: u64, expected: u64) -> f64 {
    if expected == 0 {
        0.0
    } else {
        frames as f64 / expected as f64 * 100.0
    }
}
