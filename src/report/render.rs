use std::fmt;

use super::{HealthReport, HealthStatus};

const SEPARATOR: &str = " ------------ ";

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(log_file) = &self.log_file {
            writeln!(f, " - Working with file: {}", log_file.display())?;
        }
        if let Some(started) = &self.session_start {
            writeln!(f, " - Session started: {}", started)?;
        }
        writeln!(
            f,
            " - {} of {} cameras registered, {} fps over {} s",
            self.cameras.len(),
            self.camera_count,
            self.fps,
            self.duration_seconds
        )?;
        writeln!(f, "{}", SEPARATOR)?;

        for camera in &self.cameras {
            writeln!(
                f,
                " * Camera: {} -- {} frames lost over {} ({:.3} % of frames lost)",
                camera.camera_id, camera.frames_lost, self.expected_frames, camera.lost_percent
            )?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        for camera in &self.cameras {
            writeln!(
                f,
                " * Camera: {} -- {} frames with missing info over {} ({:.3} % of frames lost)",
                camera.camera_id,
                camera.frames_missing_data,
                self.expected_frames,
                camera.missing_data_percent
            )?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        for camera in &self.cameras {
            write!(
                f,
                " * Camera: {} -- {:.3} % of frames were lost or had missing information (# of frames lost: {})",
                camera.camera_id, camera.issue_percent, camera.issue_frames
            )?;
            if camera.status != HealthStatus::Healthy {
                write!(f, " [{}]", camera.status)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        writeln!(
            f,
            " * Total amount of frames lost (if all cameras have been recording at {}fps): {:.3} % [{}]",
            self.fps, self.aggregate_percent, self.status
        )?;
        writeln!(
            f,
            " * {} frames over the total of {} had an issue",
            self.total_issue_frames, self.total_expected_frames
        )?;

        if !self.unregistered_cameras.is_empty() {
            writeln!(
                f,
                " ! Cameras with issues that never registered: {}",
                self.unregistered_cameras.join(", ")
            )?;
        }
        if self.cameras.len() < self.camera_count {
            writeln!(
                f,
                " ! Only {} of {} expected cameras found in the log",
                self.cameras.len(),
                self.camera_count
            )?;
        }

        Ok(())
    }
}
