use crate::config::MonitorConfig;
use crate::error::Result;
use crate::log_file::{load_log_lines, locate_log_file};
use crate::parser::{read_session_start, MessageParser};
use crate::report::{HealthReport, HealthThresholds};
use crate::scanner::{count_frames_lost_with, count_frames_missing_data_with, find_cameras_with};
use crate::tally::FrameTally;
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::info;

/// Everything extracted from one pass over a log
#[derive(Debug, Clone, PartialEq)]
pub struct LogScan {
    pub session_start: Option<NaiveDateTime>,
    pub camera_ids: Vec<String>,
    pub frames_lost: FrameTally,
    pub frames_missing_data: FrameTally,
}

/// Runs the locate → read → scan → report pipeline for one configuration
pub struct FrameMonitor {
    config: MonitorConfig,
    parser: MessageParser,
}

impl FrameMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        let parser = MessageParser::new(config.cameras.id_prefix.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Extract cameras and both tallies from in-memory log lines
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> LogScan {
        let camera_ids = find_cameras_with(&self.parser, lines, self.config.cameras.count);
        let frames_lost = count_frames_lost_with(&self.parser, lines);
        let frames_missing_data = count_frames_missing_data_with(&self.parser, lines);

        info!(
            "Found {} cameras, {} lost frames, {} frames with missing data",
            camera_ids.len(),
            frames_lost.total(),
            frames_missing_data.total()
        );

        LogScan {
            session_start: read_session_start(lines),
            camera_ids,
            frames_lost,
            frames_missing_data,
        }
    }

    /// Build the health report for in-memory log lines
    pub fn analyze_lines<S: AsRef<str>>(&self, lines: &[S]) -> HealthReport {
        let scan = self.scan(lines);
        self.report(&scan)
    }

    pub fn report(&self, scan: &LogScan) -> HealthReport {
        HealthReport::compute(
            &scan.frames_lost,
            &scan.frames_missing_data,
            &scan.camera_ids,
            self.config.cameras.fps,
            self.config.experiment.duration_seconds(),
            self.config.cameras.count,
        )
        .with_thresholds(HealthThresholds::from(&self.config.report))
        .with_session_start(scan.session_start)
    }

    /// Read and analyze a specific log file
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<HealthReport> {
        let path = path.as_ref();
        let lines = load_log_lines(path)?;
        Ok(self.analyze_lines(&lines).with_log_file(path))
    }

    /// Locate the newest log file in the configured directory and analyze it
    pub fn run(&self) -> Result<HealthReport> {
        let path = locate_log_file(&self.config.log)?;
        self.analyze_file(path)
    }
}
