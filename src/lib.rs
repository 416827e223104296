//! Frame health of a multi-camera Flydra tracking session, read from the
//! mainbrain log: frames lost per camera, frames with missing data per
//! camera, and the share of expected frames affected.

pub mod config;
pub mod error;
pub mod log_file;
pub mod monitor;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod tally;

pub use config::{ConfigOverrides, MonitorConfig};
pub use error::{MonitorError, Result};
pub use log_file::{load_log_lines, locate_log_file};
pub use monitor::{FrameMonitor, LogScan};
pub use parser::{read_session_start, MalformedLine, MessageParser};
pub use report::{CameraHealth, HealthReport, HealthStatus, HealthThresholds};
pub use scanner::{count_frames_lost, count_frames_missing_data, find_cameras};
pub use tally::FrameTally;
