use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MonitorConfig {
    pub cameras: CameraConfig,
    pub experiment: ExperimentConfig,
    pub log: LogConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CameraConfig {
    /// Total number of cameras used by the tracking system
    #[serde(default = "default_camera_count")]
    pub count: usize,

    /// Frames per second every camera records at
    #[serde(default = "default_camera_fps")]
    pub fps: u32,

    /// Vendor prefix every camera identifier starts with
    #[serde(default = "default_camera_id_prefix")]
    pub id_prefix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// How many hours the experiment has taken
    #[serde(default = "default_duration_hours")]
    pub duration_hours: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory the tracking system writes its logs into
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// File stem shared by all candidate log files
    #[serde(default = "default_log_file_stem")]
    pub file_stem: String,

    /// Log file extension, without the dot
    #[serde(default = "default_log_extension")]
    pub extension: String,

    /// Numeric suffixes accepted after the stem (`<stem>-<index>.<extension>`)
    #[serde(default = "default_log_indices")]
    pub indices: Vec<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// Combined loss percentage at which a camera is reported as degraded
    #[serde(default = "default_warning_percent")]
    pub warning_percent: f64,

    /// Combined loss percentage at which a camera is reported as critical
    #[serde(default = "default_critical_percent")]
    pub critical_percent: f64,
}

impl ExperimentConfig {
    pub fn duration_seconds(&self) -> u64 {
        (self.duration_hours * 3600.0).round() as u64
    }
}

impl LogConfig {
    /// Human readable form of the accepted file names, e.g. `flydra_mainbrain-[1,2].log`
    pub fn pattern(&self) -> String {
        let indices: Vec<String> = self.indices.iter().map(|i| i.to_string()).collect();
        format!(
            "{}-[{}].{}",
            self.file_stem,
            indices.join(","),
            self.extension
        )
    }
}

impl MonitorConfig {
    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("cameras.count", default_camera_count() as u64)?
            .set_default("cameras.fps", default_camera_fps())?
            .set_default("cameras.id_prefix", default_camera_id_prefix())?
            .set_default("experiment.duration_hours", default_duration_hours())?
            .set_default(
                "log.directory",
                default_log_directory().to_string_lossy().to_string(),
            )?
            .set_default("log.file_stem", default_log_file_stem())?
            .set_default("log.extension", default_log_extension())?
            .set_default("log.indices", default_log_indices())?
            .set_default("report.warning_percent", default_warning_percent())?
            .set_default("report.critical_percent", default_critical_percent())?
            .add_source(File::with_name(&path_str).required(false))
            // FLYDRA_HEALTH_CAMERAS__FPS=30 overrides cameras.fps
            .add_source(
                Environment::with_prefix("FLYDRA_HEALTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: MonitorConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cameras.count == 0 {
            return Err(ConfigError::Message(
                "Camera count must be greater than 0".to_string(),
            ));
        }

        if self.cameras.fps == 0 {
            return Err(ConfigError::Message(
                "Camera fps must be greater than 0".to_string(),
            ));
        }

        if self.cameras.id_prefix.is_empty() {
            return Err(ConfigError::Message(
                "Camera id_prefix must not be empty".to_string(),
            ));
        }

        if !(self.experiment.duration_hours > 0.0) || self.experiment.duration_seconds() == 0 {
            return Err(ConfigError::Message(
                "Experiment duration must be at least one second".to_string(),
            ));
        }

        if self.total_expected_frames().is_none() {
            return Err(ConfigError::Message(format!(
                "Expected frame count overflows for {} cameras at {} fps over {} hours",
                self.cameras.count, self.cameras.fps, self.experiment.duration_hours
            )));
        }

        if self.log.file_stem.is_empty() {
            return Err(ConfigError::Message(
                "Log file_stem must not be empty".to_string(),
            ));
        }

        if self.log.indices.is_empty() {
            return Err(ConfigError::Message(
                "At least one log file index must be configured".to_string(),
            ));
        }

        if self.report.warning_percent < 0.0
            || self.report.warning_percent >= self.report.critical_percent
        {
            return Err(ConfigError::Message(
                "Report warning_percent must be non-negative and below critical_percent"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Frames each camera should have delivered, `None` on overflow
    pub fn expected_frames(&self) -> Option<u64> {
        (self.cameras.fps as u64).checked_mul(self.experiment.duration_seconds())
    }

    /// Frames all cameras together should have delivered, `None` on overflow
    pub fn total_expected_frames(&self) -> Option<u64> {
        self.expected_frames()?.checked_mul(self.cameras.count as u64)
    }
}

/// Values given on the command line, applied over file and environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub log_directory: Option<PathBuf>,
    pub camera_count: Option<usize>,
    pub fps: Option<u32>,
    pub duration_hours: Option<f64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut MonitorConfig) {
        if let Some(dir) = &self.log_directory {
            debug!("Overriding log directory: {}", dir.display());
            config.log.directory = dir.clone();
        }
        if let Some(count) = self.camera_count {
            debug!("Overriding camera count: {}", count);
            config.cameras.count = count;
        }
        if let Some(fps) = self.fps {
            debug!("Overriding camera fps: {}", fps);
            config.cameras.fps = fps;
        }
        if let Some(hours) = self.duration_hours {
            debug!("Overriding experiment duration: {} hours", hours);
            config.experiment.duration_hours = hours;
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cameras: CameraConfig {
                count: default_camera_count(),
                fps: default_camera_fps(),
                id_prefix: default_camera_id_prefix(),
            },
            experiment: ExperimentConfig {
                duration_hours: default_duration_hours(),
            },
            log: LogConfig {
                directory: default_log_directory(),
                file_stem: default_log_file_stem(),
                extension: default_log_extension(),
                indices: default_log_indices(),
            },
            report: ReportConfig {
                warning_percent: default_warning_percent(),
                critical_percent: default_critical_percent(),
            },
        }
    }
}

// Default value functions
fn default_camera_count() -> usize {
    16
}
fn default_camera_fps() -> u32 {
    60
}
fn default_camera_id_prefix() -> String {
    "Basler".to_string()
}

fn default_duration_hours() -> f64 {
    3.0
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("/home/wtunnel/.ros/log/latest")
}
fn default_log_file_stem() -> String {
    "flydra_mainbrain".to_string()
}
fn default_log_extension() -> String {
    "log".to_string()
}
fn default_log_indices() -> Vec<u32> {
    vec![1, 2]
}

fn default_warning_percent() -> f64 {
    0.1
}
fn default_critical_percent() -> f64 {
    1.0
}
