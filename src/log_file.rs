use crate::config::LogConfig;
use crate::error::{MonitorError, Result};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Find the most recently created log file in the configured directory.
pub fn locate_log_file(config: &LogConfig) -> Result<PathBuf> {
    locate_log_file_in(&config.directory, config)
}

/// Find the most recently created candidate log file in `directory`.
///
/// Filesystems without creation timestamps fall back to modification time.
pub fn locate_log_file_in(directory: &Path, config: &LogConfig) -> Result<PathBuf> {
    info!("Loading data from: {}", directory.display());

    let entries = fs::read_dir(directory).map_err(|e| MonitorError::log_file(directory, e))?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_candidate_log_name(name, config) {
            continue;
        }

        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let stamp = match metadata.created() {
            Ok(created) => created,
            Err(_) => metadata.modified()?,
        };
        debug!("Candidate log file {} ({:?})", path.display(), stamp);

        if newest.as_ref().map_or(true, |(best, _)| stamp > *best) {
            newest = Some((stamp, path));
        }
    }

    match newest {
        Some((_, path)) => {
            info!("Working with file: {}", path.display());
            Ok(path)
        }
        None => Err(MonitorError::NoLogFile {
            directory: directory.to_path_buf(),
            pattern: config.pattern(),
        }),
    }
}

/// Check if a file name matches `<stem>-<index>.<extension>` for a configured index.
///
/// The index must be written without leading zeros.
pub fn is_candidate_log_name(name: &str, config: &LogConfig) -> bool {
    let Some(rest) = name.strip_prefix(config.file_stem.as_str()) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix('-') else {
        return false;
    };
    let Some((index, extension)) = rest.split_once('.') else {
        return false;
    };

    extension == config.extension
        && !index.is_empty()
        && index.chars().all(|c| c.is_ascii_digit())
        && index
            .parse::<u32>()
            .map(|i| i.to_string() == index && config.indices.contains(&i))
            .unwrap_or(false)
}

/// Read the whole log file into memory, one entry per line.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn load_log_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| MonitorError::log_file(path, e))?;

    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buffer = Vec::new();
    let mut lossy = 0usize;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| MonitorError::log_file(path, e))?;
        if read == 0 {
            break;
        }

        let line = match String::from_utf8(std::mem::take(&mut buffer)) {
            Ok(line) => line,
            Err(e) => {
                lossy += 1;
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        lines.push(line.trim_end_matches(['\r', '\n']).to_string());
    }

    if lossy > 0 {
        warn!(
            "{} lines of {} contained invalid UTF-8",
            lossy,
            path.display()
        );
    }
    debug!("Read {} lines from {}", lines.len(), path.display());

    Ok(lines)
}
