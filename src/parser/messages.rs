use chrono::NaiveDateTime;
use thiserror::Error;

/// Marker carried by every camera registration line.
pub const REGISTRATION_MARKER: &str = "REGISTER NEW CAMERA ";
/// Marker carried by every frame-loss warning.
pub const FRAME_LOSS_MARKER: &str = "frame data loss";
/// Marker carried by every missing-data notice.
pub const MISSING_DATA_MARKER: &str = "missing data";
/// Word that precedes the frame-number list of a missing-data notice.
pub const FRAMES_TOKEN: &str = "frames";
/// Characters in a camera identifier such as `Basler_22176483`.
pub const CAMERA_ID_WIDTH: usize = 15;

const SESSION_START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A line that carried a message marker but not the layout that goes with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {kind} line: {reason}")]
pub struct MalformedLine {
    pub kind: &'static str,
    pub reason: String,
}

impl MalformedLine {
    fn new<S: Into<String>>(kind: &'static str, reason: S) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Field extraction for the three message kinds the tracking system logs.
///
/// Every parser returns `Ok(None)` when the line does not carry its marker,
/// `Err` when the marker is present but the expected layout is not.
#[derive(Debug, Clone)]
pub struct MessageParser {
    camera_prefix: String,
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("Basler")
    }
}

impl MessageParser {
    pub fn new<S: Into<String>>(camera_prefix: S) -> Self {
        Self {
            camera_prefix: camera_prefix.into(),
        }
    }

    /// `... REGISTER NEW CAMERA ... Basler_22176483`
    ///
    /// The identifier is the trailing [`CAMERA_ID_WIDTH`] characters of the line,
    /// all of which must follow the marker.
    pub fn parse_registration(&self, line: &str) -> Result<Option<String>, MalformedLine> {
        let line = strip_terminator(line);
        let Some((_, rest)) = line.split_once(REGISTRATION_MARKER) else {
            return Ok(None);
        };

        let camera_id = last_chars(rest, CAMERA_ID_WIDTH).ok_or_else(|| {
            MalformedLine::new(
                "registration",
                format!("shorter than a {}-character camera id", CAMERA_ID_WIDTH),
            )
        })?;

        Ok(Some(camera_id.to_string()))
    }

    /// `[rosout][WARNING] 2019-11-07 11:43:16,986: frame data loss Basler_22551998`
    ///
    /// In this layout the identifier occupies character 59 to the end of the
    /// line; it is read as the text following the marker.
    pub fn parse_frame_loss(&self, line: &str) -> Result<Option<String>, MalformedLine> {
        let line = strip_terminator(line);
        let Some((_, rest)) = line.split_once(FRAME_LOSS_MARKER) else {
            return Ok(None);
        };

        let camera_id = rest.trim();
        if camera_id.is_empty() {
            return Err(MalformedLine::new("frame loss", "no camera id after marker"));
        }

        Ok(Some(camera_id.to_string()))
    }

    /// `... requested missing data from Basler_22176500. offset 1429, frames [145521, 145522]`
    ///
    /// Returns the camera identifier and how many frame numbers were listed.
    pub fn parse_missing_data(&self, line: &str) -> Result<Option<(String, u64)>, MalformedLine> {
        let line = strip_terminator(line);
        if !line.contains(MISSING_DATA_MARKER) {
            return Ok(None);
        }

        let camera_start = line.find(self.camera_prefix.as_str()).ok_or_else(|| {
            MalformedLine::new(
                "missing data",
                format!("no camera id starting with {:?}", self.camera_prefix),
            )
        })?;
        let camera_id = first_chars(&line[camera_start..], CAMERA_ID_WIDTH).ok_or_else(|| {
            MalformedLine::new("missing data", "camera id runs past end of line")
        })?;

        let frames_start = line.find(FRAMES_TOKEN).ok_or_else(|| {
            MalformedLine::new("missing data", format!("no {:?} list", FRAMES_TOKEN))
        })?;
        let frames = count_listed_frames(&line[frames_start + FRAMES_TOKEN.len()..]);

        Ok(Some((camera_id.to_string(), frames)))
    }
}

/// Count the comma separated entries of a `[a, b, c]` list.
pub fn count_listed_frames(list: &str) -> u64 {
    list.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .count() as u64
}

/// Start of the tracking session, read from the first line of the log:
/// `[rospy.client][INFO] 2019-10-14 11:08:54,195: init_node, name[/flydra_mainbrain], pid[17828]`
pub fn read_session_start<S: AsRef<str>>(lines: &[S]) -> Option<NaiveDateTime> {
    let first = lines.first()?.as_ref();
    let stamp = first.get(21..40)?;
    NaiveDateTime::parse_from_str(stamp, SESSION_START_FORMAT).ok()
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn first_chars(s: &str, n: usize) -> Option<&str> {
    match s.char_indices().nth(n) {
        Some((end, _)) => Some(&s[..end]),
        None if s.chars().count() == n => Some(s),
        None => None,
    }
}

fn last_chars(s: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return Some("");
    }
    s.char_indices()
        .rev()
        .nth(n - 1)
        .map(|(start, _)| &s[start..])
}
