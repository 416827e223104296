use crate::parser::MessageParser;
use crate::tally::FrameTally;
use tracing::{debug, warn};

/// One lost frame per `frame data loss` line, keyed by camera.
pub fn count_frames_lost<S: AsRef<str>>(lines: &[S]) -> FrameTally {
    count_frames_lost_with(&MessageParser::default(), lines)
}

pub fn count_frames_lost_with<S: AsRef<str>>(parser: &MessageParser, lines: &[S]) -> FrameTally {
    let mut tally = FrameTally::new();

    for (index, line) in lines.iter().enumerate() {
        match parser.parse_frame_loss(line.as_ref()) {
            Ok(Some(camera_id)) => tally.record(&camera_id, 1),
            Ok(None) => {}
            Err(e) => warn!("Skipping line {}: {}", index + 1, e),
        }
    }

    debug!(
        "Counted {} lost frames across {} cameras",
        tally.total(),
        tally.len()
    );
    tally
}

/// One missing frame per frame number listed on a `missing data` line, keyed by camera.
pub fn count_frames_missing_data<S: AsRef<str>>(lines: &[S]) -> FrameTally {
    count_frames_missing_data_with(&MessageParser::default(), lines)
}

pub fn count_frames_missing_data_with<S: AsRef<str>>(
    parser: &MessageParser,
    lines: &[S],
) -> FrameTally {
    let mut tally = FrameTally::new();

    for (index, line) in lines.iter().enumerate() {
        match parser.parse_missing_data(line.as_ref()) {
            Ok(Some((camera_id, frames))) => tally.record(&camera_id, frames),
            Ok(None) => {}
            Err(e) => warn!("Skipping line {}: {}", index + 1, e),
        }
    }

    debug!(
        "Counted {} frames with missing data across {} cameras",
        tally.total(),
        tally.len()
    );
    tally
}
