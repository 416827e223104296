use crate::parser::MessageParser;
use tracing::{debug, warn};

/// Collect camera identifiers from registration lines, in file order.
///
/// Scanning stops once `expected` identifiers were found. A log with fewer
/// registrations yields a shorter list.
pub fn find_cameras<S: AsRef<str>>(lines: &[S], expected: usize) -> Vec<String> {
    find_cameras_with(&MessageParser::default(), lines, expected)
}

pub fn find_cameras_with<S: AsRef<str>>(
    parser: &MessageParser,
    lines: &[S],
    expected: usize,
) -> Vec<String> {
    let mut camera_ids = Vec::with_capacity(expected);
    if expected == 0 {
        return camera_ids;
    }

    for (index, line) in lines.iter().enumerate() {
        match parser.parse_registration(line.as_ref()) {
            Ok(Some(camera_id)) => {
                debug!("Camera {} registered on line {}", camera_id, index + 1);
                camera_ids.push(camera_id);
                if camera_ids.len() == expected {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping line {}: {}", index + 1, e),
        }
    }

    if camera_ids.len() < expected {
        warn!(
            "Only {} of {} expected cameras registered in log",
            camera_ids.len(),
            expected
        );
    }

    camera_ids
}
