use super::*;
use crate::parser::MessageParser;

fn registration(camera_id: &str) -> String {
    format!("[rosout][INFO] 2019-11-07 11:02:10,412: REGISTER NEW CAMERA {camera_id}\n")
}

fn frame_loss(camera_id: &str) -> String {
    format!("[rosout][WARNING] 2019-11-07 11:43:16,986: frame data loss {camera_id}\n")
}

fn missing_data(camera_id: &str, frames: &[u64]) -> String {
    let listed: Vec<String> = frames.iter().map(|f| f.to_string()).collect();
    format!(
        "[rosout][INFO] 2019-11-07 12:21:56,876: requested missing data from {camera_id}. offset 1429, frames [{}]\n",
        listed.join(", ")
    )
}

fn sample_log() -> Vec<String> {
    vec![
        "[rospy.client][INFO] 2019-11-07 11:00:00,001: init_node, name[/flydra_mainbrain], pid[17828]\n".to_string(),
        registration("Basler_22176483"),
        registration("Basler_22176500"),
        registration("Basler_22551998"),
        frame_loss("Basler_22551998"),
        missing_data("Basler_22176500", &[145521, 145522, 145523]),
        frame_loss("Basler_22551998"),
        frame_loss("Basler_22176483"),
        missing_data("Basler_22176500", &[145600]),
    ]
}

#[test]
fn test_find_cameras_in_file_order() {
    let log = sample_log();

    let cameras = find_cameras(&log, 16);
    assert_eq!(
        cameras,
        vec!["Basler_22176483", "Basler_22176500", "Basler_22551998"]
    );
    for (camera, line) in cameras.iter().zip(&log[1..4]) {
        assert_eq!(camera, &line[line.len() - 16..line.len() - 1]);
    }
}

#[test]
fn test_find_cameras_stops_at_expected_count() {
    let log = sample_log();

    let cameras = find_cameras(&log, 2);
    assert_eq!(cameras, vec!["Basler_22176483", "Basler_22176500"]);
}

#[test]
fn test_find_cameras_keeps_duplicates() {
    let log = vec![
        registration("Basler_22176483"),
        registration("Basler_22176483"),
        registration("Basler_22551998"),
    ];

    let cameras = find_cameras(&log, 2);
    assert_eq!(cameras, vec!["Basler_22176483", "Basler_22176483"]);
}

#[test]
fn test_find_cameras_skips_marker_without_id() {
    let log = vec![
        "[rosout][INFO] 2019-11-07 11:02:10,412: REGISTER NEW CAMERA \n".to_string(),
        registration("Basler_22176483"),
    ];

    let cameras = find_cameras(&log, 1);
    assert_eq!(cameras, vec!["Basler_22176483"]);
}

#[test]
fn test_find_cameras_with_no_registrations() {
    let log = vec![frame_loss("Basler_22551998")];

    assert!(find_cameras(&log, 4).is_empty());
    assert!(find_cameras(&sample_log(), 0).is_empty());
}

#[test]
fn test_count_frames_lost() {
    let tally = count_frames_lost(&sample_log());

    assert_eq!(tally.get("Basler_22551998"), 2);
    assert_eq!(tally.get("Basler_22176483"), 1);
    assert_eq!(tally.len(), 2);
}

#[test]
fn test_camera_without_losses_is_absent() {
    let tally = count_frames_lost(&sample_log());

    assert!(!tally.contains("Basler_22176500"));
}

#[test]
fn test_single_loss_line_counts_once() {
    let log = vec![frame_loss("Basler_22551998")];
    let tally = count_frames_lost(&log);

    assert_eq!(tally.get("Basler_22551998"), 1);
    assert_eq!(tally.total(), 1);
}

#[test]
fn test_count_frames_missing_data() {
    let tally = count_frames_missing_data(&sample_log());

    assert_eq!(tally.get("Basler_22176500"), 4);
    assert_eq!(tally.len(), 1);
    assert!(!tally.contains("Basler_22551998"));
}

#[test]
fn test_missing_data_adds_one_per_listed_frame() {
    let log = vec![
        "requested missing data from Basler_22176500. offset 3, frames [1,2,3,4,5]".to_string(),
    ];

    assert_eq!(count_frames_missing_data(&log).get("Basler_22176500"), 5);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let log = vec![
        "[rosout][WARNING] 2019-11-07 11:43:16,986: frame data loss\n".to_string(),
        "requested missing data from Basler_22176500. offset 1429\n".to_string(),
        "requested missing data from Basler_22176500. offset 1429, frames []\n".to_string(),
        frame_loss("Basler_22551998"),
        missing_data("Basler_22176500", &[9, 10]),
    ];

    let lost = count_frames_lost(&log);
    assert_eq!(lost.total(), 1);
    assert_eq!(lost.get("Basler_22551998"), 1);

    let missing = count_frames_missing_data(&log);
    assert_eq!(missing.get("Basler_22176500"), 2);
}

#[test]
fn test_missing_data_with_custom_parser() {
    let parser = MessageParser::new("Cam_");
    let log = vec![
        "requested missing data from Cam_00000000042. offset 3, frames [1, 2]".to_string(),
        registration("Cam_00000000042"),
    ];

    let missing = count_frames_missing_data_with(&parser, &log);
    assert_eq!(missing.get("Cam_00000000042"), 2);
    assert_eq!(find_cameras_with(&parser, &log, 1), vec!["Cam_00000000042"]);
    assert!(count_frames_lost_with(&parser, &log).is_empty());
}

#[test]
fn test_scans_are_repeatable() {
    let log = sample_log();

    assert_eq!(count_frames_lost(&log), count_frames_lost(&log));
    assert_eq!(
        count_frames_missing_data(&log),
        count_frames_missing_data(&log)
    );
    assert_eq!(find_cameras(&log, 16), find_cameras(&log, 16));
}
